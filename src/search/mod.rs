//! Depth-limited alpha-beta search.
//!
//! The search works on one mutable `Position`: each candidate is placed, searched and removed
//! again before the next one is tried, so the position is unchanged when a call returns.
//! The player maximizes the score and the computer minimizes it.

pub use self::root::{best_move, best_move_parallel, best_move_sequential, play_best_move};
use crate::evaluation::{static_eval, win_score, Score};
use crate::move_gen::generate_moves;
use crate::position::{Position, Side, Square};

mod root;

/// Larger than any score the search can produce
pub const INFINITY: Score = Score::MAX;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SearchSettings {
    depth: u16,
    proximity: usize,
    parallel: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            depth: 4,
            proximity: 1,
            parallel: true,
        }
    }
}

impl SearchSettings {
    /// Maximum search depth in plies, counting the root move. Must be at least 1.
    pub fn depth(mut self, depth: u16) -> Self {
        assert!(depth > 0, "Search depth must be at least 1");
        self.depth = depth;
        self
    }

    /// Only consider moves within this distance of stones already on the board
    pub fn proximity(mut self, proximity: usize) -> Self {
        self.proximity = proximity;
        self
    }

    /// Evaluate root moves on the rayon thread pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn search_depth(&self) -> u16 {
        self.depth
    }

    pub fn proximity_radius(&self) -> usize {
        self.proximity
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}

/// Result of checking a search node before expanding it
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Evaluation {
    Decided(Score),
    Continue,
}

/// Score the node if the game is over or the depth limit is reached.
///
/// Wins are scored `MAX_VALUE` times the number of plies left before the depth limit,
/// so quicker wins are preferred over slower ones.
pub fn evaluate(
    position: &Position,
    settings: &SearchSettings,
    depth: u16,
    side_to_move: Side,
    last_move: Square,
) -> Evaluation {
    let last_mover = !side_to_move;
    let plies_left = settings.depth.saturating_sub(depth);
    if position.has_line_through(last_mover, last_move) {
        return Evaluation::Decided(win_score(last_mover, plies_left));
    }
    if position.is_full() {
        return Evaluation::Decided(0);
    }
    if depth >= settings.depth {
        return Evaluation::Decided(static_eval(position, plies_left));
    }
    Evaluation::Continue
}

/// Alpha-beta minimax from a position where `last_move` has just been played.
/// `depth` is the number of plies already played below the root, including `last_move`.
pub fn alpha_beta(
    position: &mut Position,
    settings: &SearchSettings,
    side_to_move: Side,
    depth: u16,
    alpha: Score,
    beta: Score,
    last_move: Square,
) -> Score {
    match evaluate(position, settings, depth, side_to_move, last_move) {
        Evaluation::Decided(score) => score,
        Evaluation::Continue => match side_to_move {
            Side::Player => maximize(position, settings, depth, alpha, beta),
            Side::Computer => minimize(position, settings, depth, alpha, beta),
        },
    }
}

fn maximize(
    position: &mut Position,
    settings: &SearchSettings,
    depth: u16,
    mut alpha: Score,
    beta: Score,
) -> Score {
    let mut moves = vec![];
    generate_moves(position, settings.proximity, &mut moves);

    let mut best_score = -INFINITY;
    for mv in moves {
        position.place(Side::Player, mv);
        let score = alpha_beta(position, settings, Side::Computer, depth + 1, alpha, beta, mv);
        position.undo(Side::Player, mv);

        best_score = best_score.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    best_score
}

fn minimize(
    position: &mut Position,
    settings: &SearchSettings,
    depth: u16,
    alpha: Score,
    mut beta: Score,
) -> Score {
    let mut moves = vec![];
    generate_moves(position, settings.proximity, &mut moves);

    let mut best_score = INFINITY;
    for mv in moves {
        position.place(Side::Computer, mv);
        let score = alpha_beta(position, settings, Side::Player, depth + 1, alpha, beta, mv);
        position.undo(Side::Computer, mv);

        best_score = best_score.min(score);
        beta = beta.min(score);
        if alpha >= beta {
            break;
        }
    }
    best_score
}
