//! Selection of the move to actually play.

use log::{debug, info};
use rayon::prelude::*;

use super::{alpha_beta, SearchSettings, INFINITY};
use crate::evaluation::Score;
use crate::move_gen::generate_moves;
use crate::position::{Position, Side, Square};

/// Search every candidate move for `side` and return the best one with its score,
/// or `None` if the board is full. The position is unchanged afterwards.
///
/// Among equally scored moves, the one generated last is chosen.
pub fn best_move(
    position: &mut Position,
    side: Side,
    settings: &SearchSettings,
) -> Option<(Square, Score)> {
    if settings.is_parallel() {
        best_move_parallel(position, side, settings)
    } else {
        best_move_sequential(position, side, settings)
    }
}

/// Pick the best move for `side` and play it on the board
pub fn play_best_move(
    position: &mut Position,
    side: Side,
    settings: &SearchSettings,
) -> Option<(Square, Score)> {
    let (mv, score) = best_move(position, side, settings)?;
    info!("{} plays {} with score {}", side, mv, score);
    position.place(side, mv);
    Some((mv, score))
}

pub fn best_move_sequential(
    position: &mut Position,
    side: Side,
    settings: &SearchSettings,
) -> Option<(Square, Score)> {
    let mut candidates = vec![];
    generate_moves(position, settings.proximity_radius(), &mut candidates);

    let scored_moves: Vec<(Square, Score)> = candidates
        .into_iter()
        .map(|mv| (mv, search_root_move(position, side, settings, mv)))
        .collect();
    select_move(side, scored_moves)
}

/// Search each candidate on the rayon thread pool. Every candidate gets its own copy of the position.
pub fn best_move_parallel(
    position: &Position,
    side: Side,
    settings: &SearchSettings,
) -> Option<(Square, Score)> {
    let mut candidates = vec![];
    generate_moves(position, settings.proximity_radius(), &mut candidates);

    let scored_moves: Vec<(Square, Score)> = candidates
        .into_par_iter()
        .map(|mv| {
            let mut worker_position = position.clone();
            (mv, search_root_move(&mut worker_position, side, settings, mv))
        })
        .collect();
    select_move(side, scored_moves)
}

fn search_root_move(
    position: &mut Position,
    side: Side,
    settings: &SearchSettings,
    mv: Square,
) -> Score {
    position.place(side, mv);
    let score = alpha_beta(position, settings, !side, 1, -INFINITY, INFINITY, mv);
    position.undo(side, mv);
    debug!("{} candidate {}: {}", side, mv, score);
    score
}

/// Scan the scores in candidate order. The computer wants the lowest score and the player the highest,
/// and a later move replaces an earlier one with the same score.
fn select_move(side: Side, scored_moves: Vec<(Square, Score)>) -> Option<(Square, Score)> {
    scored_moves
        .into_iter()
        .fold(None, |best, (mv, score)| match best {
            Some((_, best_score)) if !at_least_as_good(side, score, best_score) => best,
            _ => Some((mv, score)),
        })
}

fn at_least_as_good(side: Side, score: Score, best_score: Score) -> bool {
    match side {
        Side::Computer => score <= best_score,
        Side::Player => score >= best_score,
    }
}
