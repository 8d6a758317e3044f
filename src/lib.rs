//! An engine for generalized k-in-a-row Tic-Tac-Toe on an N×N board.
//!
//! The engine searches with depth-limited alpha-beta minimax over a single mutable
//! [`Position`](position::Position), restricting candidate moves to the neighbourhood of
//! stones already on the board. Root moves can be evaluated in parallel, each worker
//! owning a private copy of the position.

pub mod evaluation;
pub mod game;
pub mod move_gen;
pub mod position;
pub mod remote;
pub mod search;

mod tests;
