use crate::board::piece_move::Move;
use crate::board::position::Position;
use thiserror::Error;

/// All failure modes surfaced by the engine. The engine-internal search path
/// never produces these; they come from externally supplied input (moves,
/// notation, diagrams, board dimensions).
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("position ({}, {}) is outside the board", .0.row, .0.col)]
    OutOfRange(Position),
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    #[error("invalid move notation: {0:?}")]
    InvalidNotation(String),
    #[error("invalid board diagram: {0:?}")]
    InvalidDiagram(String),
    #[error("board size {0} not supported, must be 4..=26")]
    InvalidSize(usize),
}
