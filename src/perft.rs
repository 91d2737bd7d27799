use crate::board::Board;
use crate::move_generation::generate_moves;
use derive_more::Add;
use std::fmt::{Display, Formatter};

/// Leaf counts for a fixed-depth walk of the move tree. Exercises the full
/// make/unmake cycle and doubles as a test oracle for move generation.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Add)]
pub struct PerftResult {
    pub nodes: u64,
    pub captures: u64,
}

impl Display for PerftResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Nodes: {}", self.nodes)?;
        writeln!(f, "Captures: {}", self.captures)
    }
}

pub fn perft(board: &mut Board, depth: u32) -> PerftResult {
    let mut result = PerftResult::default();
    if depth == 0 {
        result.nodes = 1;
        return result;
    }
    for mov in generate_moves(board) {
        board.make_move(mov);
        if depth == 1 {
            result.nodes += 1;
            if board.captures.contains_key(&(board.ply - 1)) {
                result.captures += 1;
            }
        } else {
            result = result + perft(board, depth - 1);
        }
        board.unmake_move(mov);
    }
    result
}
