use crate::board::direction::Direction;
use crate::board::piece_move::Move;
use crate::board::position::Position;
use crate::board::Board;

/// Enumerates every slide for the side to move. Pieces are visited in
/// ascending (row, col) order and each piece's slides come out in
/// decreasing-row, increasing-row, decreasing-column, increasing-column
/// order, so the list is stable between runs.
pub fn generate_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(board.size * board.size);
    for &from in board.friendly_positions() {
        generate_slides(board, from, &mut moves);
    }
    moves
}

fn generate_slides(board: &Board, from: Position, moves: &mut Vec<Move>) {
    for direction in Direction::orthogonal() {
        let mut current = from.offset(direction, board.size);
        while let Some(to) = current {
            if board.square(to).is_some() {
                break;
            }
            moves.push(Move::new(from, to));
            current = to.offset(direction, board.size);
        }
    }
}
