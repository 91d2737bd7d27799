use crate::board::direction::Direction;
use crate::board::position::Position;
use crate::board::{Board, Side};
use rand::Rng;

// Terminal positions score far below anything the positional terms can
// produce; adding the depth makes shallower losses worse, so search prefers
// delaying a loss and forcing a win sooner.
const TERMINAL_EVAL: f64 = -100.0;
const JITTER: f64 = 0.1;

/// Static evaluation from the perspective of the side to move: material plus
/// positional bonuses per piece, with a small random jitter to break ties in
/// engine-vs-engine play. The sign is strictly turn-relative; the negamax
/// recursion's negation carries the opponent's perspective.
pub fn evaluate<R: Rng>(board: &Board, depth: u32, rng: &mut R) -> f64 {
    if board.is_terminal() {
        return TERMINAL_EVAL + f64::from(depth);
    }
    let mut eval = 0.0;
    for &position in &board.piece_positions[Side::White] {
        eval += 1.0 + position_bonus(board, Side::White, position);
    }
    for &position in &board.piece_positions[Side::Black] {
        eval -= 1.0 + position_bonus(board, Side::Black, position);
    }
    board.side.factor() * eval + rng.gen::<f64>() * JITTER
}

/// Cheaper variant: material and advancement only.
pub fn evaluate_fast<R: Rng>(board: &Board, depth: u32, rng: &mut R) -> f64 {
    if board.is_terminal() {
        return TERMINAL_EVAL + f64::from(depth);
    }
    let mut eval = 0.0;
    for &position in &board.piece_positions[Side::White] {
        eval += 1.0 + advancement(board, Side::White, position) * 0.1;
    }
    for &position in &board.piece_positions[Side::Black] {
        eval -= 1.0 + advancement(board, Side::Black, position) * 0.1;
    }
    board.side.factor() * eval + rng.gen::<f64>() * JITTER
}

fn position_bonus(board: &Board, side: Side, position: Position) -> f64 {
    let mut bonus = 0.0;
    // Adjacent opponents are capture chances.
    for direction in Direction::orthogonal() {
        if let Some(adjacent) = position.offset(direction, board.size) {
            if board.square(adjacent) == Some(side.enemy()) {
                bonus += 0.15;
            }
        }
    }
    // Diagonal friends defend each other.
    for direction in Direction::diagonal() {
        if let Some(adjacent) = position.offset(direction, board.size) {
            if board.square(adjacent) == Some(side) {
                bonus += 0.05;
            }
        }
    }
    let last = board.size - 1;
    if (position.row == 0 || position.row == last) && (position.col == 0 || position.col == last) {
        bonus += 0.09;
    }
    bonus + advancement(board, side, position) * 0.05
}

/// Rows advanced from the home rank, halved.
fn advancement(board: &Board, side: Side, position: Position) -> f64 {
    let home = side.home_row(board.size);
    (position.row.abs_diff(home) as f64) / 2.0
}
