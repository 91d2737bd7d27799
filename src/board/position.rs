use crate::board::direction::Direction;
use std::fmt::Display;

/// A 0-indexed (row, column) square coordinate. Ordering is by (row, col),
/// which gives the deterministic iteration order move generation relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }
    /// One step in `direction`, or `None` when that square is off a
    /// `size`-by-`size` board.
    pub fn offset(&self, direction: Direction, size: usize) -> Option<Position> {
        let (row_delta, col_delta) = direction.value();
        let row = self.row as i32 + row_delta;
        let col = self.col as i32 + col_delta;
        if row < 0 || col < 0 || row >= size as i32 || col >= size as i32 {
            None
        } else {
            Some(Position::new(row as usize, col as usize))
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row + 1)
    }
}
