#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Direction {
    North,
    South,
    West,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

const DIRECTION_VALUES: [(i32, i32); 8] = [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, -1), (-1, 1), (1, -1), (1, 1)];

impl Direction {
    pub const fn value(self) -> (i32, i32) {
        DIRECTION_VALUES[self as usize]
    }
    // Order matters: move generation emits slides in this direction order.
    pub const fn orthogonal() -> [Direction; 4] {
        [Direction::North, Direction::South, Direction::West, Direction::East]
    }
    pub const fn diagonal() -> [Direction; 4] {
        [Direction::NorthWest, Direction::NorthEast, Direction::SouthWest, Direction::SouthEast]
    }
}
