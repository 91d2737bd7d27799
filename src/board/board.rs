use crate::board::direction::Direction;
use crate::board::piece_move::Move;
use crate::board::position::Position;
use crate::errors::EngineError;
use crate::move_generation::generate_moves;
use arrayvec::ArrayVec;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;
use std::ops::{Index, IndexMut};

// Column notation uses a single letter, which caps the board dimension.
pub const MIN_BOARD_SIZE: usize = 4;
pub const MAX_BOARD_SIZE: usize = 26;

pub type Square = Option<Side>;

/// Hasami Shogi position: an N-by-N grid plus per-side position sets that
/// always mirror the grid occupancy exactly. Mutated in place through
/// `make_move`/`unmake_move`; search never clones it.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub size: usize,
    pub squares: Vec<Square>,
    pub side: Side,
    pub ply: u32,
    pub piece_positions: [BTreeSet<Position>; 2],
    pub captures: HashMap<u32, Vec<Position>>,
}

impl Board {
    pub fn new(size: usize) -> Result<Self, EngineError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(EngineError::InvalidSize(size));
        }
        let mut board = Self::empty(size);
        for col in 0..size {
            board.place(Position::new(0, col), Side::White);
            board.place(Position::new(size - 1, col), Side::Black);
        }
        Ok(board)
    }

    /// Builds an arbitrary position from a textual diagram, one line per row
    /// starting with row 0: 'O' for White, 'X' for Black, '.' for empty.
    pub fn from_diagram(diagram: &str, side: Side) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidDiagram(diagram.to_string());
        let rows: Vec<&str> = diagram.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
        let size = rows.len();
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(EngineError::InvalidSize(size));
        }
        let mut board = Self::empty(size);
        board.side = side;
        for (row, row_string) in rows.iter().enumerate() {
            if row_string.chars().count() != size {
                return Err(invalid());
            }
            for (col, square_char) in row_string.chars().enumerate() {
                match square_char {
                    'O' | 'o' => board.place(Position::new(row, col), Side::White),
                    'X' | 'x' => board.place(Position::new(row, col), Side::Black),
                    '.' => {}
                    _ => return Err(invalid()),
                }
            }
        }
        Ok(board)
    }

    fn empty(size: usize) -> Self {
        Self {
            size,
            squares: vec![None; size * size],
            side: Side::White,
            ply: 0,
            piece_positions: [BTreeSet::new(), BTreeSet::new()],
            captures: HashMap::new(),
        }
    }

    fn place(&mut self, position: Position, side: Side) {
        let index = self.index(position);
        self.squares[index] = Some(side);
        self.piece_positions[side].insert(position);
    }

    #[inline(always)]
    fn index(&self, position: Position) -> usize {
        position.row * self.size + position.col
    }

    /// Checked accessor for square contents; rule logic stays in bounds by
    /// construction and indexes the grid directly.
    pub fn at(&self, position: Position) -> Result<Square, EngineError> {
        if position.row >= self.size || position.col >= self.size {
            return Err(EngineError::OutOfRange(position));
        }
        Ok(self.squares[self.index(position)])
    }

    /// In-bounds-only square lookup.
    #[inline(always)]
    pub fn square(&self, position: Position) -> Square {
        self.squares[self.index(position)]
    }

    pub fn piece_count(&self, side: Side) -> usize {
        self.piece_positions[side].len()
    }

    pub fn friendly_positions(&self) -> &BTreeSet<Position> {
        &self.piece_positions[self.side]
    }

    /// A side below two pieces has lost.
    pub fn is_terminal(&self) -> bool {
        self.piece_count(Side::White) < 2 || self.piece_count(Side::Black) < 2
    }

    /// Applies a move, resolves captures from the destination, flips the side
    /// to move and advances the ply counter. The move must come from the
    /// current legal move list; the engine path relies on that precondition
    /// and does not re-validate (see `try_make_move` for the checked entry).
    pub fn make_move(&mut self, mov: Move) {
        let from = self.index(mov.from);
        let to = self.index(mov.to);
        self.squares[to] = self.squares[from];
        self.squares[from] = None;
        self.resolve_captures(mov.to);
        let positions = &mut self.piece_positions[self.side];
        positions.remove(&mov.from);
        positions.insert(mov.to);
        self.side = self.side.enemy();
        self.ply += 1;
    }

    /// Checked variant for externally supplied moves (the interactive layer).
    pub fn try_make_move(&mut self, mov: Move) -> Result<(), EngineError> {
        if !generate_moves(self).contains(&mov) {
            return Err(EngineError::IllegalMove(mov));
        }
        self.make_move(mov);
        Ok(())
    }

    /// Exact inverse of `make_move`. Must be called with the most recently
    /// applied move; undo is strictly LIFO.
    pub fn unmake_move(&mut self, mov: Move) {
        self.ply -= 1;
        self.side = self.side.enemy();
        debug_assert_eq!(self.square(mov.to), Some(self.side), "unmake_move out of order: {mov}");
        let positions = &mut self.piece_positions[self.side];
        positions.remove(&mov.to);
        positions.insert(mov.from);
        if let Some(captured) = self.captures.remove(&self.ply) {
            // Captures always removed opponent pieces, so the color to
            // restore is unambiguous.
            let opponent = self.side.enemy();
            for position in captured {
                let index = self.index(position);
                self.squares[index] = Some(opponent);
                self.piece_positions[opponent].insert(position);
            }
        }
        let from = self.index(mov.from);
        let to = self.index(mov.to);
        self.squares[from] = self.squares[to];
        self.squares[to] = None;
    }

    /// Sandwich capture resolution from the landing square. Each orthogonal
    /// direction is scanned independently: consecutive opponent pieces are
    /// buffered and confirmed when a friendly piece closes the sandwich; an
    /// empty square or the board edge discards the buffer. A friendly piece
    /// met before any opponent does not stop the walk. Captured positions are
    /// recorded under the current ply so the move can be undone precisely.
    fn resolve_captures(&mut self, landing: Position) {
        let opponent = self.side.enemy();
        let mut captured = Vec::new();
        for direction in Direction::orthogonal() {
            let mut buffer: ArrayVec<Position, MAX_BOARD_SIZE> = ArrayVec::new();
            let mut current = landing.offset(direction, self.size);
            while let Some(position) = current {
                match self.square(position) {
                    None => break,
                    Some(side) if side == opponent => buffer.push(position),
                    Some(_) if !buffer.is_empty() => {
                        captured.extend(buffer.drain(..));
                        break;
                    }
                    Some(_) => {}
                }
                current = position.offset(direction, self.size);
            }
        }
        if captured.is_empty() {
            return;
        }
        for &position in &captured {
            let index = self.index(position);
            self.squares[index] = None;
            self.piece_positions[opponent].remove(&position);
        }
        self.captures.insert(self.ply, captured);
    }

    /// The position-set/grid mirror invariant, used by tests.
    pub fn is_consistent(&self) -> bool {
        for side in [Side::White, Side::Black] {
            let on_grid = self
                .squares
                .iter()
                .filter(|square| **square == Some(side))
                .count();
            if on_grid != self.piece_count(side) {
                return false;
            }
            for position in &self.piece_positions[side] {
                if self.square(*position) != Some(side) {
                    return false;
                }
            }
        }
        self.piece_positions[Side::White].is_disjoint(&self.piece_positions[Side::Black])
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Row labels go to two digits past a 9-by-9 board.
        let label_width = if self.size < 10 { 1 } else { 2 };
        let margin = " ".repeat(label_width + 1);
        let separator = format!("{margin}{}+", "+---".repeat(self.size));
        for row in (0..self.size).rev() {
            writeln!(f, "{separator}")?;
            write!(f, "{:>label_width$} ", row + 1)?;
            for col in 0..self.size {
                match self.square(Position::new(row, col)) {
                    Some(Side::White) => write!(f, "| O ")?,
                    Some(Side::Black) => write!(f, "| X ")?,
                    None => write!(f, "|   ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{separator}")?;
        write!(f, "{margin}")?;
        for col in 0..self.size {
            write!(f, "  {} ", (b'A' + col as u8) as char)?;
        }
        writeln!(f)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, derive_more::Display)]
#[repr(u8)]
pub enum Side {
    White = 0,
    Black,
}

impl Side {
    pub fn enemy(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
    /// Evaluation sign: the heuristic sums a White-positive total and this
    /// factor converts it to the side to move's perspective.
    pub fn factor(&self) -> f64 {
        match self {
            Side::White => 1.0,
            Side::Black => -1.0,
        }
    }
    /// The rank a side's pieces start on; advancement is measured from here.
    pub fn home_row(&self, size: usize) -> usize {
        match self {
            Side::White => 0,
            Side::Black => size - 1,
        }
    }
}

impl<T, const N: usize> Index<Side> for [T; N] {
    type Output = T;

    fn index(&self, index: Side) -> &Self::Output {
        &self[index as usize]
    }
}
impl<T, const N: usize> IndexMut<Side> for [T; N] {
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        &mut self[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mov(from: (usize, usize), to: (usize, usize)) -> Move {
        Move::new(Position::new(from.0, from.1), Position::new(to.0, to.1))
    }

    #[test]
    fn initial_setup_fills_home_ranks() {
        let board = Board::new(9).unwrap();
        assert_eq!(board.piece_count(Side::White), 9);
        assert_eq!(board.piece_count(Side::Black), 9);
        assert_eq!(board.side, Side::White);
        assert_eq!(board.ply, 0);
        for col in 0..9 {
            assert_eq!(board.square(Position::new(0, col)), Some(Side::White));
            assert_eq!(board.square(Position::new(8, col)), Some(Side::Black));
        }
        for row in 1..8 {
            for col in 0..9 {
                assert_eq!(board.square(Position::new(row, col)), None);
            }
        }
        assert!(board.is_consistent());
    }

    #[test]
    fn rejects_unsupported_sizes() {
        assert_eq!(Board::new(3).unwrap_err(), EngineError::InvalidSize(3));
        assert_eq!(Board::new(27).unwrap_err(), EngineError::InvalidSize(27));
        assert!(Board::new(4).is_ok());
        assert!(Board::new(26).is_ok());
    }

    #[test]
    fn at_rejects_off_board_coordinates() {
        let board = Board::new(9).unwrap();
        assert_eq!(board.at(Position::new(4, 4)).unwrap(), None);
        assert_eq!(board.at(Position::new(0, 0)).unwrap(), Some(Side::White));
        assert!(matches!(board.at(Position::new(9, 0)), Err(EngineError::OutOfRange(_))));
        assert!(matches!(board.at(Position::new(0, 9)), Err(EngineError::OutOfRange(_))));
    }

    #[test]
    fn make_unmake_restores_every_field() {
        let original = Board::new(9).unwrap();
        let mut board = Board::new(9).unwrap();
        for mov in generate_moves(&board) {
            board.make_move(mov);
            assert_eq!(board.ply, 1);
            assert_eq!(board.side, Side::Black);
            board.unmake_move(mov);
            assert_eq!(original, board);
            assert!(board.is_consistent());
        }
    }

    #[test]
    fn make_unmake_restores_captured_pieces() {
        let diagram = "\
            O....\n\
            .....\n\
            .XXO.\n\
            .....\n\
            ..X..";
        let original = Board::from_diagram(diagram, Side::White).unwrap();
        let mut board = original.clone();
        let capture = mov((0, 0), (2, 0));
        board.make_move(capture);
        assert_eq!(board.piece_count(Side::Black), 1);
        board.unmake_move(capture);
        assert_eq!(original, board);
        assert!(board.captures.is_empty());
        assert!(board.is_consistent());
    }

    #[test]
    fn sandwich_capture_removes_flanked_run() {
        // White slides A1-A3 and flanks both Black pieces against D3.
        let diagram = "\
            O....\n\
            .....\n\
            .XXO.\n\
            .....\n\
            ..X..";
        let mut board = Board::from_diagram(diagram, Side::White).unwrap();
        board.make_move(mov((0, 0), (2, 0)));
        assert_eq!(board.square(Position::new(2, 1)), None);
        assert_eq!(board.square(Position::new(2, 2)), None);
        assert_eq!(board.square(Position::new(2, 3)), Some(Side::White));
        assert_eq!(board.piece_count(Side::Black), 1);
        assert_eq!(board.captures[&0], vec![Position::new(2, 1), Position::new(2, 2)]);
        assert!(board.is_consistent());
    }

    #[test]
    fn captures_combine_across_directions() {
        let diagram = "\
            ..O..\n\
            ..X..\n\
            ...XO\n\
            .....\n\
            ..O..";
        let mut board = Board::from_diagram(diagram, Side::White).unwrap();
        board.make_move(mov((4, 2), (2, 2)));
        assert_eq!(board.piece_count(Side::Black), 0);
        assert_eq!(board.square(Position::new(1, 2)), None);
        assert_eq!(board.square(Position::new(2, 3)), None);
        assert!(board.is_terminal());
        assert!(board.is_consistent());
    }

    #[test]
    fn no_capture_without_closing_flanker() {
        // The Black run toward the east edge is never closed.
        let diagram = "\
            O....\n\
            .....\n\
            .XX..\n\
            .....\n\
            ..X..";
        let mut board = Board::from_diagram(diagram, Side::White).unwrap();
        board.make_move(mov((0, 0), (2, 0)));
        assert_eq!(board.piece_count(Side::Black), 3);
        assert!(board.captures.is_empty());
    }

    #[test]
    fn own_pieces_are_never_captured() {
        let diagram = "\
            O....\n\
            .....\n\
            .OO..\n\
            .....\n\
            XX...";
        let mut board = Board::from_diagram(diagram, Side::White).unwrap();
        board.make_move(mov((0, 0), (2, 0)));
        assert_eq!(board.piece_count(Side::White), 4);
        assert_eq!(board.piece_count(Side::Black), 2);
        assert!(board.captures.is_empty());
    }

    #[test]
    fn capture_scan_walks_past_leading_friendly_piece() {
        // B3 is friendly with an empty buffer, so the walk continues and the
        // C3 opponent is still flanked by D3.
        let diagram = "\
            O....\n\
            .....\n\
            .OXO.\n\
            .....\n\
            XX...";
        let mut board = Board::from_diagram(diagram, Side::White).unwrap();
        board.make_move(mov((0, 0), (2, 0)));
        assert_eq!(board.square(Position::new(2, 2)), None);
        assert_eq!(board.captures[&0], vec![Position::new(2, 2)]);
    }

    #[test]
    fn terminal_when_either_side_drops_below_two() {
        let two_each = "\
            O..O\n\
            ....\n\
            ....\n\
            X..X";
        assert!(!Board::from_diagram(two_each, Side::White).unwrap().is_terminal());
        let lone_black = "\
            O..O\n\
            ....\n\
            ....\n\
            X...";
        assert!(Board::from_diagram(lone_black, Side::White).unwrap().is_terminal());
        let lone_white = "\
            O...\n\
            ....\n\
            ....\n\
            X..X";
        assert!(Board::from_diagram(lone_white, Side::Black).unwrap().is_terminal());
    }

    #[test]
    fn try_make_move_rejects_illegal_moves() {
        let mut board = Board::new(9).unwrap();
        let original = board.clone();
        // Diagonal jump.
        let illegal = mov((0, 0), (1, 1));
        assert_eq!(board.try_make_move(illegal).unwrap_err(), EngineError::IllegalMove(illegal));
        // Sliding through an occupied square.
        let through = mov((0, 0), (0, 2));
        assert!(board.try_make_move(through).is_err());
        assert_eq!(original, board);
        assert!(board.try_make_move(mov((0, 0), (4, 0))).is_ok());
    }

    #[test]
    fn diagram_parsing_rejects_bad_input() {
        assert!(matches!(
            Board::from_diagram("O..\n...\n..X", Side::White),
            Err(EngineError::InvalidSize(3))
        ));
        assert!(matches!(
            Board::from_diagram("O...\n....\n....\nX?..", Side::White),
            Err(EngineError::InvalidDiagram(_))
        ));
        assert!(matches!(
            Board::from_diagram("O...\n..\n....\nX...", Side::White),
            Err(EngineError::InvalidDiagram(_))
        ));
    }

    #[test]
    fn display_keeps_the_grid_aligned_for_two_digit_rows() {
        for size in [4, 9, 12, 26] {
            let rendered = Board::new(size).unwrap().to_string();
            // Every frame line starts the grid at the same column, whatever
            // the row label width.
            let starts: BTreeSet<usize> = rendered
                .lines()
                .filter_map(|line| line.find(|c| c == '+' || c == '|'))
                .collect();
            assert_eq!(starts.len(), 1, "size {size}:\n{rendered}");
        }
    }

    #[test]
    fn opponent_mapping_is_an_involution() {
        for side in [Side::White, Side::Black] {
            assert_eq!(side.enemy().enemy(), side);
            assert_ne!(side.enemy(), side);
        }
    }
}
