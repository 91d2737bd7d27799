use crate::board::position::Position;
use crate::errors::EngineError;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::iter::Peekable;
use std::str::Chars;

/// A slide from one square to another. The attached score is an annotation
/// filled in by search; two moves are equal iff their squares match.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub score: Option<f64>,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Move {
        Move { from, to, score: None }
    }
    pub fn with_score(self, score: f64) -> Move {
        Move { score: Some(score), ..self }
    }
    /// Parses "A1-B1" style notation: column letter plus 1-origin row number
    /// for each square, with an optional cosmetic 'x'/'X'/'-' separator.
    /// Column letters are case-insensitive and rows may have two digits.
    pub fn from_notation(text: &str, board_size: usize) -> Result<Move, EngineError> {
        let trimmed = text.trim();
        let mut chars = trimmed.chars().peekable();
        let from = parse_square(&mut chars, trimmed, board_size)?;
        if matches!(chars.peek(), Some(&('x' | 'X' | '-'))) {
            chars.next();
        }
        let to = parse_square(&mut chars, trimmed, board_size)?;
        if chars.next().is_some() {
            return Err(EngineError::InvalidNotation(trimmed.to_string()));
        }
        Ok(Move::new(from, to))
    }
}

fn parse_square(chars: &mut Peekable<Chars>, text: &str, board_size: usize) -> Result<Position, EngineError> {
    let invalid = || EngineError::InvalidNotation(text.to_string());
    let col_char = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() {
        return Err(invalid());
    }
    let col = (col_char as u8 - b'A') as usize;

    let mut row_digits = String::new();
    while let Some(digit) = chars.peek().copied().filter(|char| char.is_ascii_digit()) {
        row_digits.push(digit);
        chars.next();
    }
    let row = row_digits.parse::<usize>().map_err(|_| invalid())?;
    if row == 0 || row > board_size || col >= board_size {
        return Err(invalid());
    }
    Ok(Position::new(row - 1, col))
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
