// src/types.rs
//! Value types shared by every layer of the engine: colors, pieces, squares and moves.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::Board;

// --- Enums and Basic Structs ---

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color { White, Black }

impl Color {
    pub fn opponent(&self) -> Color {
        match self { Color::White => Color::Black, Color::Black => Color::White }
    }

    /// Row delta of a pawn advance. Row 0 is rank 8, so White moves towards lower rows.
    pub fn forward(&self) -> i8 {
        match self { Color::White => -1, Color::Black => 1 }
    }

    /// Row holding this color's pieces in the starting position.
    pub fn back_row(&self) -> u8 {
        match self { Color::White => 7, Color::Black => 0 }
    }

    pub fn pawn_row(&self) -> u8 {
        match self { Color::White => 6, Color::Black => 1 }
    }

    /// Row a pawn of this color promotes on.
    pub fn promotion_row(&self) -> u8 {
        self.opponent().back_row()
    }

    pub(crate) fn index(&self) -> usize {
        match self { Color::White => 0, Color::Black => 1 }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceType { Pawn, Knight, Bishop, Rook, Queen, King }

impl PieceType {
    pub(crate) fn index(&self) -> usize {
        match self {
            PieceType::Pawn => 0, PieceType::Knight => 1, PieceType::Bishop => 2,
            PieceType::Rook => 3, PieceType::Queen => 4, PieceType::King => 5,
        }
    }

    /// Piece types a pawn may promote to, in generation order.
    pub const PROMOTIONS: [PieceType; 4] = [PieceType::Queen, PieceType::Knight, PieceType::Rook, PieceType::Bishop];

    pub fn is_promotion_target(&self) -> bool {
        !matches!(self, PieceType::Pawn | PieceType::King)
    }

    pub fn to_char(&self) -> char {
        match self {
            PieceType::Pawn => 'p', PieceType::Knight => 'n', PieceType::Bishop => 'b',
            PieceType::Rook => 'r', PieceType::Queen => 'q', PieceType::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn), 'n' => Some(PieceType::Knight), 'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook), 'q' => Some(PieceType::Queen), 'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Self { Piece { kind, color } }

    /// Parses a FEN piece letter; uppercase is White.
    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        PieceType::from_char(c).map(|kind| Piece::new(kind, color))
    }

    pub fn to_char(&self) -> char {
        let symbol = self.kind.to_char();
        match self.color {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

// --- Squares ---

/// A board coordinate. Row 0 is rank 8, column 0 is the a-file.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self { Position { row, col } }

    /// Offsets this square, returning `None` when the result leaves the board.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Position::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// All 64 squares in row-major order, starting at a8.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Position::new(row, col)))
    }

    /// Parses algebraic notation such as `e4`.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() { return None; }
        let col = match file_char { 'a'..='h' => file_char as u8 - b'a', _ => return None };
        let rank = match rank_char { '1'..='8' => rank_char as u8 - b'1', _ => return None };
        Some(Position::new(7 - rank, col))
    }

    pub fn to_algebraic(&self) -> String {
        if !self.is_on_board() { return "??".to_string(); }
        format!("{}{}", (b'a' + self.col) as char, (b'8' - self.row) as char)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

// --- Move Representation ---

/// A fully described transition. The mover and any captured piece are stored by value, so a
/// `Move` only makes sense next to the board it was generated against.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub fn new(from: Position, to: Position, piece: Piece, captured: Option<Piece>, promotion: Option<PieceType>) -> Self {
        Move { from, to, piece, captured, promotion }
    }

    /// Builds a move from whatever occupies `from` and `to` on `board`.
    /// Returns `None` when `from` is empty.
    pub fn on_board(board: &Board, from: Position, to: Position, promotion: Option<PieceType>) -> Option<Self> {
        let piece = board.get(from)?;
        Some(Move::new(from, to, piece, board.get(to), promotion))
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// A king moving two columns along its row.
    pub fn is_castling(&self) -> bool {
        self.piece.kind == PieceType::King
            && self.from.row == self.to.row
            && self.to.col.abs_diff(self.from.col) == 2
    }

    /// Coordinate notation, e.g. `e2e4` or `e7e8q`.
    pub fn to_coordinate(&self) -> String {
        format!("{}{}{}",
            self.from.to_algebraic(),
            self.to.to_algebraic(),
            self.promotion.map_or(String::new(), |p| p.to_char().to_string()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_castling() {
            return write!(f, "{}", if self.to.col > self.from.col { "O-O" } else { "O-O-O" });
        }
        write!(f, "{}", self.to_coordinate())
    }
}
