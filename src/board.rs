// src/board.rs
//! 8x8 mailbox board and FEN piece-placement parsing/serialization.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FenError;
use crate::types::{Color, Piece, PieceType, Position};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook, PieceType::Knight, PieceType::Bishop, PieceType::Queen,
    PieceType::King, PieceType::Bishop, PieceType::Knight, PieceType::Rook,
];

lazy_static! {
    static ref INITIAL_BOARD: Board = compute_initial_board();
}

fn compute_initial_board() -> Board {
    let mut board = Board::empty();
    for color in [Color::White, Color::Black] {
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.set(Position::new(color.back_row(), col as u8), Some(Piece::new(*kind, color)));
            board.set(Position::new(color.pawn_row(), col as u8), Some(Piece::new(PieceType::Pawn, color)));
        }
    }
    board
}

/// Grid of optional pieces, indexed `[row][col]` with row 0 = rank 8.
///
/// Boards are treated as immutable snapshots by the engine: producing the next position always
/// yields a new `Board` (see [`crate::legal::apply_move`]). Arbitrary layouts are allowed, including
/// ones with zero or several kings per color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board { squares: [[None; 8]; 8] }
    }

    /// The standard starting position.
    pub fn initial() -> Self {
        INITIAL_BOARD.clone()
    }

    /// Parses the piece-placement field of a FEN string. Any further fields (side to move,
    /// castling, ...) are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let placement = fen.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount { found: ranks.len() });
        }

        let mut board = Board::empty();
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank_number = 8 - row as u8;
            let mut col = 0usize;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    if run == 0 || run > 8 {
                        return Err(FenError::UnknownCharacter { rank: rank_number, found: c });
                    }
                    col += run as usize;
                } else if let Some(piece) = Piece::from_char(c) {
                    if col < 8 {
                        board.squares[row][col] = Some(piece);
                    }
                    col += 1;
                } else {
                    return Err(FenError::UnknownCharacter { rank: rank_number, found: c });
                }
                if col > 8 {
                    return Err(FenError::RankWidth { rank: rank_number, columns: col });
                }
            }
            if col != 8 {
                return Err(FenError::RankWidth { rank: rank_number, columns: col });
            }
        }
        Ok(board)
    }

    /// Serializes the placement field; the inverse of [`Board::from_fen`].
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(72);
        for (row, cells) in self.squares.iter().enumerate() {
            if row > 0 { fen.push('/'); }
            let mut empty_run = 0;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if empty_run > 0 {
                            fen.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 { fen.push_str(&empty_run.to_string()); }
        }
        fen
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.is_on_board() { return None; }
        self.squares[pos.row as usize][pos.col as usize]
    }

    #[inline]
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_on_board() {
            self.squares[pos.row as usize][pos.col as usize] = piece;
        }
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Occupied squares in row-major scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for (row, cells) in self.squares.iter().enumerate() {
            write!(f, "{} | ", 8 - row)?;
            for cell in cells {
                match cell {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    a b c d e f g h")
    }
}
