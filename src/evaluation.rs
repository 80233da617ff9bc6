// src/evaluation.rs
//! Static evaluation: material plus piece-square tables, White-positive.
//!
//! Tables are written from White's side of the board with row 0 = rank 8, which matches the board
//! layout directly. Black reads the same table with rows mirrored, so "advanced" means the same
//! thing for both colors.

use lazy_static::lazy_static;

use crate::board::Board;
use crate::types::{Color, Piece, PieceType};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
/// Sentinel weight; kings are never captured in reachable play.
pub const KING_VALUE: i32 = 20000;

pub fn piece_value(kind: PieceType) -> i32 {
    match kind {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

// --- Piece-Square Tables (White's view, row 0 = rank 8) ---

#[rustfmt::skip]
const PAWN_TABLE: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
const ROOK_TABLE: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,  10,  10,  10,  10,  10,  10,   5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [  0,   0,   0,   5,   5,   0,   0,   0],
];

#[rustfmt::skip]
const QUEEN_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [  0,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

#[rustfmt::skip]
const KING_TABLE: [[i32; 8]; 8] = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [ 20,  30,  10,   0,   0,  10,  30,  20],
];

const TABLES: [&[[i32; 8]; 8]; 6] = [
    &PAWN_TABLE, &KNIGHT_TABLE, &BISHOP_TABLE, &ROOK_TABLE, &QUEEN_TABLE, &KING_TABLE,
];

lazy_static! {
    // [color][piece_type][row][col], material folded in and Black rows mirrored
    static ref SQUARE_SCORES: [[[[i32; 8]; 8]; 6]; 2] = compute_square_scores();
}

fn compute_square_scores() -> [[[[i32; 8]; 8]; 6]; 2] {
    let mut scores = [[[[0; 8]; 8]; 6]; 2];
    for kind in [PieceType::Pawn, PieceType::Knight, PieceType::Bishop, PieceType::Rook, PieceType::Queen, PieceType::King] {
        let table = TABLES[kind.index()];
        for row in 0..8 {
            for col in 0..8 {
                let white = piece_value(kind) + table[row][col];
                let black = piece_value(kind) + table[7 - row][col];
                scores[Color::White.index()][kind.index()][row][col] = white;
                scores[Color::Black.index()][kind.index()][row][col] = black;
            }
        }
    }
    scores
}

/// Material plus positional worth of `piece` standing on `(row, col)`, unsigned.
#[inline]
pub fn square_score(piece: Piece, row: u8, col: u8) -> i32 {
    SQUARE_SCORES[piece.color.index()][piece.kind.index()][row as usize][col as usize]
}

/// Static score of `board`; positive favours White.
pub fn evaluate(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(pos, piece)| {
            let score = square_score(piece, pos.row, pos.col);
            match piece.color {
                Color::White => score,
                Color::Black => -score,
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legal::apply_move;
    use crate::types::{Move, Position};

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(evaluate(&Board::initial()), 0);
        assert_eq!(evaluate(&Board::empty()), 0);
    }

    #[test]
    fn missing_queen_swings_score() {
        let board = Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").expect("parses");
        assert!(evaluate(&board) >= QUEEN_VALUE - 20, "White is up a queen");

        let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR").expect("parses");
        assert!(evaluate(&board) <= -(QUEEN_VALUE - 20), "Black is up a queen");
    }

    #[test]
    fn mirrored_position_negates_score() {
        let white = Board::from_fen("4k3/8/8/8/3N4/8/8/4K3").expect("parses");
        let black = Board::from_fen("4k3/8/8/3n4/8/8/8/4K3").expect("parses");
        assert_eq!(evaluate(&white), -evaluate(&black));
        assert!(evaluate(&white) > KNIGHT_VALUE);
    }

    #[test]
    fn central_pawn_push_is_rewarded() {
        let board = Board::initial();
        let from = Position::from_algebraic("e2").expect("square");
        let to = Position::from_algebraic("e4").expect("square");
        let push = Move::on_board(&board, from, to, None).expect("pawn on e2");
        assert!(evaluate(&apply_move(&board, &push)) > 0);
    }

    #[test]
    fn square_score_mirrors_rows_for_black() {
        let white_pawn = Piece::new(PieceType::Pawn, Color::White);
        let black_pawn = Piece::new(PieceType::Pawn, Color::Black);
        assert_eq!(square_score(white_pawn, 1, 0), PAWN_VALUE + 50);
        assert_eq!(square_score(black_pawn, 6, 0), PAWN_VALUE + 50);
    }
}
