// src/rules.rs
//! Pseudo-legal movement rules per piece type.
//!
//! These functions know piece geometry, path blocking and the castling layout, but nothing about
//! whether a move leaves the mover's king in check. That is layered on by [`crate::legal`].

use crate::board::Board;
use crate::types::{Color, Move, PieceType, Position};

// Castling layout (columns on the mover's back row)
pub const KING_START_COL: u8 = 4;
pub const KINGSIDE_ROOK_COL: u8 = 7;
pub const QUEENSIDE_ROOK_COL: u8 = 0;
pub const KINGSIDE_KING_DEST_COL: u8 = 6;
pub const QUEENSIDE_KING_DEST_COL: u8 = 2;
pub const KINGSIDE_ROOK_DEST_COL: u8 = 5;
pub const QUEENSIDE_ROOK_DEST_COL: u8 = 3;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    ( 1, -2), ( 1, 2), ( 2, -1), ( 2, 1),
];

/// Rook squares for a castling move: `(rook_from, rook_to)`.
/// Returns `None` unless `mv` is a two-column king move.
pub fn castling_rook_squares(mv: &Move) -> Option<(Position, Position)> {
    if !mv.is_castling() { return None; }
    let row = mv.from.row;
    if mv.to.col > mv.from.col {
        Some((Position::new(row, KINGSIDE_ROOK_COL), Position::new(row, KINGSIDE_ROOK_DEST_COL)))
    } else {
        Some((Position::new(row, QUEENSIDE_ROOK_COL), Position::new(row, QUEENSIDE_ROOK_DEST_COL)))
    }
}

/// True when every square strictly between `from` and `to` is empty.
/// Squares that are not on a common rank, file or diagonal are never "clear".
pub fn is_path_clear(board: &Board, from: Position, to: Position) -> bool {
    let d_row = to.row as i8 - from.row as i8;
    let d_col = to.col as i8 - from.col as i8;
    if (d_row == 0 && d_col == 0) || (d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs()) {
        return false;
    }

    let (step_row, step_col) = (d_row.signum(), d_col.signum());
    let mut current = from;
    loop {
        current = match current.offset(step_row, step_col) {
            Some(next) => next,
            None => return false,
        };
        if current == to { return true; }
        if !board.is_empty(current) { return false; }
    }
}

/// Checks movement geometry, blocking and capture eligibility for `mv` on `board`.
///
/// With `ignore_check` set the question becomes "could this piece reach `to`", as asked by the
/// attack oracle: landing on a friendly piece is allowed, a pawn's diagonal step does not need a
/// victim, castling is never considered and promotion bookkeeping is skipped. Otherwise
/// `mv.captured` must name exactly what stands on `to`.
pub fn is_pseudo_legal_move(board: &Board, mv: &Move, ignore_check: bool) -> bool {
    if !mv.from.is_on_board() || !mv.to.is_on_board() || mv.from == mv.to {
        return false;
    }
    if board.get(mv.from) != Some(mv.piece) {
        return false;
    }

    let color = mv.piece.color;
    if !ignore_check {
        let target = board.get(mv.to);
        if target.is_some_and(|piece| piece.color == color) { return false; } // Self-capture
        if mv.captured != target { return false; } // Capture record must match the board
        if !is_promotion_consistent(mv) { return false; }
    }

    match mv.piece.kind {
        PieceType::Pawn => is_pawn_move(board, mv.from, mv.to, color, ignore_check),
        PieceType::Knight => is_knight_move(mv.from, mv.to),
        PieceType::Bishop => is_bishop_move(board, mv.from, mv.to),
        PieceType::Rook => is_rook_move(board, mv.from, mv.to),
        PieceType::Queen => is_bishop_move(board, mv.from, mv.to) || is_rook_move(board, mv.from, mv.to),
        PieceType::King => is_king_move(board, mv.from, mv.to, color, ignore_check),
    }
}

/// A pawn landing on its last row must name a promotion piece; nothing else may.
fn is_promotion_consistent(mv: &Move) -> bool {
    let reaches_last_row = mv.piece.kind == PieceType::Pawn && mv.to.row == mv.piece.color.promotion_row();
    match mv.promotion {
        Some(kind) => reaches_last_row && kind.is_promotion_target(),
        None => !reaches_last_row,
    }
}

fn is_pawn_move(board: &Board, from: Position, to: Position, color: Color, ignore_check: bool) -> bool {
    let direction = color.forward();
    let d_row = to.row as i8 - from.row as i8;
    let d_col = to.col as i8 - from.col as i8;

    // Single step
    if d_col == 0 && d_row == direction {
        return board.is_empty(to);
    }

    // Double step from the home row
    if d_col == 0 && d_row == 2 * direction && from.row == color.pawn_row() {
        let intermediate = Position::new((from.row as i8 + direction) as u8, from.col);
        return board.is_empty(intermediate) && board.is_empty(to);
    }

    // Diagonal capture. No en passant.
    if d_col.abs() == 1 && d_row == direction {
        return ignore_check || board.get(to).is_some_and(|target| target.color != color);
    }

    false
}

fn is_knight_move(from: Position, to: Position) -> bool {
    let d_row = to.row as i8 - from.row as i8;
    let d_col = to.col as i8 - from.col as i8;
    KNIGHT_OFFSETS.contains(&(d_row, d_col))
}

fn is_bishop_move(board: &Board, from: Position, to: Position) -> bool {
    let d_row = (to.row as i8 - from.row as i8).abs();
    let d_col = (to.col as i8 - from.col as i8).abs();
    d_row == d_col && d_row > 0 && is_path_clear(board, from, to)
}

fn is_rook_move(board: &Board, from: Position, to: Position) -> bool {
    (from.row == to.row) != (from.col == to.col) && is_path_clear(board, from, to)
}

fn is_king_move(board: &Board, from: Position, to: Position, color: Color, ignore_check: bool) -> bool {
    let d_row = (to.row as i8 - from.row as i8).abs();
    let d_col = (to.col as i8 - from.col as i8).abs();
    if d_row <= 1 && d_col <= 1 {
        return true;
    }
    !ignore_check && d_row == 0 && d_col == 2 && is_castling_path_open(board, from, to, color)
}

/// King on its home square, same-color rook on the matching corner, nothing in between.
/// Attacked squares are not considered here.
fn is_castling_path_open(board: &Board, from: Position, to: Position, color: Color) -> bool {
    let row = color.back_row();
    if from != Position::new(row, KING_START_COL) || to.row != row {
        return false;
    }
    let rook_col = match to.col {
        KINGSIDE_KING_DEST_COL => KINGSIDE_ROOK_COL,
        QUEENSIDE_KING_DEST_COL => QUEENSIDE_ROOK_COL,
        _ => return false,
    };
    let rook_square = Position::new(row, rook_col);
    let has_rook = board
        .get(rook_square)
        .is_some_and(|rook| rook.kind == PieceType::Rook && rook.color == color);

    has_rook && is_path_clear(board, from, rook_square)
}
