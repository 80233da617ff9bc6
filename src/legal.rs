// src/legal.rs
//! Full legality: pseudo-legal moves that do not leave the mover's king in check.
//!
//! Legality is decided by simulating the move with [`apply_move`] and re-deriving check status on
//! the resulting board. That one rule covers pins, discovered checks and walking into check, so no
//! pin bookkeeping is kept.

use crate::attack::{is_check, is_square_attacked};
use crate::board::Board;
use crate::rules::{castling_rook_squares, is_pseudo_legal_move};
use crate::types::{Color, Move, Piece, PieceType, Position};

/// Checks whether `mv` is fully legal on `board`.
pub fn is_valid_move(board: &Board, mv: &Move) -> bool {
    if !is_pseudo_legal_move(board, mv, false) {
        return false;
    }

    let color = mv.piece.color;
    let opponent = color.opponent();

    if mv.is_castling() {
        // Cannot castle out of check or through an attacked square.
        // The destination is covered by the simulation below.
        if is_square_attacked(board, mv.from, opponent) {
            return false;
        }
        let step = if mv.to.col > mv.from.col { 1 } else { -1 };
        match mv.from.offset(0, step) {
            Some(transit) if !is_square_attacked(board, transit, opponent) => {}
            _ => return false,
        }
    }

    let next = apply_move(board, mv);
    !is_check(&next, color)
}

/// Returns the board after `mv`. The input board is left untouched.
///
/// Legality is assumed, not checked: a nonsensical move yields a nonsensical board.
pub fn apply_move(board: &Board, mv: &Move) -> Board {
    let mut next = board.clone();

    if let Some((rook_from, rook_to)) = castling_rook_squares(mv) {
        let rook = next.get(rook_from);
        next.set(rook_from, None);
        next.set(rook_to, rook);
    }

    let placed = match mv.promotion {
        Some(kind) => Piece::new(kind, mv.piece.color),
        None => mv.piece,
    };
    next.set(mv.from, None);
    next.set(mv.to, Some(placed));
    next
}

/// All legal moves for `color`, in row-major origin order then row-major target order.
/// Promotions are emitted as queen, knight, rook, bishop for each promoting target.
pub fn get_all_valid_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (from, piece) in board.pieces_of(color) {
        for to in Position::all() {
            let captured = board.get(to);
            if captured.is_some_and(|target| target.color == color) {
                continue; // Own piece on target
            }
            if piece.kind == PieceType::Pawn && to.row == color.promotion_row() {
                for kind in PieceType::PROMOTIONS {
                    push_if_valid(board, Move::new(from, to, piece, captured, Some(kind)), &mut moves);
                }
            } else {
                push_if_valid(board, Move::new(from, to, piece, captured, None), &mut moves);
            }
        }
    }
    moves
}

/// Short-circuiting form of `!get_all_valid_moves(board, color).is_empty()`.
pub fn has_valid_move(board: &Board, color: Color) -> bool {
    board.pieces_of(color).any(|(from, piece)| {
        Position::all().any(|to| {
            let captured = board.get(to);
            if captured.is_some_and(|target| target.color == color) {
                return false;
            }
            // Any promotion choice is legal iff the queen one is.
            let promotion = (piece.kind == PieceType::Pawn && to.row == color.promotion_row()).then_some(PieceType::Queen);
            is_valid_move(board, &Move::new(from, to, piece, captured, promotion))
        })
    })
}

/// Legal moves of the piece standing on `from`, for highlighting destinations.
pub fn get_valid_moves_from(board: &Board, from: Position) -> Vec<Move> {
    match board.get(from) {
        Some(piece) => get_all_valid_moves(board, piece.color)
            .into_iter()
            .filter(|mv| mv.from == from)
            .collect(),
        None => Vec::new(),
    }
}

#[inline]
fn push_if_valid(board: &Board, mv: Move, moves: &mut Vec<Move>) {
    if is_valid_move(board, &mv) {
        moves.push(mv);
    }
}

/// Counts leaf positions of the legal-move tree to `depth` plies, `color` moving first.
pub fn perft(board: &Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = get_all_valid_moves(board, color);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| perft(&apply_move(board, mv), color.opponent(), depth - 1))
        .sum()
}
