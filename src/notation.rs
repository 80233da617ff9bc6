// src/notation.rs
//! Coordinate move input: `e2e4`, `e7e8q`, `O-O`, `O-O-O`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::board::Board;
use crate::error::MoveError;
use crate::rules::{KINGSIDE_KING_DEST_COL, KING_START_COL, QUEENSIDE_KING_DEST_COL};
use crate::types::{Color, Move, PieceType, Position};

lazy_static! {
    static ref COORDINATE_MOVE: Regex = Regex::new(r"^([a-h][1-8])([a-h][1-8])([a-z])?$")
        .expect("coordinate move pattern is valid");
}

/// Resolves `text` against `board` into a [`Move`] for `color`.
///
/// Only the format is checked here, not legality. A pawn reaching its last row without a
/// promotion letter promotes to a queen.
pub fn parse_move(text: &str, board: &Board, color: Color) -> Result<Move, MoveError> {
    let input = text.trim().to_ascii_lowercase();

    let castle_dest = match input.as_str() {
        "o-o" | "0-0" => Some(KINGSIDE_KING_DEST_COL),
        "o-o-o" | "0-0-0" => Some(QUEENSIDE_KING_DEST_COL),
        _ => None,
    };
    if let Some(dest_col) = castle_dest {
        let row = color.back_row();
        let from = Position::new(row, KING_START_COL);
        return Move::on_board(board, from, Position::new(row, dest_col), None)
            .ok_or_else(|| MoveError::PieceNotFound(from.to_algebraic()));
    }

    let caps = COORDINATE_MOVE
        .captures(&input)
        .ok_or_else(|| MoveError::InvalidFormat(text.trim().to_string()))?;
    let from = Position::from_algebraic(&caps[1]).ok_or_else(|| MoveError::InvalidFormat(caps[1].to_string()))?;
    let to = Position::from_algebraic(&caps[2]).ok_or_else(|| MoveError::InvalidFormat(caps[2].to_string()))?;

    let mut promotion = match caps.get(3).and_then(|m| m.as_str().chars().next()) {
        Some(letter) => match PieceType::from_char(letter) {
            Some(kind) if kind.is_promotion_target() => Some(kind),
            _ => return Err(MoveError::InvalidPromotion(letter)),
        },
        None => None,
    };

    let piece = board.get(from).ok_or_else(|| MoveError::PieceNotFound(from.to_algebraic()))?;
    if promotion.is_none() && piece.kind == PieceType::Pawn && to.row == piece.color.promotion_row() {
        promotion = Some(PieceType::Queen);
    }
    Ok(Move::new(from, to, piece, board.get(to), promotion))
}
