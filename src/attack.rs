// src/attack.rs
//! Attack and check detection built on the pseudo-legal rules in "reach" mode.

use log::trace;

use crate::board::Board;
use crate::rules::is_pseudo_legal_move;
use crate::types::{Color, Move, PieceType, Position};

/// First king of `color` in row-major scan order, if any.
pub fn find_king(board: &Board, color: Color) -> Option<Position> {
    board
        .pieces_of(color)
        .find(|(_, piece)| piece.kind == PieceType::King)
        .map(|(pos, _)| pos)
}

/// Checks whether any piece of `by_color` could reach `square`.
///
/// Pawns are tested on their capture diagonals only, since a pawn's forward step never attacks.
pub fn is_square_attacked(board: &Board, square: Position, by_color: Color) -> bool {
    board.pieces_of(by_color).any(|(from, piece)| {
        if piece.kind == PieceType::Pawn {
            let d_row = square.row as i8 - from.row as i8;
            let d_col = square.col as i8 - from.col as i8;
            return d_row == by_color.forward() && d_col.abs() == 1;
        }
        let probe = Move::new(from, square, piece, board.get(square), None);
        is_pseudo_legal_move(board, &probe, true)
    })
}

/// True when `color`'s king is attacked. A color without a king is never in check.
pub fn is_check(board: &Board, color: Color) -> bool {
    match find_king(board, color) {
        Some(king) => is_square_attacked(board, king, color.opponent()),
        None => {
            trace!("no {:?} king on the board; treating as not in check", color);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).expect("valid square")
    }

    #[test]
    fn finds_kings_in_start_position() {
        let board = Board::initial();
        assert_eq!(find_king(&board, Color::White), Some(sq("e1")));
        assert_eq!(find_king(&board, Color::Black), Some(sq("e8")));
        assert_eq!(find_king(&Board::empty(), Color::White), None);
    }

    #[test]
    fn pawn_attacks_only_diagonally() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3").expect("parses");
        assert!(is_square_attacked(&board, sq("d3"), Color::White));
        assert!(is_square_attacked(&board, sq("f3"), Color::White));
        assert!(!is_square_attacked(&board, sq("e3"), Color::White));
        assert!(!is_square_attacked(&board, sq("e4"), Color::White));
    }

    #[test]
    fn black_pawn_attacks_downwards() {
        let board = Board::from_fen("4k3/4p3/8/8/8/8/8/4K3").expect("parses");
        assert!(is_square_attacked(&board, sq("d6"), Color::Black));
        assert!(!is_square_attacked(&board, sq("d8"), Color::Black));
    }

    #[test]
    fn sliders_attack_through_empty_squares_only() {
        let board = Board::from_fen("4k3/8/8/8/R2p4/8/8/4K3").expect("parses");
        assert!(is_square_attacked(&board, sq("c4"), Color::White));
        assert!(is_square_attacked(&board, sq("d4"), Color::White), "defended/attacked piece square");
        assert!(!is_square_attacked(&board, sq("e4"), Color::White));
    }

    #[test]
    fn own_pieces_count_as_defended() {
        let board = Board::from_fen("4k3/8/8/8/8/8/3P4/3QK3").expect("parses");
        assert!(is_square_attacked(&board, sq("d2"), Color::White));
    }

    #[test]
    fn check_detection() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/r3K3").expect("parses");
        assert!(is_check(&board, Color::White));
        assert!(!is_check(&board, Color::Black));
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let board = Board::from_fen("8/8/8/8/8/8/8/r7").expect("parses");
        assert!(!is_check(&board, Color::White));
    }
}
