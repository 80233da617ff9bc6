use std::collections::BTreeSet;

use chess_core::{
    apply_move, get_all_valid_moves, get_game_state, is_check, is_pseudo_legal_move, is_valid_move, perft, Board,
    Color, GameState, Move, PieceType, Position,
};

fn sq(name: &str) -> Position {
    Position::from_algebraic(name).expect("valid square")
}

fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("valid placement")
}

fn play(board: &Board, from: &str, to: &str) -> Board {
    let mv = Move::on_board(board, sq(from), sq(to), None).expect("piece on origin");
    assert!(is_valid_move(board, &mv), "{}{} should be legal", from, to);
    apply_move(board, &mv)
}

/// Every from/to pair for `color`, with a queen promotion where a pawn reaches its last row.
fn candidate_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, piece) in board.pieces_of(color) {
        for to in Position::all() {
            let promotion =
                (piece.kind == PieceType::Pawn && to.row == color.promotion_row()).then_some(PieceType::Queen);
            moves.push(Move::new(from, to, piece, board.get(to), promotion));
        }
    }
    moves
}

fn move_set(board: &Board, color: Color) -> BTreeSet<String> {
    get_all_valid_moves(board, color).iter().map(Move::to_coordinate).collect()
}

#[test]
fn twenty_moves_from_the_start() {
    let moves = get_all_valid_moves(&Board::initial(), Color::White);
    assert_eq!(moves.len(), 20);
    assert_eq!(get_all_valid_moves(&Board::initial(), Color::Black).len(), 20);
}

#[test]
fn perft_three_from_the_start() {
    assert_eq!(perft(&Board::initial(), Color::White, 3), 8902);
}

#[test]
fn scholars_mate_is_checkmate() {
    let before = board("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR");
    let mv = Move::on_board(&before, sq("h5"), sq("f7"), None).expect("queen on h5");
    assert!(is_valid_move(&before, &mv));
    assert_eq!(mv.captured.map(|p| (p.kind, p.color)), Some((PieceType::Pawn, Color::Black)));

    let after = apply_move(&before, &mv);
    assert!(is_check(&after, Color::Black));
    assert_eq!(get_game_state(&after, Color::Black), GameState::Checkmate);
    assert_eq!(get_game_state(&before, Color::White), GameState::Playing);
}

#[test]
fn stalemate_is_never_checkmate() {
    for fen in ["7k/5Q2/6K1/8/8/8/8/8", "k7/2Q5/1K6/8/8/8/8/8", "8/8/8/8/8/5k2/5p2/5K2"] {
        let position = board(fen);
        let stuck = match fen {
            "8/8/8/8/8/5k2/5p2/5K2" => Color::White,
            _ => Color::Black,
        };
        assert!(!is_check(&position, stuck), "{}", fen);
        assert!(get_all_valid_moves(&position, stuck).is_empty(), "{}", fen);
        assert_eq!(get_game_state(&position, stuck), GameState::Stalemate, "{}", fen);
    }
}

#[test]
fn castling_requires_a_safe_transit_square() {
    let open = board("4k3/8/8/8/8/8/8/R3K2R");
    let castle = Move::on_board(&open, sq("e1"), sq("g1"), None).expect("king on e1");
    assert!(is_valid_move(&open, &castle));
    let after = apply_move(&open, &castle);
    assert_eq!(after.get(sq("f1")).map(|p| p.kind), Some(PieceType::Rook));

    // Bishop on a6 covers f1 but not e1 or g1.
    let covered = board("4k3/8/b7/8/8/8/8/R3K2R");
    let castle = Move::on_board(&covered, sq("e1"), sq("g1"), None).expect("king on e1");
    assert!(is_pseudo_legal_move(&covered, &castle, false));
    assert!(!is_valid_move(&covered, &castle));
    assert!(!move_set(&covered, Color::White).contains("e1g1"));
    assert!(move_set(&covered, Color::White).contains("e1c1"));
}

#[test]
fn castling_transit_rule_holds_for_every_side_and_wing() {
    // (placement, mover, king move, other wing that stays legal)
    let cases = [
        ("3rk3/8/8/8/8/8/8/R3K2R", Color::White, ("e1", "c1"), "e1g1"), // d8 rook covers d1
        ("r3k2r/8/8/8/8/B7/8/4K3", Color::Black, ("e8", "g8"), "e8c8"), // a3 bishop covers f8
        ("r3k2r/8/8/8/8/8/8/3RK3", Color::Black, ("e8", "c8"), "e8g8"), // d1 rook covers d8
    ];
    for (fen, color, (from, to), other) in cases {
        let position = board(fen);
        assert!(!is_check(&position, color), "{}", fen);
        let castle = Move::on_board(&position, sq(from), sq(to), None).expect("king on home square");
        assert!(is_pseudo_legal_move(&position, &castle, false), "{} {}{}", fen, from, to);
        assert!(!is_valid_move(&position, &castle), "{} {}{} passes an attacked square", fen, from, to);

        let moves = move_set(&position, color);
        assert!(!moves.contains(&format!("{}{}", from, to)), "{}", fen);
        assert!(moves.contains(other), "{} should still allow {}", fen, other);
    }
}

#[test]
fn castling_needs_rook_and_empty_path() {
    let blocked = board("4k3/8/8/8/8/8/8/RN2K1NR");
    let moves = move_set(&blocked, Color::White);
    assert!(!moves.contains("e1g1"));
    assert!(!moves.contains("e1c1"));

    let no_rook = board("4k3/8/8/8/8/8/8/4K3");
    assert!(!move_set(&no_rook, Color::White).contains("e1g1"));
}

#[test]
fn legal_moves_never_leave_the_king_attacked() {
    let fens = [
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR",
        "4k3/4r3/8/8/8/8/4B3/4K3",
        "r3k2r/pp3ppp/8/3q4/8/2N5/PP3PPP/R3K2R",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
        "7k/P7/8/8/8/8/6p1/K7",
    ];
    for fen in fens {
        let position = board(fen);
        for color in [Color::White, Color::Black] {
            for mv in candidate_moves(&position, color) {
                if !is_pseudo_legal_move(&position, &mv, false) {
                    assert!(!is_valid_move(&position, &mv));
                    continue;
                }
                let leaves_check = is_check(&apply_move(&position, &mv), color);
                if leaves_check {
                    assert!(!is_valid_move(&position, &mv), "{} {} exposes the king", fen, mv);
                } else if !mv.is_castling() {
                    assert!(is_valid_move(&position, &mv), "{} {} should be legal", fen, mv);
                }
            }
        }
    }
}

#[test]
fn move_set_is_independent_of_the_path() {
    let start = Board::initial();
    let via_pawn = play(&play(&play(&play(&start, "e2", "e4"), "e7", "e5"), "g1", "f3"), "b8", "c6");
    let via_knight = play(&play(&play(&play(&start, "g1", "f3"), "b8", "c6"), "e2", "e4"), "e7", "e5");

    assert_eq!(via_pawn, via_knight);
    for color in [Color::White, Color::Black] {
        assert_eq!(move_set(&via_pawn, color), move_set(&via_knight, color));
    }

    // Rebuilding from FEN yields the same moves too.
    let rebuilt = board(&via_pawn.to_fen());
    assert_eq!(move_set(&rebuilt, Color::White), move_set(&via_pawn, Color::White));
}

#[test]
fn apply_move_leaves_the_input_untouched() {
    let start = Board::initial();
    let snapshot = start.clone();
    let _ = play(&start, "e2", "e4");
    assert_eq!(start, snapshot);
}
