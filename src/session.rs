// src/session.rs
//! A game in progress: board snapshots, side to move, and the append-only move history.

use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::attack::is_check;
use crate::board::Board;
use crate::error::{FenError, MoveError, SaveLoadError};
use crate::legal::{apply_move, get_all_valid_moves, get_valid_moves_from, is_valid_move};
use crate::notation::parse_move;
use crate::search::{search, SearchConfig, SearchOutcome};
use crate::state::{get_game_state, GameState};
use crate::types::{Color, Move, Position};

// --- History Export ---

#[derive(Debug, Clone, Serialize)]
struct HistoryEntry {
    ply: usize,
    player: Color,
    notation: String,
    annotation: &'static str, // +, # or empty
    #[serde(rename = "move")]
    mv: Move,
}

#[derive(Debug, Serialize)]
struct HistoryExport<'a> {
    start_fen: &'a str,
    final_fen: String,
    side_to_move: Color,
    state: GameState,
    moves: Vec<HistoryEntry>,
}

// --- Game Session ---

/// Owns the game. Every move pushes a new board snapshot; earlier snapshots stay available.
#[derive(Debug, Clone)]
pub struct GameSession {
    positions: Vec<Board>,
    history: Vec<Move>,
    turn: Color,
    state: GameState,
    start_fen: String,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new()
    }
}

impl GameSession {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        GameSession::from_board(Board::initial(), Color::White)
    }

    pub fn from_fen(fen: &str, to_move: Color) -> Result<Self, FenError> {
        Ok(GameSession::from_board(Board::from_fen(fen)?, to_move))
    }

    pub fn from_board(board: Board, to_move: Color) -> Self {
        let state = get_game_state(&board, to_move);
        GameSession {
            start_fen: board.to_fen(),
            positions: vec![board],
            history: Vec::new(),
            turn: to_move,
            state,
        }
    }

    pub fn board(&self) -> &Board {
        // `positions` always holds the starting board.
        &self.positions[self.positions.len() - 1]
    }

    /// Every board of the game so far, starting position first.
    pub fn positions(&self) -> &[Board] {
        &self.positions
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn in_check(&self) -> bool {
        is_check(self.board(), self.turn)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        get_all_valid_moves(self.board(), self.turn)
    }

    /// Destinations the piece on `from` may move to; empty unless it belongs to the side to move.
    pub fn legal_destinations(&self, from: Position) -> Vec<Position> {
        match self.board().get(from) {
            Some(piece) if piece.color == self.turn => {
                let mut targets: Vec<Position> = get_valid_moves_from(self.board(), from).iter().map(|mv| mv.to).collect();
                targets.dedup(); // Promotion choices share a target
                targets
            }
            _ => Vec::new(),
        }
    }

    /// Applies `mv` if it is legal for the side to move and returns the new game state.
    pub fn play(&mut self, mv: Move) -> Result<GameState, MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }
        if mv.piece.color != self.turn {
            return Err(MoveError::Illegal(format!("{} is not a {:?} move", mv, self.turn)));
        }
        if !is_valid_move(self.board(), &mv) {
            return Err(MoveError::Illegal(mv.to_string()));
        }

        let next = apply_move(self.board(), &mv);
        let mover = self.turn;
        self.turn = mover.opponent();
        self.state = get_game_state(&next, self.turn);
        self.positions.push(next);
        self.history.push(mv);

        info!("{:?} played {} ({})", mover, mv, self.state);
        if self.state.is_over() {
            info!("game over after {} plies: {}", self.history.len(), self.state);
        }
        Ok(self.state)
    }

    /// Parses coordinate or castling notation and plays it.
    pub fn play_text(&mut self, text: &str) -> Result<GameState, MoveError> {
        let mv = parse_move(text, self.board(), self.turn)?;
        self.play(mv)
    }

    /// Lets the engine choose and play a move for the side to move.
    /// Returns `Ok(None)` when there is nothing to play.
    pub fn engine_move(&mut self, config: &SearchConfig) -> Result<Option<SearchOutcome>, MoveError> {
        if self.state.is_over() {
            return Ok(None);
        }
        match search(self.board(), self.turn, config) {
            Some(outcome) => {
                self.play(outcome.best_move)?;
                Ok(Some(outcome))
            }
            None => Ok(None),
        }
    }

    /// Writes the game as pretty JSON.
    pub fn save_history<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveLoadError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.export())?;
        fs::write(path, json).map_err(|e| SaveLoadError::Io(path.display().to_string(), e))
    }

    fn export(&self) -> HistoryExport<'_> {
        let moves = self
            .history
            .iter()
            .enumerate()
            .map(|(ply, mv)| {
                // positions[ply + 1] is the board after this move
                let after = &self.positions[ply + 1];
                let opponent = mv.piece.color.opponent();
                let annotation = match get_game_state(after, opponent) {
                    GameState::Checkmate => "#",
                    _ if is_check(after, opponent) => "+",
                    _ => "",
                };
                HistoryEntry { ply: ply + 1, player: mv.piece.color, notation: mv.to_string(), annotation, mv: *mv }
            })
            .collect();

        HistoryExport {
            start_fen: &self.start_fen,
            final_fen: self.board().to_fen(),
            side_to_move: self.turn,
            state: self.state,
            moves,
        }
    }

    /// Move list in `1. e2e4 e7e5` form.
    pub fn history_text(&self) -> String {
        let mut text = String::new();
        let mut ply = 0;
        if self.history.first().is_some_and(|mv| mv.piece.color == Color::Black) {
            if let Some(first) = self.history.first() {
                text.push_str(&format!("1. ... {}\n", first));
            }
            ply = 1;
        }
        for (index, pair) in self.history[ply..].chunks(2).enumerate() {
            let number = index + 1 + ply;
            match pair {
                [white, black] => text.push_str(&format!("{}. {} {}\n", number, white, black)),
                [white] => text.push_str(&format!("{}. {}\n", number, white)),
                _ => {}
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Strength;
    use crate::types::{Piece, PieceType};

    #[test]
    fn plays_scholars_mate() {
        let mut game = GameSession::new();
        for text in ["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6"] {
            assert_eq!(game.play_text(text), Ok(GameState::Playing), "{}", text);
        }
        assert_eq!(game.play_text("h5f7"), Ok(GameState::Checkmate));
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.history().len(), 7);
        assert_eq!(game.positions().len(), 8);
        assert_eq!(game.positions()[0], Board::initial());
        assert_eq!(game.play_text("e8e7"), Err(MoveError::GameOver));
    }

    #[test]
    fn rejects_wrong_side_and_illegal_moves() {
        let mut game = GameSession::new();
        assert!(matches!(game.play_text("e7e5"), Err(MoveError::Illegal(_))));
        assert!(matches!(game.play_text("e2e5"), Err(MoveError::Illegal(_))));
        assert!(matches!(game.play_text("zz"), Err(MoveError::InvalidFormat(_))));
        assert_eq!(game.history().len(), 0);
        assert_eq!(game.board(), &Board::initial());
    }

    #[test]
    fn rejects_move_with_false_capture_record() {
        let mut game = GameSession::from_fen("4k3/8/8/3p4/4P3/8/8/4K3", Color::White).expect("parses");
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        let e4 = Position::from_algebraic("e4").expect("square");
        let d5 = Position::from_algebraic("d5").expect("square");

        let silent = Move::new(e4, d5, pawn, None, None);
        assert!(matches!(game.play(silent), Err(MoveError::Illegal(_))));
        assert!(game.history().is_empty());

        assert_eq!(game.play_text("e4d5"), Ok(GameState::Playing));
        assert_eq!(game.history()[0].captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
    }

    #[test]
    fn destinations_for_highlighting() {
        let game = GameSession::new();
        let e2 = Position::from_algebraic("e2").expect("square");
        let targets: Vec<String> = game.legal_destinations(e2).iter().map(Position::to_algebraic).collect();
        assert_eq!(targets, vec!["e4", "e3"]);
        assert!(game.legal_destinations(Position::from_algebraic("e7").expect("square")).is_empty());
    }

    #[test]
    fn promotion_destination_listed_once() {
        let game = GameSession::from_fen("7k/P7/8/8/8/8/8/K7", Color::White).expect("parses");
        let a7 = Position::from_algebraic("a7").expect("square");
        assert_eq!(game.legal_destinations(a7).len(), 1);
    }

    #[test]
    fn engine_plays_for_side_to_move() {
        let mut game = GameSession::from_fen("r5k1/8/8/8/8/8/5PPP/6K1", Color::Black).expect("parses");
        let outcome = game.engine_move(&SearchConfig::new(Strength::Medium)).expect("legal").expect("has moves");
        assert_eq!(outcome.best_move.piece.kind, PieceType::Rook);
        assert_eq!(game.state(), GameState::Checkmate);
        assert_eq!(game.engine_move(&SearchConfig::default()), Ok(None));
    }

    #[test]
    fn history_text_pairs_moves() {
        let mut game = GameSession::new();
        for text in ["e2e4", "e7e5", "g1f3"] {
            game.play_text(text).expect("legal");
        }
        assert_eq!(game.history_text(), "1. e2e4 e7e5\n2. g1f3\n");
    }

    #[test]
    fn export_annotates_checks() {
        let mut game = GameSession::new();
        for text in ["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"] {
            game.play_text(text).expect("legal");
        }
        let export = game.export();
        assert_eq!(export.moves.len(), 7);
        assert_eq!(export.moves[6].annotation, "#");
        assert_eq!(export.moves[0].annotation, "");
        assert_eq!(export.state, GameState::Checkmate);
        let json = serde_json::to_value(&export).expect("serializes");
        assert_eq!(json["moves"][0]["notation"], "e2e4");
    }
}
