// src/lib.rs
//! A compact chess core on an 8×8 mailbox board.
//!
//! Row 0 is rank 8 and row 7 is rank 1; column 0 is file a. Boards are immutable snapshots:
//! [`apply_move`] returns a new board. Move legality is derived by simulation, and the engine is a
//! fixed-depth alpha-beta search over a material plus piece-square evaluation.
//!
//! En passant, castling rights and draw rules other than stalemate are not modelled.

pub mod attack;
pub mod board;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod legal;
pub mod notation;
pub mod rules;
pub mod search;
pub mod session;
pub mod state;
pub mod types;

pub use attack::{find_king, is_check, is_square_attacked};
pub use board::{Board, STARTING_FEN};
pub use config::EngineConfig;
pub use error::{CommandError, FenError, MoveError, SaveLoadError, SearchError};
pub use evaluation::evaluate;
pub use legal::{apply_move, get_all_valid_moves, has_valid_move, is_valid_move, perft};
pub use notation::parse_move;
pub use rules::is_pseudo_legal_move;
pub use search::{
    get_best_move, search, search_within, spawn_search, SearchConfig, SearchHandle, SearchOutcome, SearchPoll, Strength,
    TieBreak, CHECKMATE_SCORE,
};
pub use session::GameSession;
pub use state::{get_game_state, GameState};
pub use types::{Color, Move, Piece, PieceType, Position};
