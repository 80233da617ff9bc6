// src/error.rs
//! Error types for position parsing, move input and persistence.
//!
//! Legality queries never return these: an illegal move is an ordinary `false`.
//! Errors are reserved for malformed input and I/O.

use std::io;
use thiserror::Error;

/// Malformed FEN piece-placement field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid position: expected 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("invalid position: rank {rank} spans {columns} columns (must be 8)")]
    RankWidth { rank: u8, columns: usize },

    #[error("invalid position: unrecognized character '{found}' in rank {rank}")]
    UnknownCharacter { rank: u8, found: char },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("invalid move format: '{0}'. Use a form like 'e2e4', 'a7a8q', 'O-O' or 'O-O-O'")]
    InvalidFormat(String),

    #[error("invalid promotion piece '{0}'. Use q, r, b or n")]
    InvalidPromotion(char),

    #[error("no piece on {0}")]
    PieceNotFound(String),

    #[error("illegal move: {0}")]
    Illegal(String),

    #[error("the game is already over")]
    GameOver,
}

#[derive(Error, Debug)]
pub enum SaveLoadError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error with file '{0}': {1}")]
    Io(String, #[source] io::Error),

    #[error(transparent)]
    Position(#[from] FenError),
}

/// Errors surfaced by the interactive front-end.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("unknown command: '{0}'. Type 'help' for commands")]
    UnknownCommand(String),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    SaveLoad(#[from] SaveLoadError),

    #[error("input/output error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Failures of the background search worker.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("failed to start search thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("search was cancelled")]
    Cancelled,

    #[error("search thread exited without a result")]
    WorkerLost,
}
