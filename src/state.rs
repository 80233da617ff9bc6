// src/state.rs
//! Playing / checkmate / stalemate classification for the side about to move.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attack::is_check;
use crate::board::Board;
use crate::legal::has_valid_move;
use crate::types::Color;

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    Playing,
    Checkmate,
    Stalemate,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameState::Playing => "playing",
            GameState::Checkmate => "checkmate",
            GameState::Stalemate => "stalemate",
        };
        write!(f, "{}", label)
    }
}

/// Classifies `board` with `color` to move. Repetition, fifty-move and material draws are not
/// detected.
pub fn get_game_state(board: &Board, color: Color) -> GameState {
    if has_valid_move(board, color) {
        GameState::Playing
    } else if is_check(board, color) {
        GameState::Checkmate
    } else {
        GameState::Stalemate
    }
}
