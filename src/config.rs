// src/config.rs
//! Engine and front-end settings, loadable from a JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::board::Board;
use crate::error::{FenError, SaveLoadError};
use crate::search::{SearchConfig, Strength, TieBreak};
use crate::types::Color;

pub const DEFAULT_HISTORY_FILENAME: &str = "chess_history.json";
pub const DEFAULT_THINK_LIMIT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strength: Strength,
    /// Side played by the engine in the terminal front-end.
    pub engine_color: Color,
    pub tie_break: TieBreak,
    pub history_file: String,
    /// Placement field to start from; the standard position when absent.
    pub start_fen: Option<String>,
    /// Longest the front-end waits on the engine before settling for a shallow search.
    pub think_limit_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            strength: Strength::default(),
            engine_color: Color::Black,
            tie_break: TieBreak::default(),
            history_file: DEFAULT_HISTORY_FILENAME.to_string(),
            start_fen: None,
            think_limit_secs: DEFAULT_THINK_LIMIT_SECS,
        }
    }
}

impl EngineConfig {
    /// Reads a JSON config. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SaveLoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SaveLoadError::Io(path.display().to_string(), e))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SaveLoadError> {
        let config: EngineConfig = serde_json::from_str(text)?;
        // Reject a bad start position at load time rather than mid-game.
        config.start_board()?;
        Ok(config)
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig { strength: self.strength, tie_break: self.tie_break }
    }

    pub fn think_limit(&self) -> Duration {
        Duration::from_secs(self.think_limit_secs)
    }

    pub fn start_board(&self) -> Result<Board, FenError> {
        match &self.start_fen {
            Some(fen) => Board::from_fen(fen),
            None => Ok(Board::initial()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = EngineConfig::from_json("{}").expect("valid config");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search_config().strength.depth(), 2);
        assert_eq!(config.think_limit_secs, DEFAULT_THINK_LIMIT_SECS);
        assert_eq!(config.start_board().expect("start position"), Board::initial());
    }

    #[test]
    fn reads_all_fields() {
        let json = r#"{
            "strength": "Hard",
            "engine_color": "White",
            "tie_break": { "Random": { "seed": 42 } },
            "history_file": "game.json",
            "start_fen": "4k3/8/8/8/8/8/8/4K3",
            "think_limit_secs": 5
        }"#;
        let config = EngineConfig::from_json(json).expect("valid config");
        assert_eq!(config.strength, Strength::Hard);
        assert_eq!(config.engine_color, Color::White);
        assert_eq!(config.tie_break, TieBreak::Random { seed: 42 });
        assert_eq!(config.history_file, "game.json");
        assert_eq!(config.think_limit(), Duration::from_secs(5));
        assert_eq!(config.start_board().expect("parses").pieces().count(), 2);
    }

    #[test]
    fn bad_start_position_is_rejected() {
        let err = EngineConfig::from_json(r#"{ "start_fen": "8/8/8" }"#).expect_err("invalid FEN");
        assert!(matches!(err, SaveLoadError::Position(FenError::RankCount { found: 3 })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EngineConfig::load("/definitely/not/here.json").expect_err("no such file");
        assert!(matches!(err, SaveLoadError::Io(_, _)));
    }
}
