//! Engine configuration loaded from TOML
//!
//! ```
//! use mnk::{CachePolicy, EngineConfig, Stone};
//!
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     board_size = 5
//!     win_length = 4
//!     own = "O"
//!     time_budget_ms = 500
//!     cache = "exact"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.own, Stone::O);
//! assert_eq!(config.cache, CachePolicy::Exact);
//! assert!(config.alpha_beta);
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Stone, MAX_BOARD_SIZE};

/// Upper bound on worker threads per move
pub const MAX_WORKERS: usize = 256;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What the score cache keys on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    /// Grid contents only. Positions reached at another depth or with the
    /// other side to move share one entry, and pruned bounds are stored as
    /// if exact.
    #[default]
    Lossy,
    /// Grid, side to move, remaining depth and last move; only exact
    /// results are stored.
    Exact,
}

/// All knobs of one engine instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cells per side (n)
    pub board_size: usize,
    /// Stones in a row needed to win (k); clamped to `board_size`
    pub win_length: usize,
    /// Symbol the engine plays
    pub own: Stone,
    /// Wall-clock budget per move
    pub time_budget_ms: u64,
    /// Alpha-beta pruning instead of plain minimax
    pub alpha_beta: bool,
    /// Worker threads; 0 searches on the calling thread
    pub workers: usize,
    /// Initial depth budget
    pub depth: u32,
    pub min_depth: u32,
    pub max_depth: u32,
    /// Keep the self-tuned depth between moves instead of resetting it
    pub dynamic_depth: bool,
    /// Chebyshev radius around stones for candidate moves
    pub candidate_radius: u8,
    pub cache: CachePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: 12,
            win_length: 6,
            own: Stone::X,
            time_budget_ms: 28_000,
            alpha_beta: true,
            workers: 0,
            depth: 4,
            min_depth: 1,
            max_depth: 32,
            dynamic_depth: true,
            candidate_radius: 1,
            cache: CachePolicy::Lossy,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::Invalid(format!(
                "board_size must be between 1 and {MAX_BOARD_SIZE}, got {}",
                self.board_size
            )));
        }
        if self.win_length == 0 {
            return Err(ConfigError::Invalid("win_length must be at least 1".into()));
        }
        if self.own == Stone::Empty {
            return Err(ConfigError::Invalid("own must be \"X\" or \"O\"".into()));
        }
        if self.workers > MAX_WORKERS {
            return Err(ConfigError::Invalid(format!(
                "workers must be at most {MAX_WORKERS}, got {}",
                self.workers
            )));
        }
        if self.candidate_radius == 0 {
            return Err(ConfigError::Invalid("candidate_radius must be at least 1".into()));
        }
        if self.min_depth > self.max_depth {
            return Err(ConfigError::Invalid(format!(
                "min_depth {} exceeds max_depth {}",
                self.min_depth, self.max_depth
            )));
        }
        if !(self.min_depth..=self.max_depth).contains(&self.depth) {
            return Err(ConfigError::Invalid(format!(
                "depth {} outside {}..={}",
                self.depth, self.min_depth, self.max_depth
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    #[inline]
    pub fn opponent(&self) -> Stone {
        self.own.opponent()
    }

    /// Win length as the board will use it
    #[inline]
    pub fn effective_win_length(&self) -> usize {
        self.win_length.min(self.board_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.opponent(), Stone::O);
        assert_eq!(config.time_budget(), Duration::from_millis(28_000));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("board_size = 7\nworkers = 3\n").unwrap();
        assert_eq!(config.board_size, 7);
        assert_eq!(config.workers, 3);
        assert_eq!(config.win_length, 6);
        assert_eq!(config.cache, CachePolicy::Lossy);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = EngineConfig {
            own: Stone::O,
            cache: CachePolicy::Exact,
            dynamic_depth: false,
            ..EngineConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("own = \"O\""));
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_win_length_clamped() {
        let config = EngineConfig::from_toml_str("board_size = 4\nwin_length = 9\n").unwrap();
        assert_eq!(config.effective_win_length(), 4);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for text in [
            "board_size = 0",
            "board_size = 300",
            "win_length = 0",
            "own = \".\"",
            "workers = 1000",
            "candidate_radius = 0",
            "min_depth = 5\nmax_depth = 2",
            "depth = 40",
        ] {
            let err = EngineConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{text}: {err}");
        }
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = EngineConfig::from_toml_str("board_size = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load("/nonexistent/mnk.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
