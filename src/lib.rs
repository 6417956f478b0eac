//! m,n,k-game search engine
//!
//! An engine for k-in-a-row games on a square n×n board (tic-tac-toe,
//! gomoku-like variants):
//! - Any board size up to 255, any win length up to the board size
//! - Overlines count as wins
//! - No captures or forbidden moves
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with scoped move application
//! - [`rules`]: Win and threat detection
//! - [`eval`]: Terminal scores and the threat-count leaf heuristic
//! - [`search`]: Minimax/alpha-beta with a score cache, root loop, workers
//! - [`engine`]: Move selection integrating all components
//! - [`config`]: TOML configuration
//!
//! # Quick Start
//!
//! ```
//! use mnk::{Engine, EngineConfig, Stone};
//!
//! let config = EngineConfig {
//!     board_size: 6,
//!     win_length: 4,
//!     own: Stone::X,
//!     time_budget_ms: 200,
//!     ..EngineConfig::default()
//! };
//! let mut engine = Engine::new(config).unwrap();
//!
//! let result = engine.choose_move();
//! if let Some(pos) = result.best_move {
//!     engine.apply(pos, Stone::X);
//!     println!("engine plays at {pos}");
//! }
//! ```
//!
//! # Search Priority
//!
//! 1. Center on an empty board
//! 2. Complete an own threat, else block the opponent's
//! 3. Full search over candidate moves with depth self-tuning

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod rules;
pub mod search;
pub mod session;

// Re-export commonly used types for convenience
pub use board::{Board, BoardParseError, Pos, Stone};
pub use config::{CachePolicy, ConfigError, EngineConfig};
pub use engine::{choose_move, Engine, MoveResult, MoveSource};
pub use eval::Score;
pub use rules::{ThreatLevel, ThreatScan};
pub use session::Session;
