//! Game rules for m,n,k games
//!
//! This module implements:
//! - Win detection (k or more in a row, four line directions)
//! - Threat detection (cells that complete a line on the next move)
//!
//! Both are exposed as methods on [`Board`](crate::board::Board).

pub mod threat;
pub mod win;

// Re-exports for convenient access
pub use threat::{ThreatLevel, ThreatScan};
