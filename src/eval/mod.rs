//! Evaluation for m,n,k positions
//!
//! Scores are always from the engine's point of view. Terminal positions get
//! the fixed [`Score::WIN`]/[`Score::LOSE`] pair; everything else gets the small
//! threat-count heuristic from [`leaf_score`].

pub mod heuristic;
pub mod score;

pub use heuristic::{leaf_score, threat_score};
pub use score::Score;
