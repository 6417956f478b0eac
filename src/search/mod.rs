//! Search module for the m,n,k engine
//!
//! Contains:
//! - Score cache keyed on exact grid contents
//! - Minimax and alpha-beta search with a cooperative deadline
//! - The root move loop and its depth self-tuning
//! - Parallel root search over partitioned candidates

pub mod alphabeta;
pub mod cache;
pub mod deadline;
pub mod parallel;
pub mod root;

pub use alphabeta::{SearchStats, Searcher};
pub use cache::{CacheKey, CacheStats, ScoreCache};
pub use deadline::Deadline;
pub use parallel::{dispatch, partition, ParallelOutcome};
pub use root::{search_root, DepthAdjust, RootChoice, RootOutcome};
