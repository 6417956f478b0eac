//! Score cache for search nodes
//!
//! Scores are keyed on the exact grid contents, optionally extended with
//! the node context (side to move, remaining depth, last move) depending on
//! the [`CachePolicy`]. Keys compare by full equality, so two different
//! positions never share an entry.
//!
//! # Example
//!
//! ```
//! use mnk::board::{Board, Pos, Stone};
//! use mnk::search::{CacheKey, ScoreCache};
//! use mnk::CachePolicy;
//!
//! let mut board = Board::new(5, 4);
//! board.apply(Pos::new(2, 2), Stone::X);
//!
//! let mut cache = ScoreCache::new();
//! let key = CacheKey::for_node(CachePolicy::Lossy, &board, true, 3, Pos::new(2, 2));
//! cache.store(key.clone(), 7);
//! assert_eq!(cache.probe(&key), Some(7));
//! ```

use std::collections::HashMap;

use crate::board::{Board, Pos};
use crate::config::CachePolicy;

/// Context that separates otherwise identical grids under
/// [`CachePolicy::Exact`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeContext {
    minimizing: bool,
    depth: u32,
    last_move: Pos,
}

/// Lookup key for [`ScoreCache`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    grid: Box<[u8]>,
    context: Option<NodeContext>,
}

impl CacheKey {
    /// Key on the grid alone
    pub fn grid(board: &Board) -> Self {
        Self {
            grid: board.key(),
            context: None,
        }
    }

    /// Key on the grid plus the full node context
    pub fn exact(board: &Board, minimizing: bool, depth: u32, last_move: Pos) -> Self {
        Self {
            grid: board.key(),
            context: Some(NodeContext {
                minimizing,
                depth,
                last_move,
            }),
        }
    }

    /// Key for a search node under `policy`
    #[inline]
    pub fn for_node(policy: CachePolicy, board: &Board, minimizing: bool, depth: u32, last_move: Pos) -> Self {
        match policy {
            CachePolicy::Lossy => Self::grid(board),
            CachePolicy::Exact => Self::exact(board, minimizing, depth, last_move),
        }
    }
}

/// Statistics about cache occupancy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Stored entries
    pub entries: usize,
    /// Probes since the last clear
    pub probes: u64,
    /// Probes that found an entry
    pub hits: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64 * 100.0
        }
    }
}

/// Position-keyed score store, owned by one search context at a time
#[derive(Debug, Clone, Default)]
pub struct ScoreCache {
    entries: HashMap<CacheKey, i32>,
    probes: u64,
    hits: u64,
}

impl ScoreCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored score
    pub fn probe(&mut self, key: &CacheKey) -> Option<i32> {
        self.probes += 1;
        let found = self.entries.get(key).copied();
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    /// Store a score, replacing any previous entry for the key
    #[inline]
    pub fn store(&mut self, key: CacheKey, score: i32) {
        self.entries.insert(key, score);
    }

    /// Drop all entries and reset the counters
    pub fn clear(&mut self) {
        self.entries.clear();
        self.probes = 0;
        self.hits = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            probes: self.probes,
            hits: self.hits,
        }
    }
}
