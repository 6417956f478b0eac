//! Per-game search state carried between moves

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::search::ScoreCache;

/// Everything one side needs to pick its next move.
///
/// The board is shared with the game: the caller applies both sides'
/// moves. The depth budget and the engine's own last move persist between
/// calls; the cache is emptied after every move.
#[derive(Debug, Clone)]
pub struct Session {
    pub board: Board,
    pub own: Stone,
    pub opponent: Stone,
    /// Current depth budget
    pub depth: u32,
    /// The engine's previous move, used by the threat short-circuit
    pub own_last_move: Option<Pos>,
    pub cache: ScoreCache,
}

impl Session {
    pub fn new(board: Board, own: Stone, depth: u32) -> Self {
        Self {
            board,
            own,
            opponent: own.opponent(),
            depth,
            own_last_move: None,
            cache: ScoreCache::new(),
        }
    }

    /// Fresh game from a configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            Board::new(config.board_size, config.effective_win_length()),
            config.own,
            config.depth,
        )
    }

    /// Independent copy for a worker: same board, depth and history, but an
    /// empty cache of its own
    pub fn fork(&self) -> Self {
        Self {
            board: self.board.clone(),
            own: self.own,
            opponent: self.opponent,
            depth: self.depth,
            own_last_move: self.own_last_move,
            cache: ScoreCache::new(),
        }
    }
}
