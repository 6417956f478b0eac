//! Move selection integrating all search components
//!
//! [`choose_move`] follows a fixed priority:
//!
//! 1. **Opening**: the first move of the game goes to the center
//! 2. **Threat**: complete the engine's own line if its last move left a
//!    completing cell, else block the opponent's
//! 3. **Search**: score every candidate with minimax or alpha-beta, on the
//!    calling thread or across workers
//!
//! After a search the depth budget is tuned: one ply shallower when the
//! deadline cut the root loop short, one deeper when the move took less
//! than an eighth of the budget.
//!
//! # Example
//!
//! ```
//! use mnk::{Engine, EngineConfig, MoveSource, Pos, Stone};
//!
//! let config = EngineConfig { board_size: 7, win_length: 4, own: Stone::O, ..EngineConfig::default() };
//! let mut engine = Engine::new(config).unwrap();
//!
//! let result = engine.choose_move();
//! assert_eq!(result.best_move, Some(Pos::new(3, 3)));
//! assert_eq!(result.source, MoveSource::Opening);
//! ```

use std::time::Instant;

use log::debug;

use crate::board::{Board, Pos, Stone};
use crate::config::{ConfigError, EngineConfig};
use crate::eval::Score;
use crate::search::{dispatch, search_root, Deadline, DepthAdjust, RootChoice, SearchStats};
use crate::session::Session;

/// Which step of the selector produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Center of an empty board
    Opening,
    /// Completing or blocking a one-move threat, no search
    Threat,
    /// Full root search
    Search,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// `None` only when the board has no empty cell
    pub best_move: Option<Pos>,
    /// Score of the chosen move from the engine's point of view
    pub score: i32,
    pub source: MoveSource,
    /// Depth budget the move was chosen with
    pub depth: u32,
    /// Depth budget for the next move
    pub next_depth: u32,
    pub time_ms: u64,
    pub stats: SearchStats,
}

/// Outcome of the search step
struct Searched {
    best: Option<RootChoice>,
    adjust: DepthAdjust,
    stats: SearchStats,
}

/// First move of the game
fn opening_move(board: &Board) -> Option<Pos> {
    board
        .last_move()
        .is_none()
        .then(|| Pos::new(board.center(), board.center()))
}

/// Completing cell of a threat left by `pos`, if the cell still holds `stone`
fn completing_cell(board: &Board, pos: Pos, stone: Stone) -> Option<Pos> {
    if board.get(pos) != stone {
        return None;
    }
    let scan = board.scan_threats(pos, None);
    if scan.level.is_threat() {
        scan.endpoint
    } else {
        None
    }
}

/// Threat short-circuit: block the opponent's last move, unless the
/// engine's own last move can be completed instead. Returns the cell and
/// whether it wins.
fn threat_reply(session: &Session) -> Option<(Pos, bool)> {
    let board = &session.board;
    let own = session
        .own_last_move
        .and_then(|pos| completing_cell(board, pos, session.own));
    if let Some(cell) = own {
        return Some((cell, true));
    }
    board
        .last_move()
        .and_then(|pos| completing_cell(board, pos, session.opponent))
        .map(|cell| (cell, false))
}

fn run_search(session: &mut Session, config: &EngineConfig, candidates: &[Pos], deadline: Deadline) -> Searched {
    if config.workers == 0 {
        let indexed: Vec<(usize, Pos)> = candidates.iter().copied().enumerate().collect();
        let outcome = search_root(session, config, &indexed, deadline);
        Searched {
            best: outcome.best,
            adjust: DepthAdjust::observe(outcome.timed_out, &deadline),
            stats: outcome.stats,
        }
    } else {
        // Workers get the full budget from the moment the jobs are dealt
        let outcome = dispatch(session, config, candidates, config.time_budget());
        Searched {
            best: outcome.best,
            adjust: outcome.adjust,
            stats: outcome.stats,
        }
    }
}

/// Pick the engine's next move and update the session.
///
/// The board is left as it was; the caller applies the returned move. The
/// cache is cleared and the depth budget updated before returning.
pub fn choose_move(session: &mut Session, config: &EngineConfig) -> MoveResult {
    let start = Instant::now();
    let deadline = Deadline::new(start, config.time_budget());
    let depth = session.depth;

    let (best_move, score, source, stats) = if let Some(pos) = opening_move(&session.board) {
        (Some(pos), 0, MoveSource::Opening, SearchStats::default())
    } else if let Some((cell, wins)) = threat_reply(session) {
        debug!("threat at {cell}, {}", if wins { "completing" } else { "blocking" });
        let score = if wins { Score::WIN } else { 0 };
        (Some(cell), score, MoveSource::Threat, SearchStats::default())
    } else {
        let candidates = session.board.candidate_moves(config.candidate_radius);
        let searched = run_search(session, config, &candidates, deadline);

        let next = searched.adjust.apply(session.depth, config);
        if next != session.depth {
            debug!("depth budget {} -> {}", session.depth, next);
        }
        session.depth = next;

        // Out of time before the first root finished: fall back to the best
        // ordered candidate
        let (best_move, score) = match searched.best {
            Some(choice) => (Some(choice.pos), choice.score),
            None => (candidates.first().copied(), 0),
        };
        (best_move, score, MoveSource::Search, searched.stats)
    };

    session.cache.clear();
    if !config.dynamic_depth {
        session.depth = config.depth;
    }
    if best_move.is_some() {
        session.own_last_move = best_move;
    }

    MoveResult {
        best_move,
        score,
        source,
        depth,
        next_depth: session.depth,
        time_ms: start.elapsed().as_millis() as u64,
        stats,
    }
}

/// One side of a game: configuration plus the search session that
/// persists between its moves.
///
/// # Example
///
/// ```
/// use mnk::{Engine, EngineConfig, Pos, Stone};
///
/// let config = EngineConfig { board_size: 5, win_length: 4, own: Stone::X, ..EngineConfig::default() };
/// let mut engine = Engine::new(config).unwrap();
/// for col in 1..4 {
///     engine.apply(Pos::new(2, col), Stone::O);
/// }
/// // The opponent's open three is blocked without searching
/// let result = engine.choose_move();
/// assert!(result.best_move == Some(Pos::new(2, 0)) || result.best_move == Some(Pos::new(2, 4)));
/// ```
pub struct Engine {
    config: EngineConfig,
    session: Session,
}

impl Engine {
    /// Engine for a fresh game. Fails when the configuration is invalid.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = Session::from_config(&config);
        Ok(Self { config, session })
    }

    /// Engine for a position already in progress. The board must have the
    /// configured size and win length.
    pub fn with_board(config: EngineConfig, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.size() != config.board_size || board.win_length() != config.effective_win_length() {
            return Err(ConfigError::Invalid(format!(
                "board is {n}x{n} with {k} in a row, config expects {}x{} with {} in a row",
                config.board_size,
                config.board_size,
                config.effective_win_length(),
                n = board.size(),
                k = board.win_length(),
            )));
        }
        let session = Session::new(board, config.own, config.depth);
        Ok(Self { config, session })
    }

    /// Choose the next move without applying it
    pub fn choose_move(&mut self) -> MoveResult {
        choose_move(&mut self.session, &self.config)
    }

    /// Apply a move by either side to the shared board. The cell must be
    /// empty.
    pub fn apply(&mut self, pos: Pos, stone: Stone) {
        self.session.board.apply(pos, stone);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.session.board
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current depth budget
    #[inline]
    pub fn depth(&self) -> u32 {
        self.session.depth
    }

    /// Whether the move at `pos` ended the game by a line or a full board
    pub fn is_game_over(&self, pos: Pos) -> bool {
        let board = &self.session.board;
        board.is_winning_move(pos) || board.is_full()
    }
}
