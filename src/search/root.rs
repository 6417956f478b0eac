//! Root move loop shared by the sequential and parallel paths

use crate::board::Pos;
use crate::config::EngineConfig;
use crate::eval::Score;
use crate::session::Session;

use super::alphabeta::{SearchStats, Searcher};
use super::deadline::Deadline;

/// Best root move found by a loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootChoice {
    pub pos: Pos,
    pub score: i32,
    /// Position in the full candidate list, used to break ties
    pub index: usize,
}

/// How a root loop wants the depth budget to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthAdjust {
    /// The deadline cut the loop short
    Shallower,
    Keep,
    /// Finished within an eighth of the budget
    Deeper,
}

impl DepthAdjust {
    pub fn observe(timed_out: bool, deadline: &Deadline) -> Self {
        if timed_out {
            DepthAdjust::Shallower
        } else if deadline.finished_early() {
            DepthAdjust::Deeper
        } else {
            DepthAdjust::Keep
        }
    }

    /// Apply to `depth`, staying within the configured limits
    pub fn apply(self, depth: u32, config: &EngineConfig) -> u32 {
        let next = match self {
            DepthAdjust::Shallower => depth.saturating_sub(1),
            DepthAdjust::Keep => depth,
            DepthAdjust::Deeper => depth.saturating_add(1),
        };
        next.clamp(config.min_depth, config.max_depth)
    }
}

/// Outcome of one root loop
#[derive(Debug, Clone, Default)]
pub struct RootOutcome {
    pub best: Option<RootChoice>,
    pub timed_out: bool,
    pub stats: SearchStats,
}

/// Score every candidate with the session's own stone at the session's
/// depth budget.
///
/// Candidates carry their index in the full list. The first strictly
/// greater score wins, so ties go to the earliest candidate. The session's
/// board and cache are used in place; the board is restored on return.
pub fn search_root(
    session: &mut Session,
    config: &EngineConfig,
    candidates: &[(usize, Pos)],
    deadline: Deadline,
) -> RootOutcome {
    let Session {
        board,
        cache,
        own,
        depth,
        ..
    } = session;
    let (own, depth) = (*own, *depth);
    let mut searcher = Searcher::new(cache, own, config, deadline);

    let mut best: Option<RootChoice> = None;
    let mut timed_out = false;
    for &(index, pos) in candidates {
        if deadline.expired() {
            timed_out = true;
            break;
        }
        let score = {
            let mut placed = board.place(pos, own);
            if config.alpha_beta {
                searcher.alpha_beta(&mut placed, pos, depth, true, Score::NEG_INF, Score::INF)
            } else {
                searcher.minimax(&mut placed, pos, depth, true)
            }
        };
        if best.map_or(true, |b| score > b.score) {
            best = Some(RootChoice { pos, score, index });
        }
    }

    RootOutcome {
        best,
        timed_out,
        stats: searcher.into_stats(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Stone};
    use crate::config::CachePolicy;
    use std::time::Duration;

    fn indexed(moves: &[Pos]) -> Vec<(usize, Pos)> {
        moves.iter().copied().enumerate().collect()
    }

    #[test]
    fn test_depth_adjust_clamps() {
        let config = EngineConfig {
            min_depth: 2,
            max_depth: 5,
            ..EngineConfig::default()
        };
        assert_eq!(DepthAdjust::Shallower.apply(3, &config), 2);
        assert_eq!(DepthAdjust::Shallower.apply(2, &config), 2);
        assert_eq!(DepthAdjust::Deeper.apply(4, &config), 5);
        assert_eq!(DepthAdjust::Deeper.apply(5, &config), 5);
        assert_eq!(DepthAdjust::Keep.apply(4, &config), 4);
    }

    #[test]
    fn test_depth_adjust_observe() {
        assert_eq!(DepthAdjust::observe(true, &Deadline::unbounded()), DepthAdjust::Shallower);
        assert_eq!(DepthAdjust::observe(false, &Deadline::unbounded()), DepthAdjust::Deeper);
        let spent = Deadline::starting_now(Duration::ZERO);
        assert_eq!(DepthAdjust::observe(false, &spent), DepthAdjust::Keep);
    }

    #[test]
    fn test_root_takes_the_winning_cell() {
        let board = Board::parse(
            "......\nOXXX..\n......\n..O...\n......\n......",
            4,
        )
        .unwrap();
        let config = EngineConfig {
            board_size: 6,
            win_length: 4,
            depth: 2,
            cache: CachePolicy::Exact,
            ..EngineConfig::default()
        };
        let mut session = Session::new(board, Stone::X, 2);
        let candidates = session.board.candidate_moves(1);
        let outcome = search_root(&mut session, &config, &indexed(&candidates), Deadline::unbounded());

        let best = outcome.best.unwrap();
        assert_eq!(best.score, Score::WIN);
        assert_eq!(best.pos, Pos::new(1, 4));
        assert!(!outcome.timed_out);
        assert_eq!(session.board.stone_count(), 5);
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        // Nothing is in reach of a line, so every root scores the same
        let board = Board::parse("......\n......\n..X...\n......\n......\n......", 6).unwrap();
        let config = EngineConfig {
            board_size: 6,
            win_length: 6,
            depth: 1,
            cache: CachePolicy::Exact,
            ..EngineConfig::default()
        };
        let mut session = Session::new(board, Stone::O, 1);
        let candidates = session.board.candidate_moves(1);
        let outcome = search_root(&mut session, &config, &indexed(&candidates), Deadline::unbounded());

        let best = outcome.best.unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.pos, candidates[0]);
    }

    #[test]
    fn test_root_respects_deadline() {
        let board = Board::parse("....\n.X..\n....\n....", 3).unwrap();
        let config = EngineConfig {
            board_size: 4,
            win_length: 3,
            ..EngineConfig::default()
        };
        let mut session = Session::new(board, Stone::O, 4);
        let candidates = session.board.candidate_moves(1);
        let outcome = search_root(
            &mut session,
            &config,
            &indexed(&candidates),
            Deadline::starting_now(Duration::ZERO),
        );
        assert!(outcome.timed_out);
        assert!(outcome.best.is_none());
        assert_eq!(outcome.stats.nodes, 0);
    }
}
