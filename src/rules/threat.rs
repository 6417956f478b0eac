//! One-move-from-win threat detection
//!
//! A threat is an empty cell that would complete a line of `k` stones. The
//! scan looks along the four lines through a move; on each side it walks
//! the run of same-colored stones, and if the run stops at an empty cell it
//! keeps counting stones past that gap, since filling the gap joins them.
//!
//! Each line through the move adds at most one threat. The forward side is
//! judged on its own run, the backward side on the run through the move in
//! both directions. Threats on two or more lines cannot all be blocked and
//! are reported as [`ThreatLevel::Winning`], the same level as an already
//! completed line.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

use super::win::run_length;

/// How close a move is to winning
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThreatLevel {
    /// No completing cell in reach
    None,
    /// Exactly one completing cell
    Single,
    /// Line already complete, or two or more completing cells
    Winning,
}

impl ThreatLevel {
    #[inline]
    fn from_count(count: usize) -> Self {
        match count {
            0 => ThreatLevel::None,
            1 => ThreatLevel::Single,
            _ => ThreatLevel::Winning,
        }
    }

    /// Number of threats this level stands for, used as a leaf heuristic
    #[inline]
    pub fn count(self) -> i32 {
        match self {
            ThreatLevel::None => 0,
            ThreatLevel::Single => 1,
            ThreatLevel::Winning => 2,
        }
    }

    #[inline]
    pub fn is_threat(self) -> bool {
        self != ThreatLevel::None
    }
}

/// Result of [`Board::scan_threats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatScan {
    pub level: ThreatLevel,
    /// A cell that completes a line; the last one found when there are
    /// several. `None` when no gap threat was seen.
    pub endpoint: Option<Pos>,
}

impl ThreatScan {
    const CLEAR: ThreatScan = ThreatScan {
        level: ThreatLevel::None,
        endpoint: None,
    };
}

/// One side of a line, walking away from the scanned move
struct Side {
    run: usize,
    gap: Option<Pos>,
    beyond: usize,
}

/// Threats along one line through the move
enum LineThreats {
    Complete,
    Open { threat: bool, endpoint: Option<Pos> },
}

fn scan_side(board: &Board, pos: Pos, dr: i32, dc: i32, stone: Stone) -> Side {
    let limit = board.win_length() - 1;
    let mut run = 0;
    let mut gap = None;
    let mut step = 1;
    while step <= limit {
        let Some(next) = pos.offset(dr, dc, step as i32, board.size()) else {
            break;
        };
        match board.get(next) {
            s if s == stone => run += 1,
            Stone::Empty => {
                gap = Some(next);
                break;
            }
            _ => break,
        }
        step += 1;
    }

    let beyond = match gap {
        Some(gap_pos) => run_length(board, gap_pos, dr, dc, stone, limit - step),
        None => 0,
    };
    Side { run, gap, beyond }
}

fn line_threats(board: &Board, pos: Pos, dr: i32, dc: i32, stone: Stone) -> LineThreats {
    let k = board.win_length();
    let forward = scan_side(board, pos, dr, dc, stone);
    let backward = scan_side(board, pos, -dr, -dc, stone);

    let line = 1 + forward.run + backward.run;
    if line >= k {
        return LineThreats::Complete;
    }

    let mut threat = false;
    let mut endpoint = None;
    if let Some(gap) = forward.gap {
        if 1 + forward.run + 1 + forward.beyond >= k {
            threat = true;
            endpoint = Some(gap);
        }
    }

    // With no gap behind the move, the forward gap is the one that would
    // finish the whole line
    let (gap, reach) = match backward.gap {
        Some(gap) => (Some(gap), line + backward.beyond),
        None => (forward.gap, line),
    };
    if let Some(gap) = gap {
        if reach + 1 >= k {
            threat = true;
            endpoint = Some(gap);
        }
    }
    LineThreats::Open { threat, endpoint }
}

impl Board {
    /// Count the lines through `pos` that one more stone would complete.
    ///
    /// `stone` overrides the color being scanned; by default it is the
    /// stone on `pos`. Scanning an empty cell with an explicit stone asks
    /// what placing it there would threaten.
    pub fn scan_threats(&self, pos: Pos, stone: Option<Stone>) -> ThreatScan {
        let stone = stone.unwrap_or_else(|| self.get(pos));
        if stone == Stone::Empty {
            return ThreatScan::CLEAR;
        }

        let mut count = 0;
        let mut endpoint = None;
        for &(dr, dc) in &DIRECTIONS {
            match line_threats(self, pos, dr, dc, stone) {
                LineThreats::Complete => {
                    return ThreatScan {
                        level: ThreatLevel::Winning,
                        endpoint,
                    };
                }
                LineThreats::Open { threat, endpoint: cell } => {
                    if threat {
                        count += 1;
                        endpoint = cell;
                    }
                }
            }
        }

        ThreatScan {
            level: ThreatLevel::from_count(count),
            endpoint,
        }
    }
}
