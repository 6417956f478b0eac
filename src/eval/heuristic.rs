//! Static leaf evaluation

use crate::board::{Board, Pos};
use crate::rules::ThreatLevel;

/// Heuristic value of a leaf reached by `last_move`.
///
/// The value is the number of threats the move created, positive when the
/// engine made the move (the opponent is to move, `minimizing`) and negative
/// when the opponent made it.
pub fn leaf_score(board: &Board, last_move: Pos, minimizing: bool) -> i32 {
    threat_score(board.scan_threats(last_move, None).level, minimizing)
}

/// [`leaf_score`] for a threat level that was already scanned
#[inline]
pub fn threat_score(level: ThreatLevel, minimizing: bool) -> i32 {
    if minimizing {
        level.count()
    } else {
        -level.count()
    }
}
