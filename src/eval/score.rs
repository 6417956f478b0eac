//! Score constants

/// Score domain shared by minimax and alpha-beta
pub struct Score;

impl Score {
    /// The engine completed a line
    pub const WIN: i32 = 100;
    /// The opponent completed a line
    pub const LOSE: i32 = -100;
    /// Root alpha bound
    pub const NEG_INF: i32 = i32::MIN;
    /// Root beta bound
    pub const INF: i32 = i32::MAX;

    /// Terminal score for a completed line, seen from a node whose flag says
    /// whether the opponent moves next (in which case the engine just won)
    #[inline]
    pub fn terminal(minimizing: bool) -> i32 {
        if minimizing {
            Self::WIN
        } else {
            Self::LOSE
        }
    }

    #[inline]
    pub fn is_terminal(score: i32) -> bool {
        score >= Self::WIN || score <= Self::LOSE
    }
}
