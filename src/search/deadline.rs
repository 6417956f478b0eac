//! Wall-clock budget for one move

use std::time::{Duration, Instant};

/// A start instant plus a budget. Sampled cooperatively between sibling
/// expansions, so a search may overrun it by at most one subtree.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    #[inline]
    pub fn new(start: Instant, budget: Duration) -> Self {
        Self { start, budget }
    }

    #[inline]
    pub fn starting_now(budget: Duration) -> Self {
        Self::new(Instant::now(), budget)
    }

    /// A deadline that is never reached in practice
    pub fn unbounded() -> Self {
        Self::starting_now(Duration::from_secs(u32::MAX as u64))
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.elapsed() >= self.budget
    }

    /// Finished within an eighth of the budget
    #[inline]
    pub fn finished_early(&self) -> bool {
        self.elapsed() < self.budget / 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_is_expired() {
        let deadline = Deadline::starting_now(Duration::ZERO);
        assert!(deadline.expired());
        assert!(!deadline.finished_early());
    }

    #[test]
    fn test_unbounded_is_not_expired() {
        let deadline = Deadline::unbounded();
        assert!(!deadline.expired());
        assert!(deadline.finished_early());
    }
}
