//! Simulated time.
//!
//! The solver runs on a fixed step, so simulated time is just a step
//! counter scaled by the step length. Time is kept in whole milliseconds;
//! spawn intervals are compared exactly, never through float rounding.
//!
//! # Example
//!
//! ```ignore
//! use sph2d::time::SimClock;
//!
//! let mut clock = SimClock::new(10);
//! for _ in 0..50 {
//!     clock.advance();
//! }
//! assert_eq!(clock.elapsed_ms(), 500);
//! assert!(clock.is_multiple_of(500));
//! ```

use std::time::Duration;

/// Fixed-step simulation clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimClock {
    /// Total simulated time in milliseconds.
    elapsed_ms: u64,
    /// Steps completed so far.
    steps: u64,
    /// Length of one step in milliseconds.
    dt_ms: u32,
}

impl SimClock {
    /// Create a clock at time zero with a step of `dt_ms` milliseconds.
    pub fn new(dt_ms: u32) -> Self {
        Self {
            elapsed_ms: 0,
            steps: 0,
            dt_ms,
        }
    }

    /// Total simulated time.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    /// Total simulated time in milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Number of completed steps.
    #[inline]
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Step length.
    #[inline]
    pub fn dt(&self) -> Duration {
        Duration::from_millis(self.dt_ms as u64)
    }

    /// Move forward by one step.
    pub fn advance(&mut self) {
        self.elapsed_ms += self.dt_ms as u64;
        self.steps += 1;
    }

    /// Whether the elapsed time is an exact multiple of `interval_ms`.
    ///
    /// Always true at time zero. A zero interval never matches.
    #[inline]
    pub fn is_multiple_of(&self, interval_ms: u32) -> bool {
        interval_ms != 0 && self.elapsed_ms % interval_ms as u64 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = SimClock::new(10);
        assert_eq!(clock.step_count(), 0);
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert_eq!(clock.dt(), Duration::from_millis(10));
    }

    #[test]
    fn test_clock_advance() {
        let mut clock = SimClock::new(10);
        for _ in 0..3 {
            clock.advance();
        }
        assert_eq!(clock.step_count(), 3);
        assert_eq!(clock.elapsed(), Duration::from_millis(30));
    }

    #[test]
    fn test_is_multiple_of() {
        let mut clock = SimClock::new(10);
        assert!(clock.is_multiple_of(500));
        clock.advance();
        assert!(!clock.is_multiple_of(500));
        for _ in 1..50 {
            clock.advance();
        }
        assert_eq!(clock.elapsed_ms(), 500);
        assert!(clock.is_multiple_of(500));
        assert!(!clock.is_multiple_of(0));
    }

    #[test]
    fn test_interval_not_aligned_with_step() {
        // 7 ms steps only hit a 10 ms interval at multiples of 70 ms.
        let mut clock = SimClock::new(7);
        let mut hits = Vec::new();
        for _ in 0..25 {
            clock.advance();
            if clock.is_multiple_of(10) {
                hits.push(clock.elapsed_ms());
            }
        }
        assert_eq!(hits, vec![70, 140]);
    }
}
