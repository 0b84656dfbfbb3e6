//! Virtual simulation clock
//!
//! Time is measured in hours relative to the start of the run. The clock only
//! moves forward; requests to move it backwards leave it where it is.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Monotonic virtual clock owned by one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationClock {
    now: f64,
}

impl SimulationClock {
    /// Create a clock at hour zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in hours
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance by `delta` hours; negative or non-finite deltas are ignored
    pub fn advance_by(&mut self, delta: f64) -> f64 {
        if delta.is_finite() && delta > 0.0 {
            self.now += delta;
            trace!(now = self.now, delta, "clock advanced");
        }
        self.now
    }

    /// Advance to `time` if it lies in the future
    pub fn advance_to(&mut self, time: f64) -> f64 {
        if time.is_finite() && time > self.now {
            trace!(from = self.now, to = time, "clock advanced");
            self.now = time;
        }
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_zero() {
        assert_eq!(SimulationClock::new().now(), 0.0);
    }

    #[test]
    fn test_advance_by_accumulates() {
        let mut clock = SimulationClock::new();
        clock.advance_by(1.5);
        clock.advance_by(2.0);
        assert_eq!(clock.now(), 3.5);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut clock = SimulationClock::new();
        clock.advance_to(10.0);
        assert_eq!(clock.advance_to(4.0), 10.0);
        assert_eq!(clock.advance_by(-3.0), 10.0);
        assert_eq!(clock.advance_by(f64::NAN), 10.0);
        assert_eq!(clock.advance_to(f64::INFINITY), 10.0);
        assert_eq!(clock.advance_to(12.0), 12.0);
    }
}
