//! Arrival events and the generator contract

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::PassengerId;

/// A passenger arriving at the counter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrivalEvent {
    /// Passenger identity, assigned in generation order
    pub passenger: PassengerId,
    /// Recorded arrival time in hours since the start of the run
    pub arrival_time: f64,
}

/// The next arrival a generator wants to emit
///
/// `spawn_at` is the clock value at which the generator resumes and hands the
/// passenger to the counter. `arrival_time` is the timestamp recorded for the
/// passenger. They coincide unless the model records a different timestamp or
/// the drawn time already lies behind the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedArrival {
    /// Absolute clock time of the spawn, never earlier than the clock at planning time
    pub spawn_at: f64,
    /// Timestamp recorded on the passenger's outcome
    pub arrival_time: f64,
}

impl PlannedArrival {
    /// Plan an arrival whose recorded time is also its spawn time, clamped to `now`
    pub fn at(time: f64, now: f64) -> Self {
        Self { spawn_at: time.max(now), arrival_time: time }
    }

    /// Suspension from `now` until the spawn
    pub fn gap(&self, now: f64) -> f64 {
        (self.spawn_at - now).max(0.0)
    }
}

/// A stochastic source of passenger arrivals
///
/// The scheduler pulls one arrival at a time: it resumes the process at the
/// previous arrival's spawn time and asks for the next one, so generation is
/// lazy and interleaved with service activity.
pub trait ArrivalProcess {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Length of the simulated horizon in hours
    fn horizon_hours(&self) -> f64;

    /// Plan the next arrival given the current clock, or `None` when exhausted
    fn next_arrival<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Option<PlannedArrival>;
}

/// Iterator adapter that drives an [`ArrivalProcess`] without a counter
///
/// The clock follows each spawn, exactly as the scheduler would advance it.
/// Useful for inspecting the arrival stream of a model on its own.
pub struct ArrivalIter<'r, P, R: ?Sized> {
    process: P,
    rng: &'r mut R,
    now: f64,
}

impl<P, R: ?Sized> std::fmt::Debug for ArrivalIter<'_, P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrivalIter").field("now", &self.now).finish()
    }
}

impl<'r, P: ArrivalProcess, R: Rng + ?Sized> ArrivalIter<'r, P, R> {
    /// Wrap `process`, drawing from `rng`
    pub fn new(process: P, rng: &'r mut R) -> Self {
        Self { process, rng, now: 0.0 }
    }
}

impl<P: ArrivalProcess, R: Rng + ?Sized> Iterator for ArrivalIter<'_, P, R> {
    type Item = PlannedArrival;

    fn next(&mut self) -> Option<Self::Item> {
        let planned = self.process.next_arrival(self.now, self.rng)?;
        self.now = self.now.max(planned.spawn_at);
        Some(planned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planned_arrival_clamps_to_now() {
        let planned = PlannedArrival::at(3.0, 5.0);
        assert_eq!(planned.spawn_at, 5.0);
        assert_eq!(planned.arrival_time, 3.0);
        assert_eq!(planned.gap(5.0), 0.0);

        let planned = PlannedArrival::at(7.5, 5.0);
        assert_eq!(planned.spawn_at, 7.5);
        assert_eq!(planned.gap(5.0), 2.5);
    }

    #[test]
    fn test_arrival_event_serializes_passenger_label() {
        let event = ArrivalEvent { passenger: PassengerId::new(3), arrival_time: 1.25 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"passenger":"PAX_000003","arrival_time":1.25}"#);
    }
}
