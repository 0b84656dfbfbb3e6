//! Per-passenger outcome records
//!
//! Outcomes are appended in the order they resolve: a denial resolves at the
//! moment of arrival, a service when it completes.

use serde::{Deserialize, Serialize};

use crate::types::PassengerId;

/// A passenger who got an attendant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendedRecord {
    /// Passenger identity
    pub passenger: PassengerId,
    /// Recorded arrival time in hours
    pub arrival_time: f64,
    /// Clock value when service started
    pub start_time: f64,
    /// Clock value when service ended
    pub end_time: f64,
}

impl AttendedRecord {
    /// Hours spent with the attendant
    pub fn service_duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// A passenger who found every attendant busy and left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeniedRecord {
    /// Passenger identity
    pub passenger: PassengerId,
    /// Recorded arrival time in hours
    pub arrival_time: f64,
}

/// Outcome of one passenger's visit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ServiceOutcome {
    /// Served by an attendant
    Attended(AttendedRecord),
    /// Turned away
    Denied(DeniedRecord),
}

impl ServiceOutcome {
    /// Passenger this outcome belongs to
    pub fn passenger(&self) -> PassengerId {
        match self {
            ServiceOutcome::Attended(record) => record.passenger,
            ServiceOutcome::Denied(record) => record.passenger,
        }
    }

    /// Recorded arrival time
    pub fn arrival_time(&self) -> f64 {
        match self {
            ServiceOutcome::Attended(record) => record.arrival_time,
            ServiceOutcome::Denied(record) => record.arrival_time,
        }
    }

    /// Whether the passenger was served
    pub fn is_attended(&self) -> bool {
        matches!(self, ServiceOutcome::Attended(_))
    }
}

/// Append-only log of outcomes for one run
#[derive(Debug, Clone, Default)]
pub struct OutcomeLog {
    outcomes: Vec<ServiceOutcome>,
}

impl OutcomeLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome
    pub fn push(&mut self, outcome: ServiceOutcome) {
        self.outcomes.push(outcome);
    }

    /// All outcomes in resolution order
    pub fn outcomes(&self) -> &[ServiceOutcome] {
        &self.outcomes
    }

    /// Number of outcomes recorded
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Split into attended and denied records, keeping resolution order
    pub fn partition(self) -> (Vec<AttendedRecord>, Vec<DeniedRecord>) {
        let mut attended = Vec::new();
        let mut denied = Vec::new();
        for outcome in self.outcomes {
            match outcome {
                ServiceOutcome::Attended(record) => attended.push(record),
                ServiceOutcome::Denied(record) => denied.push(record),
            }
        }
        (attended, denied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attended(index: u64, start: f64, end: f64) -> ServiceOutcome {
        ServiceOutcome::Attended(AttendedRecord {
            passenger: PassengerId::new(index),
            arrival_time: start,
            start_time: start,
            end_time: end,
        })
    }

    fn denied(index: u64, at: f64) -> ServiceOutcome {
        ServiceOutcome::Denied(DeniedRecord { passenger: PassengerId::new(index), arrival_time: at })
    }

    #[test]
    fn test_partition_keeps_order() {
        let mut log = OutcomeLog::new();
        log.push(denied(1, 2.0));
        log.push(attended(0, 1.0, 4.0));
        log.push(denied(2, 3.0));
        assert_eq!(log.len(), 3);

        let (served, turned_away) = log.partition();
        assert_eq!(served.len(), 1);
        assert_eq!(served[0].service_duration(), 3.0);
        let ids: Vec<_> = turned_away.iter().map(|d| d.passenger.index()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = attended(4, 1.5, 2.5);
        assert!(outcome.is_attended());
        assert_eq!(outcome.passenger(), PassengerId::new(4));
        assert_eq!(outcome.arrival_time(), 1.5);
        assert!(!denied(5, 0.5).is_attended());
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let json = serde_json::to_string(&denied(3, 0.5)).unwrap();
        assert_eq!(json, r#"{"outcome":"denied","passenger":"PAX_000003","arrival_time":0.5}"#);
    }
}
