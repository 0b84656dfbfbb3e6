//! Run results and the utilization metric
//!
//! A [`SimulationResult`] is built once, when a run finishes, from the run's
//! [`OutcomeLog`]. Utilization compares server-hours consumed by attended
//! passengers (counted at the configured mean service time) against the
//! server-hours the horizon makes available. It is not clamped to 1.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::service::{AttendedRecord, DeniedRecord, OutcomeLog};

/// Utilization of `attendants` servers over `horizon_hours`
///
/// Zero when there are no attendants or no horizon.
pub fn utilization(
    attended: usize,
    mean_service_time: f64,
    horizon_hours: f64,
    attendants: usize,
) -> f64 {
    if attendants == 0 || horizon_hours <= 0.0 {
        return 0.0;
    }
    (attended as f64 * mean_service_time) / (horizon_hours * attendants as f64)
}

/// Everything one run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Passengers served, in completion order
    pub attended: Vec<AttendedRecord>,
    /// Passengers turned away, in arrival order
    pub denied: Vec<DeniedRecord>,
    /// Attended server-hours over available server-hours
    pub utilization: f64,
    /// Simulated horizon in hours
    pub horizon_hours: f64,
    /// Number of attendants
    pub attendants: usize,
    /// Configured mean service time in hours
    pub mean_service_time: f64,
    /// Arrivals generated before the horizon
    pub arrivals: u64,
    /// Services still running at the horizon and dropped by truncation
    pub unresolved: u64,
}

impl SimulationResult {
    /// Aggregate a finished run
    pub fn from_log(
        log: OutcomeLog,
        horizon_hours: f64,
        attendants: usize,
        mean_service_time: f64,
        arrivals: u64,
        unresolved: u64,
    ) -> Self {
        let (attended, denied) = log.partition();
        let utilization = utilization(attended.len(), mean_service_time, horizon_hours, attendants);

        Self {
            attended,
            denied,
            utilization,
            horizon_hours,
            attendants,
            mean_service_time,
            arrivals,
            unresolved,
        }
    }

    /// Number of passengers served
    pub fn attended_count(&self) -> usize {
        self.attended.len()
    }

    /// Number of passengers turned away
    pub fn denied_count(&self) -> usize {
        self.denied.len()
    }

    /// Share of arrivals that were denied, as a percentage
    pub fn denial_percentage(&self) -> f64 {
        if self.arrivals == 0 {
            0.0
        } else {
            (self.denied.len() as f64 / self.arrivals as f64) * 100.0
        }
    }

    /// Utilization as a percentage
    pub fn utilization_percentage(&self) -> f64 {
        self.utilization * 100.0
    }

    /// Whether every arrival is accounted for
    pub fn is_conserved(&self) -> bool {
        (self.attended.len() + self.denied.len()) as u64 + self.unresolved == self.arrivals
    }

    /// Human-readable summary of the run
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Lounge Simulation Summary ===\n");
        report.push_str(&format!("Horizon: {:.1} hours\n", self.horizon_hours));
        report.push_str(&format!("Attendants: {}\n", self.attendants));
        report.push_str(&format!("Mean service time: {:.2} hours\n", self.mean_service_time));
        report.push_str(&format!("Arrivals: {}\n", self.arrivals));
        report.push_str(&format!("Served: {}\n", self.attended.len()));
        report.push_str(&format!(
            "Denied: {} ({:.1}%)\n",
            self.denied.len(),
            self.denial_percentage()
        ));
        if self.unresolved > 0 {
            report.push_str(&format!("Unresolved at horizon: {}\n", self.unresolved));
        }
        report.push_str(&format!("Utilization: {:.2}%\n", self.utilization_percentage()));
        report
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}
