//! Enumeration types for the lounge simulator
//!
//! This module contains the enumerations used to select arrival models, timestamp
//! interpretation, horizon handling and output formats, plus the admission states.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which stochastic arrival model drives a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrivalModel {
    /// Random passenger count per day, uniformly spread over each day
    PerDay,
    /// Premium passengers clustered before each departure of a flight schedule
    FlightSchedule,
}

impl fmt::Display for ArrivalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalModel::PerDay => write!(f, "per-day"),
            ArrivalModel::FlightSchedule => write!(f, "flight-schedule"),
        }
    }
}

impl FromStr for ArrivalModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per-day" | "perday" | "daily" => Ok(ArrivalModel::PerDay),
            "flight-schedule" | "flights" | "schedule" => Ok(ArrivalModel::FlightSchedule),
            _ => Err(format!("Unknown arrival model: {}", s)),
        }
    }
}

/// How the per-day model records arrival timestamps
///
/// `DayRelative` records `day * 24 + offset`, which is also the clock value at
/// the moment of arrival. `ClockRelative` keeps the older behaviour where the
/// clock advances by each raw offset and the recorded time adds the pre-advance
/// clock to the day term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrivalTimestamping {
    /// Sorted intraday offsets, timestamp equals clock at arrival
    #[default]
    DayRelative,
    /// Offsets in draw order, clock advances by each offset
    ClockRelative,
}

impl fmt::Display for ArrivalTimestamping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalTimestamping::DayRelative => write!(f, "day-relative"),
            ArrivalTimestamping::ClockRelative => write!(f, "clock-relative"),
        }
    }
}

impl FromStr for ArrivalTimestamping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day-relative" | "day" => Ok(ArrivalTimestamping::DayRelative),
            "clock-relative" | "clock" => Ok(ArrivalTimestamping::ClockRelative),
            _ => Err(format!("Unknown arrival timestamping: {}", s)),
        }
    }
}

/// Order in which the flight-schedule model emits premium passengers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlightOrdering {
    /// Flight by flight, seat by seat, each arrival drawn independently
    #[default]
    AsDrawn,
    /// All arrivals planned up front and emitted in time order
    Sorted,
}

impl fmt::Display for FlightOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightOrdering::AsDrawn => write!(f, "as-drawn"),
            FlightOrdering::Sorted => write!(f, "sorted"),
        }
    }
}

impl FromStr for FlightOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "as-drawn" | "asdrawn" | "drawn" => Ok(FlightOrdering::AsDrawn),
            "sorted" => Ok(FlightOrdering::Sorted),
            _ => Err(format!("Unknown flight ordering: {}", s)),
        }
    }
}

/// What happens to services still in progress when the horizon is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizonPolicy {
    /// Let admitted services finish past the horizon
    #[default]
    Drain,
    /// Drop them and count them as unresolved
    Truncate,
}

impl fmt::Display for HorizonPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HorizonPolicy::Drain => write!(f, "drain"),
            HorizonPolicy::Truncate => write!(f, "truncate"),
        }
    }
}

impl FromStr for HorizonPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drain" => Ok(HorizonPolicy::Drain),
            "truncate" => Ok(HorizonPolicy::Truncate),
            _ => Err(format!("Unknown horizon policy: {}", s)),
        }
    }
}

/// States a passenger passes through at the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceState {
    /// Asking for an attendant at the instant of arrival
    Requesting,
    /// An attendant was free and is now held
    Admitted,
    /// No attendant was free; the passenger leaves
    Rejected,
    /// Being served, holding the attendant
    InService,
    /// Service finished and the attendant released
    Completed,
}

impl ServiceState {
    /// Whether no further transition can follow this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, ServiceState::Rejected | ServiceState::Completed)
    }

    /// Whether `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: ServiceState) -> bool {
        matches!(
            (self, next),
            (ServiceState::Requesting, ServiceState::Admitted)
                | (ServiceState::Requesting, ServiceState::Rejected)
                | (ServiceState::Admitted, ServiceState::InService)
                | (ServiceState::InService, ServiceState::Completed)
        )
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Requesting => write!(f, "Requesting"),
            ServiceState::Admitted => write!(f, "Admitted"),
            ServiceState::Rejected => write!(f, "Rejected"),
            ServiceState::InService => write!(f, "In Service"),
            ServiceState::Completed => write!(f, "Completed"),
        }
    }
}

/// Output formats for rendered results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Summary,
    /// JSON document with every record
    Json,
    /// CSV tables of attended and denied passengers
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Summary => write!(f, "Summary"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" | "text" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
