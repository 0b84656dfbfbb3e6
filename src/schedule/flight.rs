//! Flight schedule entries and departure times
//!
//! A [`ScheduleEntry`] is the raw `(carrier, "H:MM", seats)` triple as it arrives
//! from a config file or a caller. [`Flight`] is its validated form.

use crate::types::ConfigValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one day
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minutes after the last departure at which the flight-model horizon ends
pub const HORIZON_PADDING_MINUTES: u32 = 60;

/// One row of a flight schedule as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Operating carrier
    pub carrier: String,
    /// Departure time in `H:MM` form
    pub departure: String,
    /// Number of premium seats sold on this flight
    pub seats: i64,
}

impl ScheduleEntry {
    /// Create a schedule entry
    pub fn new(carrier: impl Into<String>, departure: impl Into<String>, seats: i64) -> Self {
        Self { carrier: carrier.into(), departure: departure.into(), seats }
    }
}

/// Departure time of day, stored as minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepartureTime(u32);

impl DepartureTime {
    /// Build a departure time from hours and minutes
    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        if hours < 24 && minutes < 60 {
            Some(Self(hours * 60 + minutes))
        } else {
            None
        }
    }

    /// Minutes since midnight
    pub fn minutes_since_midnight(&self) -> u32 {
        self.0
    }

    /// Hours since midnight
    pub fn hours_since_midnight(&self) -> f64 {
        f64::from(self.0) / 60.0
    }
}

impl FromStr for DepartureTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hours, minutes) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("missing ':' in departure time: {}", s))?;

        let parse_part = |part: &str| -> Result<u32, String> {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("invalid departure time: {}", s));
            }
            part.parse::<u32>().map_err(|e| e.to_string())
        };

        let hours = parse_part(hours)?;
        let minutes = parse_part(minutes)?;
        Self::from_hm(hours, minutes).ok_or_else(|| format!("departure time out of range: {}", s))
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A validated flight with a parsed departure time and a seat count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    /// Operating carrier
    pub carrier: String,
    /// Departure time of day
    pub departure: DepartureTime,
    /// Premium seats, one potential lounge visitor each
    pub premium_seats: u32,
}

impl TryFrom<&ScheduleEntry> for Flight {
    type Error = ConfigValidationError;

    fn try_from(entry: &ScheduleEntry) -> Result<Self, Self::Error> {
        let departure = entry.departure.parse::<DepartureTime>().map_err(|_| {
            ConfigValidationError::InvalidDepartureTime {
                carrier: entry.carrier.clone(),
                value: entry.departure.clone(),
            }
        })?;

        let premium_seats = u32::try_from(entry.seats).map_err(|_| {
            ConfigValidationError::NegativeSeatCount {
                carrier: entry.carrier.clone(),
                departure: entry.departure.clone(),
                seats: entry.seats,
            }
        })?;

        Ok(Self { carrier: entry.carrier.clone(), departure, premium_seats })
    }
}

/// Validate every entry of a schedule
pub fn parse_schedule(entries: &[ScheduleEntry]) -> Result<Vec<Flight>, ConfigValidationError> {
    entries.iter().map(Flight::try_from).collect()
}

/// Flight-model horizon in minutes: last departure plus one hour, or zero when empty
pub fn horizon_minutes(flights: &[Flight]) -> u32 {
    flights
        .iter()
        .map(|flight| flight.departure.minutes_since_midnight())
        .max()
        .map_or(0, |last| last + HORIZON_PADDING_MINUTES)
}
