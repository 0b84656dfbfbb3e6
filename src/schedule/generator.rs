//! Randomized reference departure board
//!
//! Reproduces the board the lounge front-end runs against when no schedule is
//! supplied: a fixed list of departures on one carrier, with a fresh premium
//! seat count drawn for every flight.

use rand::Rng;
use std::fmt;
use std::ops::Range;
use tracing::debug;

use crate::schedule::ScheduleEntry;

/// Carrier operating every flight of the reference board
pub const REFERENCE_CARRIER: &str = "CIA AEREA NOS ARES";

/// Departure times of the reference board
pub const REFERENCE_DEPARTURES: [&str; 20] = [
    "0:40", "1:20", "1:45", "1:50", "4:05", "9:15", "10:05", "10:35", "11:50", "13:50", "14:15",
    "14:15", "14:40", "15:30", "16:00", "17:05", "17:10", "17:40", "18:00", "18:00",
];

/// Premium seats per flight are drawn from this half-open range
pub const PREMIUM_SEAT_RANGE: Range<i64> = 20..100;

/// Generator for the randomized reference flight schedule
pub struct ScheduleGenerator {
    rng: Box<dyn rand::RngCore>,
}

impl fmt::Debug for ScheduleGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleGenerator").finish()
    }
}

impl ScheduleGenerator {
    /// Create a new schedule generator
    pub fn new() -> Self {
        Self { rng: Box::new(rand::thread_rng()) }
    }

    /// Create a new schedule generator with a specific seed for reproducible results
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self { rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)) }
    }

    /// Create a generator seeded when `seed` is given, from entropy otherwise
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Draw a fresh reference board
    pub fn generate(&mut self) -> Vec<ScheduleEntry> {
        let schedule: Vec<ScheduleEntry> = REFERENCE_DEPARTURES
            .iter()
            .map(|departure| {
                let seats = self.rng.gen_range(PREMIUM_SEAT_RANGE);
                ScheduleEntry::new(REFERENCE_CARRIER, *departure, seats)
            })
            .collect();

        debug!(
            "Generated reference schedule with {} flights and {} premium seats",
            schedule.len(),
            schedule.iter().map(|entry| entry.seats).sum::<i64>()
        );
        schedule
    }
}

impl Default for ScheduleGenerator {
    fn default() -> Self {
        Self::new()
    }
}
