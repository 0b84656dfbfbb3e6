//! Per-day arrival model
//!
//! Each day draws a passenger count from `Normal(mean, 2)` (rounded, floored at
//! zero) and gives every passenger a uniform time of day.
//!
//! Times are drawn one passenger at a time, so memory does not grow with the
//! daily count. Day-relative runs need the day's times in ascending order;
//! they are produced directly as successive order statistics: the minimum of
//! `k` uniforms on `[x, 1)` is `x + (1 - x) * (1 - V^(1/k))` for `V ~ U(0, 1]`.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::arrivals::{ArrivalProcess, PlannedArrival};
use crate::types::{ArrivalTimestamping, ConfigValidationError};

/// Hours in one simulated day
pub const HOURS_PER_DAY: f64 = 24.0;

/// Standard deviation of the daily passenger count
pub const DAILY_COUNT_STD_DEV: f64 = 2.0;

/// Largest day fraction below one
const MAX_DAY_FRACTION: f64 = 1.0 - f64::EPSILON;

/// Arrival process drawing a random number of passengers per day
#[derive(Debug, Clone)]
pub struct PerDayArrivals {
    days: u64,
    daily_count: Normal<f64>,
    timestamping: ArrivalTimestamping,
    next_day: u64,
    current_day: u64,
    remaining: u64,
    /// Day fraction of the previous sorted draw
    last_fraction: f64,
}

impl PerDayArrivals {
    /// Create a per-day process over `days` days with `mean_per_day` passengers on average
    pub fn new(
        days: u64,
        mean_per_day: f64,
        timestamping: ArrivalTimestamping,
    ) -> Result<Self, ConfigValidationError> {
        crate::types::config::validate_mean_arrivals(mean_per_day)?;
        let daily_count = Normal::new(mean_per_day, DAILY_COUNT_STD_DEV).map_err(|e| {
            ConfigValidationError::InvalidDistribution {
                name: "daily passenger count",
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            days,
            daily_count,
            timestamping,
            next_day: 0,
            current_day: 0,
            remaining: 0,
            last_fraction: 0.0,
        })
    }

    /// Number of simulated days
    pub fn days(&self) -> u64 {
        self.days
    }

    /// Passengers still to come on the current day
    pub fn remaining_today(&self) -> u64 {
        self.remaining
    }

    /// Draw the passenger count for `day`
    fn open_day<R: Rng + ?Sized>(&mut self, day: u64, rng: &mut R) {
        // Float-to-int casts saturate, so huge means give a huge count, not a wrap
        let count = self.daily_count.sample(rng).round().max(0.0) as u64;

        debug!(day, passengers = count, "opened simulated day");
        self.current_day = day;
        self.remaining = count;
        self.last_fraction = 0.0;
    }

    /// Next intraday offset in hours; consumes one of the day's passengers
    fn draw_offset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let left = self.remaining as f64;
        self.remaining -= 1;

        match self.timestamping {
            ArrivalTimestamping::DayRelative => {
                let v: f64 = 1.0 - rng.gen::<f64>();
                // 1 - V^(1/k), computed without cancellation for large k
                let step = -(v.ln() / left).exp_m1();
                let x = self.last_fraction;
                self.last_fraction = (x + (1.0 - x) * step).min(MAX_DAY_FRACTION);
                self.last_fraction * HOURS_PER_DAY
            }
            ArrivalTimestamping::ClockRelative => rng.gen_range(0.0..HOURS_PER_DAY),
        }
    }
}

impl ArrivalProcess for PerDayArrivals {
    fn name(&self) -> &'static str {
        "per-day"
    }

    fn horizon_hours(&self) -> f64 {
        self.days as f64 * HOURS_PER_DAY
    }

    fn next_arrival<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Option<PlannedArrival> {
        while self.remaining == 0 {
            if self.next_day >= self.days {
                return None;
            }
            let day = self.next_day;
            self.next_day += 1;
            self.open_day(day, rng);
        }

        let offset = self.draw_offset(rng);
        let day_start = self.current_day as f64 * HOURS_PER_DAY;
        let planned = match self.timestamping {
            ArrivalTimestamping::DayRelative => PlannedArrival::at(day_start + offset, now),
            // The clock moves by the raw offset while the record adds the day term
            ArrivalTimestamping::ClockRelative => PlannedArrival {
                spawn_at: now + offset,
                arrival_time: now + day_start + offset,
            },
        };
        Some(planned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::ArrivalIter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_days_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let process = PerDayArrivals::new(0, 10.0, ArrivalTimestamping::DayRelative).unwrap();
        assert_eq!(process.horizon_hours(), 0.0);
        assert_eq!(ArrivalIter::new(process, &mut rng).count(), 0);
    }

    #[test]
    fn test_daily_count_tracks_mean() {
        let mut rng = StdRng::seed_from_u64(2);
        let quiet = PerDayArrivals::new(50, 0.0, ArrivalTimestamping::DayRelative).unwrap();
        let quiet_count = ArrivalIter::new(quiet, &mut rng).count();

        let busy = PerDayArrivals::new(50, 20.0, ArrivalTimestamping::DayRelative).unwrap();
        let busy_count = ArrivalIter::new(busy, &mut rng).count();

        // Around 40 versus around 1000
        assert!(quiet_count < busy_count);
        assert!(busy_count > 500);
    }

    #[test]
    fn test_invalid_mean_is_rejected() {
        assert!(PerDayArrivals::new(3, -1.0, ArrivalTimestamping::DayRelative).is_err());
        assert!(PerDayArrivals::new(3, f64::INFINITY, ArrivalTimestamping::DayRelative).is_err());
    }

    #[test]
    fn test_day_relative_arrivals_are_ordered_and_inside_horizon() {
        let mut rng = StdRng::seed_from_u64(3);
        let process = PerDayArrivals::new(20, 12.0, ArrivalTimestamping::DayRelative).unwrap();
        let horizon = process.horizon_hours();
        let arrivals: Vec<_> = ArrivalIter::new(process, &mut rng).collect();

        assert!(!arrivals.is_empty());
        for pair in arrivals.windows(2) {
            assert!(pair[0].arrival_time <= pair[1].arrival_time);
        }
        for arrival in &arrivals {
            assert_eq!(arrival.spawn_at, arrival.arrival_time);
            assert!(arrival.arrival_time >= 0.0 && arrival.arrival_time < horizon);
        }
    }

    #[test]
    fn test_clock_relative_advances_by_offsets() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut process = PerDayArrivals::new(1, 10.0, ArrivalTimestamping::ClockRelative).unwrap();

        // Day zero: the recorded time is pre-advance clock plus the offset
        let now = 5.0;
        if let Some(first) = process.next_arrival(now, &mut rng) {
            let offset = first.spawn_at - now;
            assert!((0.0..HOURS_PER_DAY).contains(&offset));
            assert!((first.arrival_time - (now + offset)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_clock_relative_day_term_is_added() {
        let mut rng = StdRng::seed_from_u64(5);
        // Mean of 40 makes an empty first day practically impossible
        let mut process = PerDayArrivals::new(2, 40.0, ArrivalTimestamping::ClockRelative).unwrap();

        let mut now = 0.0;
        let mut last = None;
        while let Some(planned) = process.next_arrival(now, &mut rng) {
            now = planned.spawn_at;
            last = Some(planned);
        }
        // The second day's records sit 24 hours ahead of the clock
        let last = last.unwrap();
        assert!((last.arrival_time - (last.spawn_at + HOURS_PER_DAY)).abs() < 1e-9);
    }

    #[test]
    fn test_huge_daily_mean_is_generated_lazily() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut process = PerDayArrivals::new(1, 1e13, ArrivalTimestamping::DayRelative).unwrap();

        let first = process.next_arrival(0.0, &mut rng).unwrap();
        assert!(process.remaining_today() > 9_000_000_000_000);

        let mut previous = first.arrival_time;
        for _ in 0..10_000 {
            let planned = process.next_arrival(previous, &mut rng).unwrap();
            assert!(planned.arrival_time >= previous);
            assert!(planned.arrival_time < HOURS_PER_DAY);
            previous = planned.arrival_time;
        }
        // Ten thousand out of ten trillion barely leave midnight
        assert!(previous < 1e-3);
    }

    #[test]
    fn test_sorted_offsets_are_uniform_over_the_day() {
        let mut rng = StdRng::seed_from_u64(7);
        let process = PerDayArrivals::new(200, 30.0, ArrivalTimestamping::DayRelative).unwrap();
        let offsets: Vec<f64> = ArrivalIter::new(process, &mut rng)
            .map(|planned| planned.arrival_time % HOURS_PER_DAY)
            .collect();

        let mean = offsets.iter().sum::<f64>() / offsets.len() as f64;
        assert!((mean - 12.0).abs() < 0.5);
        let morning = offsets.iter().filter(|offset| **offset < 12.0).count() as f64;
        assert!((morning / offsets.len() as f64 - 0.5).abs() < 0.03);
    }
}
