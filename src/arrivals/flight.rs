//! Flight-schedule arrival model
//!
//! Every premium seat on a flight produces one lounge visitor who turns up
//! between 30 and 120 minutes before departure. Times that fall before midnight
//! wrap around to the end of the same day.

use rand::Rng;
use std::collections::VecDeque;
use tracing::debug;

use crate::arrivals::{ArrivalProcess, PlannedArrival};
use crate::schedule::{horizon_minutes, Flight, MINUTES_PER_DAY};
use crate::types::FlightOrdering;

/// Earliest arrival before departure, in minutes
pub const MIN_LEAD_MINUTES: f64 = 30.0;

/// Latest arrival before departure, in minutes
pub const MAX_LEAD_MINUTES: f64 = 120.0;

/// Draw one premium passenger's arrival, in minutes since midnight
pub fn draw_arrival_minute<R: Rng + ?Sized>(flight: &Flight, rng: &mut R) -> f64 {
    let lead = rng.gen_range(MIN_LEAD_MINUTES..MAX_LEAD_MINUTES);
    let minute = f64::from(flight.departure.minutes_since_midnight()) - lead;
    if minute < 0.0 {
        minute + f64::from(MINUTES_PER_DAY)
    } else {
        minute
    }
}

/// Arrival process for premium passengers of a fixed flight schedule
#[derive(Debug, Clone)]
pub struct FlightArrivals {
    flights: Vec<Flight>,
    ordering: FlightOrdering,
    horizon_minutes: u32,
    flight_index: usize,
    seat_index: u32,
    planned: Option<VecDeque<f64>>,
}

impl FlightArrivals {
    /// Create a process over already validated flights
    pub fn new(flights: Vec<Flight>, ordering: FlightOrdering) -> Self {
        let horizon_minutes = horizon_minutes(&flights);
        Self { flights, ordering, horizon_minutes, flight_index: 0, seat_index: 0, planned: None }
    }

    /// Total premium seats across the schedule
    pub fn total_seats(&self) -> u64 {
        self.flights.iter().map(|flight| u64::from(flight.premium_seats)).sum()
    }

    /// Next arrival minute in schedule order, drawing as it goes
    fn next_drawn_minute<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<f64> {
        while let Some(flight) = self.flights.get(self.flight_index) {
            if self.seat_index < flight.premium_seats {
                self.seat_index += 1;
                return Some(draw_arrival_minute(flight, rng));
            }
            debug!(
                carrier = %flight.carrier,
                departure = %flight.departure,
                seats = flight.premium_seats,
                "flight passengers planned"
            );
            self.flight_index += 1;
            self.seat_index = 0;
        }
        None
    }
}

impl ArrivalProcess for FlightArrivals {
    fn name(&self) -> &'static str {
        "flight-schedule"
    }

    fn horizon_hours(&self) -> f64 {
        f64::from(self.horizon_minutes) / 60.0
    }

    fn next_arrival<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Option<PlannedArrival> {
        let minute = match self.ordering {
            FlightOrdering::AsDrawn => self.next_drawn_minute(rng)?,
            FlightOrdering::Sorted => {
                if self.planned.is_none() {
                    let mut minutes = Vec::with_capacity(self.total_seats() as usize);
                    while let Some(minute) = self.next_drawn_minute(rng) {
                        minutes.push(minute);
                    }
                    minutes.sort_by(f64::total_cmp);
                    self.planned = Some(minutes.into());
                }
                self.planned.as_mut()?.pop_front()?
            }
        };

        Some(PlannedArrival::at(minute / 60.0, now))
    }
}
