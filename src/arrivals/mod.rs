//! Passenger arrival generation
//!
//! Two interchangeable [`ArrivalProcess`] implementations feed the counter:
//!
//! - **PerDayArrivals**: a random passenger count per day with uniform times of day
//! - **FlightArrivals**: premium passengers arriving 30 to 120 minutes before departure
//!
//! # Usage Example
//!
//! ```rust
//! use lounge_attendant_simulator::arrivals::*;
//! use lounge_attendant_simulator::types::ArrivalTimestamping;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let process = PerDayArrivals::new(3, 10.0, ArrivalTimestamping::DayRelative).unwrap();
//! for arrival in ArrivalIter::new(process, &mut rng) {
//!     assert!(arrival.arrival_time < 72.0);
//! }
//! ```

pub mod event;
pub mod flight;
pub mod per_day;

pub use event::*;
pub use flight::*;
pub use per_day::*;
