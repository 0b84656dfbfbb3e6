//! Flight schedules for the premium-passenger arrival model
//!
//! - **ScheduleEntry**: raw `(carrier, "H:MM", seats)` rows
//! - **Flight** / **DepartureTime**: validated rows
//! - **ScheduleGenerator**: the randomized reference departure board
//!
//! # Usage Example
//!
//! ```rust
//! use lounge_attendant_simulator::schedule::*;
//!
//! let entries = vec![ScheduleEntry::new("ACME", "10:00", 5)];
//! let flights = parse_schedule(&entries).unwrap();
//! assert_eq!(horizon_minutes(&flights), 660);
//!
//! let board = ScheduleGenerator::with_seed(1).generate();
//! assert_eq!(board.len(), 20);
//! ```

pub mod flight;
pub mod generator;

pub use flight::*;
pub use generator::*;
