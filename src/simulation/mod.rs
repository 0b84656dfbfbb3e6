//! Simulation run context, scheduling and results
//!
//! # Overview
//!
//! - **SimulationEngine**: per-run context driving arrivals and services in time order
//! - **EventScheduler**: priority queue of pending resumptions, arrivals before completions at equal times
//! - **SimulationClock**: monotonic virtual clock in hours
//! - **SimulationResult**: attended and denied records plus the utilization metric
//! - **SimulationError**: error type of the run entry points
//! - **LoggingConfig**: `tracing` subscriber setup
//!
//! # Usage Example
//!
//! ```rust
//! use lounge_attendant_simulator::simulation::*;
//!
//! let params = PerDayParams {
//!     num_days: 10,
//!     num_attendants: 3,
//!     avg_passengers_per_day: 10.0,
//!     avg_service_time: 3.0,
//! };
//! let result = run_per_day(&params, &RunOptions::seeded(42)).unwrap();
//! assert_eq!(result.attended.len() + result.denied.len(), result.arrivals as usize);
//! ```

pub mod clock;
pub mod engine;
pub mod error;
pub mod logging;
pub mod scheduler;
pub mod statistics;

pub use clock::*;
pub use engine::*;
pub use error::*;
pub use logging::*;
pub use scheduler::*;
pub use statistics::*;
