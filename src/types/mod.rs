//! Core types and identifiers for the lounge simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: sequential passenger identifiers
//! - **Enums**: arrival models, timestamping and horizon policies, admission states
//! - **Configuration**: simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use lounge_attendant_simulator::types::*;
//!
//! let config = SimulationConfig {
//!     num_days: 30,
//!     num_attendants: 2,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//!
//! let model: ArrivalModel = "flights".parse().unwrap();
//! assert_eq!(model, ArrivalModel::FlightSchedule);
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
