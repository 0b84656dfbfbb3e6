//! Lounge Attendant Simulator
//!
//! A discrete-event simulation of an admission-controlled service counter,
//! such as airline lounge attendants, under stochastic passenger arrivals.
//!
//! # Overview
//!
//! Passengers arrive according to one of two models and ask for an attendant
//! exactly once. If one is idle they are served for a random duration;
//! otherwise they leave at once. A run produces one record per passenger
//! (attended or denied) and the attendants' utilization.
//!
//! ## Key Features
//!
//! - **Per-day arrivals**: a normally distributed passenger count per day with uniform times of day
//! - **Flight-schedule arrivals**: premium passengers 30 to 120 minutes ahead of each departure
//! - **Zero-wait admission**: no queue, no retries, capacity checked at the instant of arrival
//! - **Reproducible runs**: explicit seeding of every random draw
//! - **Reports**: text summary, JSON and CSV tables with optional calendar timestamps
//!
//! ## Quick Start
//!
//! ```rust
//! use lounge_attendant_simulator::*;
//!
//! let schedule = vec![ScheduleEntry::new("ACME AIR", "10:00", 5)];
//! let result = run_flight_schedule(&schedule, 5, 3.0, &RunOptions::seeded(7))?;
//!
//! assert_eq!(result.attended.len(), 5);
//! assert!(result.denied.is_empty());
//! println!("utilization: {:.1}%", result.utilization * 100.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, enums and configuration
//! - [`schedule`]: flight schedule parsing and the reference departure board
//! - [`arrivals`]: the two arrival models behind the [`ArrivalProcess`] trait
//! - [`service`]: attendant pool and the admission protocol
//! - [`simulation`]: run context, scheduler, clock, results and logging
//! - [`report`]: rendering of results
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Arrivals   │───►│   Service   │───►│ Statistics  │
//! │             │    │             │    │             │
//! │ Per-day     │    │ ServerPool  │    │ Attended    │
//! │ Flights     │    │ Admission   │    │ Denied      │
//! └─────────────┘    └─────────────┘    │ Utilization │
//!        ▲                  ▲           └─────────────┘
//!        │                  │
//! ┌──────┴──────────────────┴──────┐
//! │ SimulationEngine               │
//! │ clock · scheduler · rng · log  │
//! └────────────────────────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod arrivals;
pub mod report;
pub mod schedule;
pub mod service;
pub mod simulation;
pub mod types;

// Core types and configuration
pub use types::{
    ArrivalModel, ArrivalTimestamping, ConfigError, ConfigValidationError, FlightOrdering,
    HorizonPolicy, OutputFormat, PassengerId, ServiceState, SimulationConfig,
};

// Schedules and arrivals
pub use arrivals::{ArrivalEvent, ArrivalProcess, FlightArrivals, PerDayArrivals, PlannedArrival};
pub use schedule::{Flight, ScheduleEntry, ScheduleGenerator};

// Service protocol and outcomes
pub use service::{AdmissionProtocol, AttendedRecord, DeniedRecord, ServerPool, ServiceOutcome};

// Simulation entry points and results
pub use simulation::{
    run_config, run_flight_schedule, run_per_day, LoggingConfig, PerDayParams, RunOptions,
    SimResult, SimulationEngine, SimulationError, SimulationResult,
};
