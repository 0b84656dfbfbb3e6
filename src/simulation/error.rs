//! Error types and handling
//!
//! This module contains the error type returned by simulation runs and the
//! report layer.

use thiserror::Error;

use crate::types::{ConfigError, ConfigValidationError};

/// Errors that can occur during a simulation run or while presenting it
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Run parameters were rejected before the run started
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigValidationError),

    /// Configuration or schedule file could not be loaded
    #[error("Configuration loading failed: {0}")]
    ConfigLoad(#[from] ConfigError),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// CSV rendering error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Result could not be rendered
    #[error("Report error: {0}")]
    ReportError(String),
}

impl SimulationError {
    /// Create a report error
    pub fn report_error(msg: impl Into<String>) -> Self {
        Self::ReportError(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::InvalidConfiguration(_) => "Configuration",
            SimulationError::ConfigLoad(_) => "Configuration Loading",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
            SimulationError::CsvError(_) | SimulationError::ReportError(_) => "Report",
        }
    }
}

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimulationError>;
