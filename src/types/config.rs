//! Configuration structures for the lounge simulator
//!
//! This module contains the simulation configuration structure, the command line
//! arguments, config-file loading and the validation logic that guards the core.

use super::{ArrivalModel, ArrivalTimestamping, FlightOrdering, HorizonPolicy, OutputFormat};
use crate::schedule::{Flight, ScheduleEntry};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameter bounds used by the interactive front-end of the reference deployment
///
/// The core accepts any non-negative value; these only bound the sliders.
pub mod reference_bounds {
    /// Smallest selectable number of days
    pub const MIN_DAYS: i64 = 10;
    /// Largest selectable number of days
    pub const MAX_DAYS: i64 = 365;
    /// Smallest selectable number of attendants
    pub const MIN_ATTENDANTS: i64 = 0;
    /// Largest selectable number of attendants
    pub const MAX_ATTENDANTS: i64 = 10;
    /// Smallest selectable mean of passengers per day
    pub const MIN_PASSENGERS_PER_DAY: f64 = 1.0;
    /// Largest selectable mean of passengers per day
    pub const MAX_PASSENGERS_PER_DAY: f64 = 50.0;
    /// Smallest selectable mean service time in hours
    pub const MIN_SERVICE_HOURS: f64 = 1.0;
    /// Largest selectable mean service time in hours
    pub const MAX_SERVICE_HOURS: f64 = 5.0;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lounge-attendant-simulator",
    version,
    about = "Lounge Attendant Simulator - zero-wait admission control for premium passengers",
    long_about = "Simulates passengers arriving at a lounge counter staffed by a fixed number of attendants. A passenger who finds no free attendant leaves immediately. Reports served and denied passengers and attendant utilization.

EXAMPLES:
    # Run the per-day model with default settings
    lounge-attendant-simulator

    # Per-day model over a year with five attendants
    lounge-attendant-simulator --days 365 --attendants 5

    # Flight-schedule model with the randomized reference departure board
    lounge-attendant-simulator --model flights --attendants 4

    # Flight-schedule model with a schedule file
    lounge-attendant-simulator --model flights --schedule flights.json

    # Reproducible run with JSON output
    lounge-attendant-simulator --seed 42 --output-format json

    # Generate configuration template
    lounge-attendant-simulator --print-config > my-config.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Arrival model to simulate
    #[arg(
        short,
        long,
        help = "Arrival model (per-day or flights)",
        long_help = "Which arrival model drives the run: per-day (random count per day) or flights (premium passengers before each departure). Default: per-day"
    )]
    pub model: Option<ArrivalModel>,

    /// Number of days to simulate
    #[arg(long, allow_negative_numbers = true, help = "Number of days to simulate (per-day model)")]
    pub days: Option<i64>,

    /// Number of attendants at the counter
    #[arg(
        short,
        long,
        allow_negative_numbers = true,
        help = "Number of attendants",
        long_help = "Number of attendants serving the counter. Zero is valid and denies every passenger. Default: 3"
    )]
    pub attendants: Option<i64>,

    /// Mean number of passengers per day
    #[arg(long, allow_negative_numbers = true, help = "Mean passengers per day (per-day model)")]
    pub avg_passengers: Option<f64>,

    /// Mean service time in hours
    #[arg(long, allow_negative_numbers = true, help = "Mean service time in hours")]
    pub avg_service_time: Option<f64>,

    /// Flight schedule file
    #[arg(
        long,
        help = "Flight schedule file (JSON array)",
        long_help = "JSON array of {\"carrier\", \"departure\", \"seats\"} entries. Without it the flight model uses the reference departure board with randomized premium seats."
    )]
    pub schedule: Option<String>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Timestamp interpretation for the per-day model
    #[arg(long, help = "Arrival timestamping (day-relative or clock-relative)")]
    pub timestamping: Option<ArrivalTimestamping>,

    /// Emission order for the flight model
    #[arg(long, help = "Flight arrival ordering (as-drawn or sorted)")]
    pub flight_ordering: Option<FlightOrdering>,

    /// Handling of services still running at the horizon
    #[arg(long, help = "Horizon policy (drain or truncate)")]
    pub horizon_policy: Option<HorizonPolicy>,

    /// Output format for results
    #[arg(long, help = "Output format (summary, json or csv)")]
    pub output_format: Option<OutputFormat>,

    /// Calendar date of simulation hour zero
    #[arg(
        long,
        help = "Calendar date of hour zero (YYYY-MM-DD)",
        long_help = "When set, relative hours in the output are also rendered as calendar timestamps starting at midnight of this date."
    )]
    pub start_date: Option<NaiveDate>,

    /// Directory for rolling log files
    #[arg(long, help = "Also write JSON logs to this directory")]
    pub log_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Arrival model to simulate
    pub model: Option<ArrivalModel>,

    /// Number of days to simulate
    pub num_days: Option<i64>,

    /// Number of attendants
    pub num_attendants: Option<i64>,

    /// Mean passengers per day
    pub avg_passengers_per_day: Option<f64>,

    /// Mean service time in hours
    pub avg_service_time: Option<f64>,

    /// Fixed flight schedule
    pub schedule: Option<Vec<ScheduleEntry>>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Timestamp interpretation for the per-day model
    pub timestamping: Option<ArrivalTimestamping>,

    /// Emission order for the flight model
    pub flight_ordering: Option<FlightOrdering>,

    /// Handling of services still running at the horizon
    pub horizon_policy: Option<HorizonPolicy>,

    /// Output format for results
    pub output_format: Option<OutputFormat>,

    /// Calendar date of hour zero
    pub start_date: Option<NaiveDate>,
}

/// Configuration for the lounge simulation
///
/// Counts are signed so that negative values coming from a config file or the
/// command line are reported as validation errors rather than parse failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Arrival model to simulate
    pub model: ArrivalModel,

    /// Number of days to simulate (per-day model)
    pub num_days: i64,

    /// Number of attendants at the counter
    pub num_attendants: i64,

    /// Mean passengers per day (per-day model)
    pub avg_passengers_per_day: f64,

    /// Mean service time in hours
    pub avg_service_time: f64,

    /// Fixed flight schedule; `None` uses the randomized reference board
    pub schedule: Option<Vec<ScheduleEntry>>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Timestamp interpretation for the per-day model
    pub timestamping: ArrivalTimestamping,

    /// Emission order for the flight model
    pub flight_ordering: FlightOrdering,

    /// Handling of services still running at the horizon
    pub horizon_policy: HorizonPolicy,

    /// Output format for results
    pub output_format: OutputFormat,

    /// Calendar date of hour zero, used only when rendering
    pub start_date: Option<NaiveDate>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    /// Days count is negative
    #[error("Number of days must not be negative, got {0}")]
    NegativeDays(i64),

    /// Attendant count is negative
    #[error("Number of attendants must not be negative, got {0}")]
    NegativeAttendants(i64),

    /// Mean passengers per day is negative or not finite
    #[error("Mean passengers per day must be a finite non-negative number, got {0}")]
    InvalidMeanArrivals(f64),

    /// Mean service time is negative or not finite
    #[error("Mean service time must be a finite non-negative number of hours, got {0}")]
    InvalidServiceTime(f64),

    /// Departure time could not be parsed as H:MM
    #[error("Invalid departure time '{value}' for carrier {carrier} (expected H:MM)")]
    InvalidDepartureTime {
        /// Carrier of the offending schedule entry
        carrier: String,
        /// The unparseable time string
        value: String,
    },

    /// Seat count is negative
    #[error("Premium seat count for {carrier} at {departure} must not be negative, got {seats}")]
    NegativeSeatCount {
        /// Carrier of the offending schedule entry
        carrier: String,
        /// Departure time of the offending schedule entry
        departure: String,
        /// The negative seat count
        seats: i64,
    },

    /// A sampling distribution could not be built from the parameters
    #[error("Invalid {name} distribution: {reason}")]
    InvalidDistribution {
        /// Which distribution failed
        name: &'static str,
        /// Why it failed
        reason: String,
    },
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            model: ArrivalModel::PerDay,
            num_days: 100,
            num_attendants: 3,
            avg_passengers_per_day: 10.0,
            avg_service_time: 3.0,
            schedule: None,
            seed: None,
            timestamping: ArrivalTimestamping::default(),
            flight_ordering: FlightOrdering::default(),
            horizon_policy: HorizonPolicy::default(),
            output_format: OutputFormat::default(),
            start_date: None,
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // A schedule file replaces any schedule from the config file
        if let Some(schedule_path) = &args.schedule {
            config.schedule = Some(load_schedule_file(schedule_path)?);
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = read_json_file(path)?;
        let config_file: ConfigFile = serde_json::from_str(&content)?;
        Ok(Self::from_config_file(config_file))
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            model: config_file.model.unwrap_or(defaults.model),
            num_days: config_file.num_days.unwrap_or(defaults.num_days),
            num_attendants: config_file.num_attendants.unwrap_or(defaults.num_attendants),
            avg_passengers_per_day: config_file
                .avg_passengers_per_day
                .unwrap_or(defaults.avg_passengers_per_day),
            avg_service_time: config_file.avg_service_time.unwrap_or(defaults.avg_service_time),
            schedule: config_file.schedule.or(defaults.schedule),
            seed: config_file.seed.or(defaults.seed),
            timestamping: config_file.timestamping.unwrap_or(defaults.timestamping),
            flight_ordering: config_file.flight_ordering.unwrap_or(defaults.flight_ordering),
            horizon_policy: config_file.horizon_policy.unwrap_or(defaults.horizon_policy),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            start_date: config_file.start_date.or(defaults.start_date),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.model {
            config.model = value;
        }
        if let Some(value) = args.days {
            config.num_days = value;
        }
        if let Some(value) = args.attendants {
            config.num_attendants = value;
        }
        if let Some(value) = args.avg_passengers {
            config.avg_passengers_per_day = value;
        }
        if let Some(value) = args.avg_service_time {
            config.avg_service_time = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.timestamping {
            config.timestamping = value;
        }
        if let Some(value) = args.flight_ordering {
            config.flight_ordering = value;
        }
        if let Some(value) = args.horizon_policy {
            config.horizon_policy = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if let Some(value) = args.start_date {
            config.start_date = Some(value);
        }
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.num_attendants < 0 {
            return Err(ConfigValidationError::NegativeAttendants(self.num_attendants));
        }

        validate_mean_service_time(self.avg_service_time)?;

        match self.model {
            ArrivalModel::PerDay => {
                if self.num_days < 0 {
                    return Err(ConfigValidationError::NegativeDays(self.num_days));
                }
                validate_mean_arrivals(self.avg_passengers_per_day)?;
            }
            ArrivalModel::FlightSchedule => {
                if let Some(schedule) = &self.schedule {
                    for entry in schedule {
                        Flight::try_from(entry)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Whether the configured values sit inside the reference front-end bounds
    pub fn within_reference_bounds(&self) -> bool {
        use reference_bounds::*;
        (MIN_DAYS..=MAX_DAYS).contains(&self.num_days)
            && (MIN_ATTENDANTS..=MAX_ATTENDANTS).contains(&self.num_attendants)
            && (MIN_PASSENGERS_PER_DAY..=MAX_PASSENGERS_PER_DAY)
                .contains(&self.avg_passengers_per_day)
            && (MIN_SERVICE_HOURS..=MAX_SERVICE_HOURS).contains(&self.avg_service_time)
    }
}

/// Reject a negative or non-finite mean number of daily arrivals
pub(crate) fn validate_mean_arrivals(value: f64) -> Result<(), ConfigValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigValidationError::InvalidMeanArrivals(value));
    }
    Ok(())
}

/// Reject a negative or non-finite mean service time
pub(crate) fn validate_mean_service_time(value: f64) -> Result<(), ConfigValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigValidationError::InvalidServiceTime(value));
    }
    Ok(())
}

/// Load a flight schedule from a JSON array file
pub fn load_schedule_file<P: AsRef<Path>>(path: P) -> Result<Vec<ScheduleEntry>, ConfigError> {
    let content = read_json_file(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

fn read_json_file(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(fs::read_to_string(path)?),
        Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
    }
}
