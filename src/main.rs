// Lounge Attendant Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/lounge-attendant-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/lounge-attendant-simulator --model flights --attendants 4 --seed 42 --verbose
// ```

use anyhow::{Context, Result};
use clap::Parser;
use lounge_attendant_simulator::report;
use lounge_attendant_simulator::simulation::{run_config, LoggingConfig};
use lounge_attendant_simulator::types::config::CliArgs;
use lounge_attendant_simulator::types::{ArrivalModel, SimulationConfig};
use std::process;
use std::time::Instant;
use tracing::{error, info, warn, Level};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = init_logging(&args) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Initialize logging based on CLI flags
fn init_logging(args: &CliArgs) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = if args.debug {
        Level::DEBUG
    } else if args.verbose {
        Level::INFO
    } else {
        // Default: minimal logging for normal users
        Level::WARN
    };

    match &args.log_dir {
        Some(dir) => LoggingConfig::new().with_level(level).with_file_logging(dir.clone()).init(),
        None if args.debug => LoggingConfig::init_debug(),
        None if args.verbose => LoggingConfig::init_verbose(),
        None => LoggingConfig::new().with_level(level).init(),
    }
}

fn run(args: CliArgs) -> Result<()> {
    info!("Starting Lounge Attendant Simulator");

    // Load configuration from CLI arguments and optional config file
    let config = SimulationConfig::from_cli_args(args.clone())
        .context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if !config.within_reference_bounds() {
        warn!("Parameters fall outside the reference front-end bounds");
    }

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_startup_banner(&config);

    let start_time = Instant::now();
    let result = run_config(&config).context("Simulation run failed")?;
    info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "simulation completed");

    let rendered = report::render(&result, config.output_format, config.start_date)
        .context("Failed to render results")?;
    print!("{}", rendered);

    info!("Lounge Attendant Simulator completed successfully");
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Lounge Attendant Simulator");
    eprintln!("==========================");
    eprintln!("Zero-wait admission control for premium passengers");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Arrival Model: {}", config.model);
    match config.model {
        ArrivalModel::PerDay => {
            eprintln!("  Days: {}", config.num_days);
            eprintln!("  Mean Passengers per Day: {:.1}", config.avg_passengers_per_day);
            eprintln!("  Timestamping: {}", config.timestamping);
        }
        ArrivalModel::FlightSchedule => {
            match &config.schedule {
                Some(schedule) => eprintln!("  Flights: {}", schedule.len()),
                None => eprintln!("  Flights: reference departure board"),
            }
            eprintln!("  Flight Ordering: {}", config.flight_ordering);
        }
    }
    eprintln!("  Attendants: {}", config.num_attendants);
    eprintln!("  Mean Service Time: {:.1} hours", config.avg_service_time);
    eprintln!("  Horizon Policy: {}", config.horizon_policy);
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    if let Some(start_date) = config.start_date {
        eprintln!("  Start Date: {}", start_date);
    }
    eprintln!();
}
