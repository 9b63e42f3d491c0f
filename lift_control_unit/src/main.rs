//! # Lift Control Unit
//!
//! Loads the lift configuration, builds the selected HAL driver, and runs
//! the fixed-rate control loop until Ctrl-C or the cycle budget is spent.
//! The hardware is always left braked on exit.

use clap::Parser;
use lift_common::config::LogLevel;
use lift_common::consts::DEFAULT_CONFIG_PATH;
use lift_common::lift::level::Level;
use lift_control_unit::config::load_config;
use lift_control_unit::command::resolver::MoveRequest;
use lift_control_unit::controller::LiftController;
use lift_control_unit::cycle::CycleRunner;
use lift_hal::DriverRegistry;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level as TraceLevel, debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Lift Control Unit: actuator position control loop
#[derive(Parser, Debug)]
#[command(name = "lift_control_unit")]
#[command(version)]
#[command(about = "Fixed-rate position control loop for an elevator lift")]
struct Args {
    /// Path to the lift configuration TOML.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// HAL driver to use.
    #[arg(long, default_value = "simulation")]
    driver: String,

    /// Stop after this many cycles (default: run until Ctrl-C).
    #[arg(long)]
    cycles: Option<u64>,

    /// Preset to move to once homed (bottom, l1, l2, low_ball, l3, high_ball, l4).
    #[arg(long)]
    target: Option<Level>,

    /// Carriage height [m] to move to once homed.
    #[arg(long, conflicts_with = "target")]
    height: Option<f64>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            setup_tracing(&args, LogLevel::default());
            error!("FATAL: {}: {e}", args.config.display());
            process::exit(1);
        }
    };
    setup_tracing(&args, config.shared.log_level);

    info!(
        "Lift Control Unit v{} starting ({})",
        env!("CARGO_PKG_VERSION"),
        config.shared.service_name
    );

    if let Err(e) = run(&args, &config) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Lift Control Unit shutdown complete");
}

fn run(
    args: &Args,
    config: &lift_common::lift::config::LiftConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Config OK: cycle_time={}µs, creep_power={}, followers={}",
        config.control.cycle_time_us,
        config.control.creep_power,
        config.followers.len(),
    );

    let registry = DriverRegistry::with_builtin();
    debug!("Registered drivers: {}", registry.list_drivers().join(", "));
    let devices = registry.create_devices(&args.driver, config)?;
    let controller = LiftController::new(devices.motor, devices.limit, config)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let mut runner = CycleRunner::new(controller, &config.control, running);
    if let Some(n) = args.cycles {
        runner = runner.with_max_cycles(n);
    }
    if let Some(level) = args.target {
        info!("Will move to {level} once homed");
        runner.request_move(level);
    }
    if let Some(meters) = args.height {
        info!("Will move to {meters:.3} m once homed");
        runner.request_move(MoveRequest::Height(meters));
    }

    let stats = runner.run()?;
    let ctl = runner.controller();
    info!(
        cycles = stats.cycle_count,
        overruns = stats.overruns,
        homing = %ctl.homing_state(),
        position = ctl.measured_or_sentinel(),
        "Final state"
    );
    Ok(())
}

/// Setup tracing subscriber from CLI flags, falling back to the config level.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let directive: Directive = if args.verbose {
        TraceLevel::DEBUG.into()
    } else {
        configured
            .as_str()
            .parse()
            .unwrap_or_else(|_| TraceLevel::INFO.into())
    };

    let filter = EnvFilter::from_default_env().add_directive(directive);

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
