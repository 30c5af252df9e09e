//! # Brewsense HAL Binary
//!
//! Runs the sensor front-end tick loop against a board driver.
//!
//! # Usage
//!
//! ```bash
//! # Simulation board, scenario from the config file, until Ctrl-C
//! brewsense_hal --config config/frontend.toml
//!
//! # Replay a scenario for 3 seconds of ticks and print the final snapshot
//! brewsense_hal -c config/frontend.toml --scenario config/scenarios/bin0_empty.toml \
//!     --ticks 3000 --snapshot
//! ```

use brewsense_common::config::{FrontEndConfig, LogLevel};
use brewsense_common::consts::DEFAULT_CONFIG_PATH;
use brewsense_core::cycle::rt_setup;
use brewsense_hal::{DriverRegistry, RuntimeError, build_runner, resolve_board_config};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Brewsense HAL - sensor front-end tick loop
#[derive(Parser, Debug)]
#[command(name = "brewsense_hal")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Debounced sensor front-end with status indicators")]
struct Args {
    /// Path to the front-end configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Scenario file for the simulation board (overrides [board].scenario).
    #[arg(long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Stop after this many ticks (0 = run until signalled).
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// CPU core to pin the tick thread to (rt builds only).
    #[arg(long, default_value_t = 1)]
    cpu_core: usize,

    /// SCHED_FIFO priority (rt builds only).
    #[arg(long, default_value_t = 80)]
    rt_priority: i32,

    /// Print the final snapshot as JSON on stdout.
    #[arg(long)]
    snapshot: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let config = FrontEndConfig::load_validated(&args.config);
    setup_tracing(&args, config.as_ref().ok().map(|c| c.shared.log_level));

    info!("Brewsense HAL v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = config
        .map_err(RuntimeError::from)
        .and_then(|config| run(&args, config));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Brewsense HAL shutdown complete");
}

fn run(args: &Args, config: FrontEndConfig) -> Result<(), RuntimeError> {
    info!(
        "Config OK: service={}, tick={}µs, driver={}",
        config.shared.service_name, config.timing.tick_period_us, config.board.driver
    );

    let registry = DriverRegistry::with_builtin()?;
    let board = resolve_board_config(&config, &args.config, args.scenario.clone());
    let mut runner = build_runner(&config, &board, &registry)?;

    rt_setup(args.cpu_core, args.rt_priority)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        error!("cannot install signal handler: {e}");
    }

    let max_ticks = (args.ticks > 0).then_some(args.ticks);
    let reason = runner.run(&running, max_ticks)?;
    info!("tick loop stopped ({reason:?})");

    if args.snapshot {
        let snapshot = runner.front_end.snapshot();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("cannot serialize snapshot: {e}"),
        }
    }
    Ok(())
}

/// Setup tracing subscriber from CLI flags and the configured level.
fn setup_tracing(args: &Args, configured: Option<LogLevel>) {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        configured.unwrap_or_default()
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

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
