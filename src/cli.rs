//! Command line interface for ljdrift

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::physics::integrators::{IntegratorRegistry, UpdateOrder};

/// ljdrift - integrator drift study for a 2D Lennard-Jones cluster
#[derive(Parser, Debug, Default)]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_DATE"), ")"),
    about,
    long_about = None
)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Simulated end time in nanoseconds (overrides config file)
    #[arg(short = 'e', long, value_name = "NS")]
    pub end_time: Option<f64>,

    /// Timestep in femtoseconds; repeat for several (overrides config file)
    #[arg(short = 't', long = "timestep", value_name = "FS")]
    pub timesteps: Vec<f64>,

    /// Integrator to compare; repeat for several (e.g. explicit_euler, verlet)
    #[arg(short = 'i', long = "integrator", value_name = "NAME")]
    pub integrators: Vec<String>,

    /// Directory for the drift tables
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip the position tables
    #[arg(long)]
    pub no_positions: bool,

    /// How particles within one step see their neighbours
    #[arg(long, value_enum, value_name = "ORDER")]
    pub update_order: Option<UpdateOrder>,

    /// Write the effective configuration to FILE and continue
    #[arg(long, value_name = "FILE")]
    pub write_config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,
}

/// Installs the fmt subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Handles the --list-integrators flag by printing available integrators
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::new();
    println!("Available integrators:");
    for name in registry.list_available() {
        if let Ok(integrator) = registry.create(&name) {
            println!(
                "  - {name} (order {}, {})",
                integrator.order(),
                if integrator.symplectic() {
                    "symplectic"
                } else {
                    "not symplectic"
                }
            );
        }
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        SimulationConfig::load(config_path)?
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(end_time) = args.end_time {
        info!("Overriding end time to: {end_time} ns");
        config.run.end_time_ns = end_time;
    }

    if !args.timesteps.is_empty() {
        info!("Overriding timesteps to: {:?} fs", args.timesteps);
        config.run.timesteps_fs = args.timesteps.clone();
    }

    if !args.integrators.is_empty() {
        // Validate integrator names against registry
        let registry = IntegratorRegistry::new();
        for name in &args.integrators {
            registry.create(name)?;
        }
        info!("Using integrators: {}", args.integrators.join(", "));
        config.run.integrators = args.integrators.clone();
    }

    if let Some(dir) = &args.output_dir {
        config.output.directory = dir.clone();
    }

    if args.no_positions {
        config.run.record_positions = false;
    }

    if let Some(order) = args.update_order {
        info!("Using update order: {order:?}");
        config.run.update_order = order;
    }

    config.validate()?;
    Ok(config)
}
