//! Haunted House Simulation
//!
//! Runs one session from the command line and prints the tally.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use haunt_core::config::{default_config_toml, DEFAULT_CONFIG_PATH};
use haunt_core::output::{render_json, render_text};
use haunt_core::setup::{build_house, house_to_json};
use haunt_core::{run_session, EventLogger, GhostClass, SessionConfig};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "haunted_house")]
#[command(about = "A concurrent ghost hunting simulation")]
struct Args {
    /// Configuration file (defaults to haunt.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible setup
    #[arg(long)]
    seed: Option<u64>,

    /// Number of hunters (1-4)
    #[arg(long)]
    hunters: Option<usize>,

    /// Hunter names, comma separated
    #[arg(long, value_delimiter = ',')]
    names: Vec<String>,

    /// Ghost class (poltergeist, banshee, bullies, phantom)
    #[arg(long)]
    ghost: Option<GhostClass>,

    /// Write the JSONL event log to this file
    #[arg(long)]
    events: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Print a default configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Print the house layout as JSON and exit
    #[arg(long)]
    print_house: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.print_config {
        print!("{}", default_config_toml());
        return Ok(());
    }
    if args.print_house {
        println!("{}", house_to_json(&build_house(0)));
        return Ok(());
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.session.seed = Some(seed);
    }
    if let Some(count) = args.hunters {
        config.hunters.count = count;
    }
    if !args.names.is_empty() {
        config.hunters.names = args.names;
    }
    if let Some(class) = args.ghost {
        config.ghost.class = Some(class);
    }
    config.validate()?;

    let logger = match &args.events {
        Some(path) => EventLogger::new(path)?,
        None => EventLogger::null(),
    };

    let report = run_session(config, Arc::new(logger))?;
    if args.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

/// Explicit path must exist; the default path is optional
fn load_config(path: Option<&Path>) -> Result<SessionConfig, haunt_core::ConfigError> {
    match path {
        Some(path) => SessionConfig::from_file(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                tracing::info!(path = DEFAULT_CONFIG_PATH, "loading configuration");
                SessionConfig::from_file(default)
            } else {
                Ok(SessionConfig::default())
            }
        }
    }
}
