//! Pipeline simulator CLI.
//!
//! This binary runs an assembly program on the five-stage pipeline model. It performs:
//! 1. **Setup:** Loads the JSON configuration, the program and optional initial state files.
//! 2. **Run:** Ticks the pipeline until it drains, logging through `tracing`.
//! 3. **Report:** Prints statistics and final register/memory state as text or JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pipesim_core::common::SimError;
use pipesim_core::config::Config;
use pipesim_core::{Report, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-accurate five-stage pipeline simulator",
    long_about = "Run an assembly program through a five-stage in-order pipeline with a blocking data cache.\n\nExamples:\n  pipesim run program\n  pipesim run program --reg-state reg_state --memory-state memory_state\n  pipesim run program --config cfg.json --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion and print the report.
    Run {
        /// Assembly program file.
        program: PathBuf,

        /// Register-state file (`xN = value` for every register).
        #[arg(long)]
        reg_state: Option<PathBuf>,

        /// Memory-state file (`address = value` lines).
        #[arg(long)]
        memory_state: Option<PathBuf>,

        /// JSON configuration file; built-in defaults when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Emit a cycle-by-cycle pipeline trace.
        #[arg(long)]
        trace: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            program,
            reg_state,
            memory_state,
            config,
            json,
            trace,
        } => {
            init_logging(trace);
            match cmd_run(&program, reg_state, memory_state, config, trace) {
                Ok(report) => print_report(&report, json),
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Installs the `fmt` subscriber on stderr. `RUST_LOG` wins unless `--trace`
/// is given.
fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("pipesim_core=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Builds the simulator from the command-line inputs and runs it.
fn cmd_run(
    program: &Path,
    reg_state: Option<PathBuf>,
    memory_state: Option<PathBuf>,
    config_path: Option<PathBuf>,
    trace: bool,
) -> Result<Report, SimError> {
    let mut config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(&path).map_err(|source| SimError::Io { path, source })?;
            Config::from_json(&text)?
        }
        None => Config::default(),
    };
    config.general.trace |= trace;
    debug!(?config, "configuration");

    let mut sim = Simulator::from_file(&config, program)?;
    if let Some(path) = reg_state {
        sim = sim.with_register_file(path)?;
    }
    if let Some(path) = memory_state {
        sim = sim.with_memory_file(path)?;
    }
    sim.run()
}

fn print_report(report: &Report, json: bool) -> ExitCode {
    if !json {
        print!("{report}");
        return ExitCode::SUCCESS;
    }
    match serde_json::to_string_pretty(report) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: failed to serialize report: {e}");
            ExitCode::FAILURE
        }
    }
}
