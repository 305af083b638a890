//! # northpole
//!
//! Command-line front end for the workshop simulation.
//!
//! ```bash
//! northpole <elf_count> <reindeer_count> <elf_work_ms> <reindeer_vacation_ms>
//! ```
//!
//! Writes the event journal to `northpole.out` in the working directory
//! (truncated at start). Exit code 0 on clean completion of every actor;
//! 1 on argument, spawn, or journal failure. Diagnostics go to stderr via
//! `tracing` and are controlled with `RUST_LOG`.

use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;

use northpole::{run, SimulationConfig};

/// Journal file, truncated at every start.
const JOURNAL_FILE: &str = "northpole.out";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match SimulationConfig::from_cli() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}");
            process::exit(1);
        }
    };

    if let Err(error) = run(&config, Path::new(JOURNAL_FILE)) {
        eprintln!("error: {error}");
        process::exit(1);
    }
}
