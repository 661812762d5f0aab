//! `fernet`: operator CLI entry point.
//!
//! Startup sequence:
//! 1. Parse command-line arguments.
//! 2. Load and validate [`Config`] from environment variables.
//! 3. Initialise structured JSON logging on stderr.
//! 4. Run the subcommand and write its result to stdout.

mod commands;
mod config;
mod output;
mod telemetry;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use commands::Command;
use config::Config;

/// Issue and verify authenticated, timestamped tokens.
#[derive(Debug, Parser)]
#[command(name = "fernet", version, about)]
struct Cli {
    /// Print results and errors as JSON objects.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<ExitCode> {
    // -----------------------------------------------------------------------
    // 1. Arguments
    // -----------------------------------------------------------------------
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    debug!(version = env!("CARGO_PKG_VERSION"), ttl_secs = cfg.ttl_secs, "fernet starting");

    // -----------------------------------------------------------------------
    // 4. Command
    // -----------------------------------------------------------------------
    match commands::run(&cli.command, &cfg, io::stdin().lock()) {
        Ok(out) => {
            output::write_output(&mut io::stdout().lock(), &out, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let resp = e.to_response();
            if cli.json {
                output::write_error(&mut io::stdout().lock(), &resp)?;
            } else {
                eprintln!("error: {}", resp.message);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
