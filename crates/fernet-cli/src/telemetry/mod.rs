//! Telemetry initialisation for the `fernet` CLI.
//!
//! Structured JSON logs only, no exporter. Logs never carry a secret, token,
//! or message body.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the global JSON subscriber, writing to **stderr**.
///
/// Stdout carries the command's result (a secret, a token, or raw message
/// bytes) and may be piped into another program, so log lines must not mix
/// into it.
///
/// `RUST_LOG`, when set, takes precedence over `log_level`.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install fernet log subscriber: {e}"))
}
