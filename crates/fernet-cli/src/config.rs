//! Configuration loading and validation for the `fernet` CLI.
//!
//! Values come from `FERNET_`-prefixed environment variables; command-line
//! flags override them per invocation.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated CLI configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// URL-safe base64 secret (`FERNET_SECRET`).
    #[serde(default)]
    pub secret: Option<String>,

    /// Maximum token age accepted by `decrypt` (`FERNET_TTL_SECS`).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Tracing log level (`FERNET_LOG_LEVEL`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_ttl_secs() -> u64 {
    60
}
fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("FERNET"))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if let Some(secret) = &self.secret {
            if secret.trim().is_empty() {
                anyhow::bail!("FERNET_SECRET must not be empty when set");
            }
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("FERNET_LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("ttl_secs", &self.ttl_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
