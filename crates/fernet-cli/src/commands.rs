//! Subcommand execution.
//!
//! Each subcommand is one call into the `fernet` library with the current
//! wall-clock time. Input not given as a flag is read from stdin.

use std::io::Read;
use std::time::{Duration, SystemTime};

use clap::Subcommand;
use fernet::FernetError;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::output::{ErrorResponse, Output};

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print a new random secret.
    GenerateSecret,

    /// Issue a token for a message (read from stdin unless --message is given).
    Encrypt {
        /// Secret to sign and encrypt with; overrides FERNET_SECRET.
        #[arg(long)]
        secret: Option<String>,

        /// Message to encrypt.
        #[arg(long)]
        message: Option<String>,
    },

    /// Verify a token and print its message (read from stdin unless --token is given).
    Decrypt {
        /// Secret the token was issued with; overrides FERNET_SECRET.
        #[arg(long)]
        secret: Option<String>,

        /// Maximum token age in seconds; overrides FERNET_TTL_SECS.
        #[arg(long)]
        ttl_secs: Option<u64>,

        /// Token to verify.
        #[arg(long)]
        token: Option<String>,
    },
}

/// Errors produced while running a subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The codec rejected the input.
    #[error(transparent)]
    Token(#[from] FernetError),

    /// Neither `--secret` nor `FERNET_SECRET` was provided.
    #[error("no secret configured: pass --secret or set FERNET_SECRET")]
    MissingSecret,

    /// Reading input from stdin failed.
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] std::io::Error),
}

impl CommandError {
    /// Error body safe to show to whoever supplied the input.
    ///
    /// Codec failures use [`FernetError::public_code`], so a bad MAC and bad
    /// padding look identical.
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            CommandError::Token(e) => {
                let code = e.public_code();
                let message = if code == "invalid_token" {
                    "token is invalid".to_string()
                } else {
                    e.to_string()
                };
                ErrorResponse::new(code, message)
            }
            CommandError::MissingSecret => ErrorResponse::new("missing_secret", self.to_string()),
            CommandError::Stdin(_) => ErrorResponse::new("io_error", self.to_string()),
        }
    }
}

/// Run `command` against `cfg`, reading any missing input from `stdin`.
pub fn run<R: Read>(command: &Command, cfg: &Config, stdin: R) -> Result<Output, CommandError> {
    match command {
        Command::GenerateSecret => {
            let secret = fernet::random_secret()?;
            info!("secret generated");
            Ok(Output::Secret(secret))
        }
        Command::Encrypt { secret, message } => {
            let secret = resolve_secret(secret.as_deref(), cfg)?;
            let message = match message {
                Some(m) => m.clone().into_bytes(),
                None => read_all(stdin)?,
            };
            let token = fernet::encrypt(&message, secret, SystemTime::now())?;
            info!(bytes = message.len(), "token issued");
            Ok(Output::Token(token))
        }
        Command::Decrypt {
            secret,
            ttl_secs,
            token,
        } => {
            let secret = resolve_secret(secret.as_deref(), cfg)?;
            let ttl_secs = ttl_secs.unwrap_or(cfg.ttl_secs);
            let token = match token {
                Some(t) => t.clone(),
                None => String::from_utf8_lossy(&read_all(stdin)?).into_owned(),
            };
            let message = fernet::decrypt(
                token.trim(),
                secret,
                SystemTime::now(),
                Duration::from_secs(ttl_secs),
            )
            .map_err(|e| {
                warn!(code = e.code(), ttl_secs, "token rejected");
                e
            })?;
            info!(bytes = message.len(), ttl_secs, "token verified");
            Ok(Output::Message(message))
        }
    }
}

fn resolve_secret<'a>(flag: Option<&'a str>, cfg: &'a Config) -> Result<&'a str, CommandError> {
    flag.or(cfg.secret.as_deref())
        .ok_or(CommandError::MissingSecret)
}

fn read_all<R: Read>(mut stdin: R) -> Result<Vec<u8>, CommandError> {
    let mut buf = Vec::new();
    stdin.read_to_end(&mut buf)?;
    debug!(bytes = buf.len(), "read input from stdin");
    Ok(buf)
}
