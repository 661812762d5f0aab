//! Command results and how they are written to stdout.
//!
//! Plain mode prints secrets and tokens on one line each and message bytes
//! verbatim. `--json` mode prints a single JSON object per invocation.

use std::io::Write;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// A freshly generated secret.
    Secret(String),
    /// A freshly issued token.
    Token(String),
    /// The message recovered from a token.
    Message(Vec<u8>),
}

// ---------------------------------------------------------------------------
// JSON bodies
// ---------------------------------------------------------------------------

/// JSON body for `generate-secret`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretResponse {
    pub secret: String,
}

/// JSON body for `encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// JSON body for `decrypt`. Non-UTF-8 bytes are replaced with U+FFFD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// JSON body written when a command fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"token_expired"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Write `out` to `w` in plain or JSON form.
pub fn write_output<W: Write>(w: &mut W, out: &Output, json: bool) -> Result<()> {
    if json {
        let body = match out {
            Output::Secret(secret) => serde_json::to_value(SecretResponse {
                secret: secret.clone(),
            }),
            Output::Token(token) => serde_json::to_value(TokenResponse {
                token: token.clone(),
            }),
            Output::Message(bytes) => serde_json::to_value(MessageResponse {
                message: String::from_utf8_lossy(bytes).into_owned(),
            }),
        }
        .context("failed to serialise output")?;
        serde_json::to_writer(&mut *w, &body).context("failed to write output")?;
        writeln!(w).context("failed to write output")?;
    } else {
        match out {
            Output::Secret(s) | Output::Token(s) => {
                writeln!(w, "{s}").context("failed to write output")?
            }
            Output::Message(bytes) => w.write_all(bytes).context("failed to write output")?,
        }
    }
    w.flush().context("failed to flush output")
}

/// Write a failure report to `w` as JSON.
pub fn write_error<W: Write>(w: &mut W, err: &ErrorResponse) -> Result<()> {
    serde_json::to_writer(&mut *w, err).context("failed to serialise error")?;
    writeln!(w).context("failed to write error")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(out: &Output, json: bool) -> Vec<u8> {
        let mut buf = Vec::new();
        write_output(&mut buf, out, json).unwrap();
        buf
    }

    #[test]
    fn plain_token_is_one_line() {
        assert_eq!(render(&Output::Token("gAAA".into()), false), b"gAAA\n");
    }

    #[test]
    fn plain_message_is_verbatim() {
        let bytes = vec![0xff, b'a', 0x00];
        assert_eq!(render(&Output::Message(bytes.clone()), false), bytes);
    }

    #[test]
    fn json_token() {
        let buf = render(&Output::Token("gAAA".into()), true);
        let decoded: TokenResponse = serde_json::from_slice(&buf).unwrap();
        assert_eq!(decoded.token, "gAAA");
    }

    #[test]
    fn json_secret() {
        let buf = render(&Output::Secret("c2VjcmV0".into()), true);
        let decoded: SecretResponse = serde_json::from_slice(&buf).unwrap();
        assert_eq!(decoded.secret, "c2VjcmV0");
    }

    #[test]
    fn json_message_is_lossy_utf8() {
        let buf = render(&Output::Message(vec![b'h', b'i', 0xff]), true);
        let decoded: MessageResponse = serde_json::from_slice(&buf).unwrap();
        assert_eq!(decoded.message, "hi\u{fffd}");
    }

    #[test]
    fn error_response_round_trip() {
        let mut buf = Vec::new();
        write_error(&mut buf, &ErrorResponse::new("invalid_token", "token rejected")).unwrap();
        let decoded: ErrorResponse = serde_json::from_slice(&buf).unwrap();
        assert_eq!(decoded.code, "invalid_token");
        assert!(decoded.message.contains("rejected"));
    }
}
