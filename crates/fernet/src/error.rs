//! Error taxonomy for token encoding and decoding.

use thiserror::Error;

use crate::keys::SECRET_LEN;

/// Every way an encode, decode, or secret-generation call can fail.
///
/// Each variant is terminal for the call that produced it; no partial
/// results are ever returned. Display strings never include key material,
/// plaintext, or byte offsets.
///
/// [`FernetError::code`] names the precise kind. Surfaces that report errors
/// to untrusted parties should use [`FernetError::public_code`] instead, which
/// folds authentication and padding failures into one category:
/// - [`FernetError::AuthenticationFailed`] → `"invalid_token"`
/// - [`FernetError::InvalidPadding`] → `"invalid_token"`
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FernetError {
    /// The secret is not valid URL-safe base64.
    #[error("secret is not valid url-safe base64")]
    InvalidSecretEncoding,

    /// The decoded secret is not exactly [`SECRET_LEN`] bytes.
    #[error("secret must decode to {SECRET_LEN} bytes, got {0}")]
    InvalidSecretLength(usize),

    /// The IV source failed while encoding.
    #[error("failed to generate IV")]
    IvGenerationFailed,

    /// The token text is not valid URL-safe base64.
    #[error("token is not valid url-safe base64")]
    InvalidTokenEncoding,

    /// The decoded token is shorter than the fixed minimum.
    #[error("token is too short")]
    TokenTooShort,

    /// The version byte is not the one this codec understands.
    #[error("unsupported token version")]
    UnsupportedVersion,

    /// The token is older than the caller's TTL.
    #[error("token has expired")]
    TokenExpired,

    /// The token claims to be issued too far in the future.
    #[error("token timestamp is too far in the future")]
    ClockSkewRejected,

    /// The ciphertext is not a positive multiple of the cipher block size.
    #[error("ciphertext is not a multiple of the block size")]
    MalformedCiphertext,

    /// The authentication tag does not match.
    #[error("token authentication failed")]
    AuthenticationFailed,

    /// The decrypted plaintext carries invalid padding.
    #[error("invalid padding")]
    InvalidPadding,

    /// The OS entropy source failed while generating a secret.
    #[error("failed to generate secret")]
    SecretGenerationFailed,
}

impl FernetError {
    /// Stable snake_case code for this exact error kind.
    pub fn code(&self) -> &'static str {
        match self {
            FernetError::InvalidSecretEncoding => "invalid_secret_encoding",
            FernetError::InvalidSecretLength(_) => "invalid_secret_length",
            FernetError::IvGenerationFailed => "iv_generation_failed",
            FernetError::InvalidTokenEncoding => "invalid_token_encoding",
            FernetError::TokenTooShort => "token_too_short",
            FernetError::UnsupportedVersion => "unsupported_version",
            FernetError::TokenExpired => "token_expired",
            FernetError::ClockSkewRejected => "clock_skew_rejected",
            FernetError::MalformedCiphertext => "malformed_ciphertext",
            FernetError::AuthenticationFailed => "authentication_failed",
            FernetError::InvalidPadding => "invalid_padding",
            FernetError::SecretGenerationFailed => "secret_generation_failed",
        }
    }

    /// Coarse code that is safe to show to whoever submitted the token.
    ///
    /// Authentication and padding failures share one code so the two cannot
    /// be told apart from outside.
    pub fn public_code(&self) -> &'static str {
        match self {
            FernetError::AuthenticationFailed | FernetError::InvalidPadding => "invalid_token",
            other => other.code(),
        }
    }
}
