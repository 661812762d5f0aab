//! Authenticated, timestamped, symmetric-key tokens in the Fernet format.
//!
//! A token carries a message encrypted with AES-128-CBC and signed with
//! HMAC-SHA256, both keyed from one 32-byte URL-safe base64 secret. Only
//! holders of the secret can read or forge tokens, and a token stops
//! verifying once the caller's TTL has elapsed since it was issued.
//!
//! ```no_run
//! use std::time::{Duration, SystemTime};
//!
//! let secret = fernet::random_secret()?;
//! let token = fernet::encrypt(b"hello", &secret, SystemTime::now())?;
//! let msg = fernet::decrypt(&token, &secret, SystemTime::now(), Duration::from_secs(60))?;
//! assert_eq!(msg, b"hello");
//! # Ok::<(), fernet::FernetError>(())
//! ```
//!
//! Every call derives its own keys and buffers, so the functions here are
//! safe to call concurrently without locking.

pub mod crypto;
pub mod error;
pub mod iv;
pub mod keys;
pub mod padding;
pub mod token;

pub use error::FernetError;
pub use iv::{FixedIv, IvSource, OsRngIv};
pub use keys::{random_secret, SecretKeys};
pub use token::{decrypt, encrypt, encrypt_with, MAX_CLOCK_SKEW, MIN_TOKEN_LEN, VERSION};
