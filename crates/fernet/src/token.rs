//! Token layout, encoding, and decoding.
//!
//! # Token format
//!
//! ```text
//! offset  len  field
//! 0       1    version (0x80)
//! 1       8    issued-at, big-endian Unix seconds
//! 9       16   IV
//! 25      n    AES-128-CBC ciphertext, n a positive multiple of 16
//! 25+n    32   HMAC-SHA256 over bytes 0..25+n
//! ```
//!
//! The whole byte string is then URL-safe base64 encoded with padding.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::URL_SAFE, Engine as _};

use crate::crypto::{cipher, mac, BLOCK_LEN, TAG_LEN};
use crate::error::FernetError;
use crate::iv::{IvSource, OsRngIv, IV_LEN};
use crate::keys::SecretKeys;
use crate::padding;

/// The only version byte this codec reads or writes.
pub const VERSION: u8 = 0x80;

/// How far in the future a token's timestamp may lie and still be accepted.
pub const MAX_CLOCK_SKEW: Duration = Duration::from_secs(60 * 60);

const TIMESTAMP_LEN: usize = 8;
const HEADER_LEN: usize = 1 + TIMESTAMP_LEN + IV_LEN;

/// Shortest decodable token: header, one ciphertext block, and the tag.
pub const MIN_TOKEN_LEN: usize = HEADER_LEN + BLOCK_LEN + TAG_LEN;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Encrypt and sign `message` with a random IV.
///
/// `now` becomes the token's issued-at time and should be the current time
/// outside of tests.
///
/// # Errors
///
/// Returns a secret error from [`SecretKeys::derive`], or
/// [`FernetError::IvGenerationFailed`] if the OS entropy source fails.
pub fn encrypt(message: &[u8], secret: &str, now: SystemTime) -> Result<String, FernetError> {
    encrypt_with(message, secret, now, OsRngIv)
}

/// Like [`encrypt`], but the IV comes from `iv_source`.
///
/// # Errors
///
/// Same as [`encrypt`]; any error from `iv_source` becomes
/// [`FernetError::IvGenerationFailed`].
pub fn encrypt_with<S: IvSource>(
    message: &[u8],
    secret: &str,
    now: SystemTime,
    mut iv_source: S,
) -> Result<String, FernetError> {
    let keys = SecretKeys::derive(secret)?;

    let mut iv = [0u8; IV_LEN];
    iv_source
        .fill_iv(&mut iv)
        .map_err(|_| FernetError::IvGenerationFailed)?;

    let builder = TokenBuilder::new(unix_seconds(now), iv);
    let ciphertext = cipher::encrypt_cbc(keys.encryption_key(), &iv, &padding::pad(message))?;
    let token = builder.seal(&ciphertext, &keys);

    Ok(URL_SAFE.encode(token))
}

/// Verify `token` and recover the message it carries.
///
/// Succeeds only if `token` was produced with the same `secret`, is unmodified,
/// is at most `ttl` old at `now`, and is not dated more than
/// [`MAX_CLOCK_SKEW`] after `now`. Line breaks (`\r`, `\n`) anywhere in
/// `token` are ignored, so wrapped or newline-terminated tokens decode.
///
/// # Errors
///
/// Stops at the first failing check, in this order:
/// [`FernetError::InvalidTokenEncoding`], a secret error,
/// [`FernetError::TokenTooShort`], [`FernetError::UnsupportedVersion`],
/// [`FernetError::TokenExpired`] / [`FernetError::ClockSkewRejected`],
/// [`FernetError::MalformedCiphertext`], [`FernetError::AuthenticationFailed`],
/// [`FernetError::InvalidPadding`].
pub fn decrypt(
    token: &str,
    secret: &str,
    now: SystemTime,
    ttl: Duration,
) -> Result<Vec<u8>, FernetError> {
    let raw = decode_text(token)?;
    let keys = SecretKeys::derive(secret)?;

    let parsed = ParsedToken::parse(&raw)?;
    check_age(parsed.issued_at, now, ttl)?;

    if parsed.ciphertext.is_empty() || parsed.ciphertext.len() % BLOCK_LEN != 0 {
        return Err(FernetError::MalformedCiphertext);
    }
    if !mac::verify(keys.signing_key(), parsed.signed, parsed.tag) {
        return Err(FernetError::AuthenticationFailed);
    }

    let padded = cipher::decrypt_cbc(keys.encryption_key(), parsed.iv, parsed.ciphertext)?;
    padding::unpad(&padded).map(<[u8]>::to_vec)
}

fn decode_text(token: &str) -> Result<Vec<u8>, FernetError> {
    let decoded = if token.contains(['\r', '\n']) {
        let joined: String = token.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        URL_SAFE.decode(joined)
    } else {
        URL_SAFE.decode(token)
    };
    decoded.map_err(|_| FernetError::InvalidTokenEncoding)
}

/// Assembles a token: header first, then ciphertext, then the tag.
struct TokenBuilder {
    header: [u8; HEADER_LEN],
}

impl TokenBuilder {
    fn new(issued_at: i64, iv: [u8; IV_LEN]) -> Self {
        let mut header = [0u8; HEADER_LEN];
        header[0] = VERSION;
        header[1..1 + TIMESTAMP_LEN].copy_from_slice(&issued_at.to_be_bytes());
        header[1 + TIMESTAMP_LEN..].copy_from_slice(&iv);
        Self { header }
    }

    /// Append `ciphertext` and the tag over everything before it.
    fn seal(self, ciphertext: &[u8], keys: &SecretKeys) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + ciphertext.len() + TAG_LEN);
        out.extend_from_slice(&self.header);
        out.extend_from_slice(ciphertext);
        let tag = mac::sign(keys.signing_key(), &out);
        out.extend_from_slice(&tag);
        out
    }
}

/// Borrowed view of a decoded token's fields. Nothing here is authenticated.
#[derive(Debug)]
struct ParsedToken<'a> {
    issued_at: i64,
    iv: &'a [u8; IV_LEN],
    ciphertext: &'a [u8],
    /// Every byte the tag covers.
    signed: &'a [u8],
    tag: &'a [u8; TAG_LEN],
}

impl<'a> ParsedToken<'a> {
    fn parse(raw: &'a [u8]) -> Result<Self, FernetError> {
        if raw.len() < MIN_TOKEN_LEN {
            return Err(FernetError::TokenTooShort);
        }
        let (&version, rest) = raw.split_first().ok_or(FernetError::TokenTooShort)?;
        if version != VERSION {
            return Err(FernetError::UnsupportedVersion);
        }
        let (timestamp, rest) = rest
            .split_first_chunk::<TIMESTAMP_LEN>()
            .ok_or(FernetError::TokenTooShort)?;
        let (iv, rest) = rest
            .split_first_chunk::<IV_LEN>()
            .ok_or(FernetError::TokenTooShort)?;
        let (ciphertext, tag) = rest
            .split_last_chunk::<TAG_LEN>()
            .ok_or(FernetError::TokenTooShort)?;

        Ok(Self {
            issued_at: i64::from_be_bytes(*timestamp),
            iv,
            ciphertext,
            signed: &raw[..raw.len() - TAG_LEN],
            tag,
        })
    }
}

fn check_age(issued_at: i64, now: SystemTime, ttl: Duration) -> Result<(), FernetError> {
    // Duration::as_nanos always fits in i128.
    let delta = unix_nanos(now) - i128::from(issued_at) * NANOS_PER_SEC;
    if delta > ttl.as_nanos() as i128 {
        return Err(FernetError::TokenExpired);
    }
    if delta < -(MAX_CLOCK_SKEW.as_nanos() as i128) {
        return Err(FernetError::ClockSkewRejected);
    }
    Ok(())
}

fn unix_nanos(t: SystemTime) -> i128 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_nanos() as i128,
        Err(e) => -(e.duration().as_nanos() as i128),
    }
}

/// Whole Unix seconds, rounded towards negative infinity.
fn unix_seconds(t: SystemTime) -> i64 {
    unix_nanos(t).div_euclid(NANOS_PER_SEC) as i64
}
