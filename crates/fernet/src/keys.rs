//! [`SecretKeys`]: splits a 32-byte secret into signing and encryption keys.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::FernetError;

/// Byte length of each derived key (AES-128 and the HMAC key alike).
pub const KEY_LEN: usize = 16;

/// Byte length of a decoded secret: signing key followed by encryption key.
pub const SECRET_LEN: usize = 2 * KEY_LEN;

/// Signing and encryption keys derived from one secret.
///
/// Derived fresh for every encode/decode call and never persisted. Both
/// arrays are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKeys {
    signing: [u8; KEY_LEN],
    encryption: [u8; KEY_LEN],
}

impl SecretKeys {
    /// Decode a URL-safe base64 secret and split it into its two halves.
    ///
    /// Bytes `0..16` become the signing key and bytes `16..32` the encryption
    /// key, with no further transformation.
    ///
    /// # Errors
    ///
    /// Returns [`FernetError::InvalidSecretEncoding`] if `secret` is not valid
    /// base64, or [`FernetError::InvalidSecretLength`] if it does not decode to
    /// exactly [`SECRET_LEN`] bytes.
    pub fn derive(secret: &str) -> Result<Self, FernetError> {
        let raw = Zeroizing::new(
            URL_SAFE
                .decode(secret)
                .map_err(|_| FernetError::InvalidSecretEncoding)?,
        );
        if raw.len() != SECRET_LEN {
            return Err(FernetError::InvalidSecretLength(raw.len()));
        }

        let mut signing = [0u8; KEY_LEN];
        let mut encryption = [0u8; KEY_LEN];
        signing.copy_from_slice(&raw[..KEY_LEN]);
        encryption.copy_from_slice(&raw[KEY_LEN..]);

        Ok(Self {
            signing,
            encryption,
        })
    }

    /// Key for the authentication tag.
    pub fn signing_key(&self) -> &[u8; KEY_LEN] {
        &self.signing
    }

    /// Key for the block cipher.
    pub fn encryption_key(&self) -> &[u8; KEY_LEN] {
        &self.encryption
    }
}

impl std::fmt::Debug for SecretKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("SecretKeys([REDACTED])")
    }
}

/// Generate a fresh secret suitable for [`crate::encrypt`] and [`crate::decrypt`].
///
/// Draws [`SECRET_LEN`] bytes from the OS CSPRNG and returns them URL-safe
/// base64 encoded (with padding).
///
/// # Errors
///
/// Returns [`FernetError::SecretGenerationFailed`] if the OS entropy source
/// reports an error.
pub fn random_secret() -> Result<String, FernetError> {
    let mut raw = Zeroizing::new([0u8; SECRET_LEN]);
    OsRng
        .try_fill_bytes(raw.as_mut_slice())
        .map_err(|_| FernetError::SecretGenerationFailed)?;
    Ok(URL_SAFE.encode(raw.as_slice()))
}
