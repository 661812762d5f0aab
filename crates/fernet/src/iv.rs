//! Where encode gets its initialization vectors.
//!
//! Encoding takes an [`IvSource`] explicitly; there is no global RNG state.
//! [`OsRngIv`] is the default. [`FixedIv`] exists for reproducible tokens in
//! tests and published vectors and must never be used to issue real tokens.

use rand::{rngs::OsRng, RngCore};

use crate::crypto::BLOCK_LEN;

/// Byte length of an IV (one cipher block).
pub const IV_LEN: usize = BLOCK_LEN;

/// Capability that fills a fresh IV for one encode call.
pub trait IvSource {
    /// Fill `iv` with the next initialization vector.
    ///
    /// # Errors
    ///
    /// Returns the underlying entropy error; encode reports it as
    /// [`crate::FernetError::IvGenerationFailed`].
    fn fill_iv(&mut self, iv: &mut [u8; IV_LEN]) -> Result<(), rand::Error>;
}

/// IVs drawn from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngIv;

impl IvSource for OsRngIv {
    fn fill_iv(&mut self, iv: &mut [u8; IV_LEN]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(iv)
    }
}

/// Always yields the same IV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIv(pub [u8; IV_LEN]);

impl IvSource for FixedIv {
    fn fill_iv(&mut self, iv: &mut [u8; IV_LEN]) -> Result<(), rand::Error> {
        *iv = self.0;
        Ok(())
    }
}

impl<S: IvSource + ?Sized> IvSource for &mut S {
    fn fill_iv(&mut self, iv: &mut [u8; IV_LEN]) -> Result<(), rand::Error> {
        (**self).fill_iv(iv)
    }
}
