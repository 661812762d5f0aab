//! AES-128 in cipher-block-chaining mode over whole blocks.
//!
//! Padding is the caller's job (see [`crate::padding`]): both directions
//! require input that is already a positive multiple of [`BLOCK_LEN`].

use aes::cipher::{generic_array::GenericArray, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes128;

use crate::error::FernetError;
use crate::keys::KEY_LEN;

/// AES block size in bytes; also the IV length.
pub const BLOCK_LEN: usize = 16;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// Encrypt `plaintext` under `key` and `iv`.
///
/// # Errors
///
/// Returns [`FernetError::MalformedCiphertext`] if `plaintext` is empty or not
/// block aligned.
pub fn encrypt_cbc(
    key: &[u8; KEY_LEN],
    iv: &[u8; BLOCK_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, FernetError> {
    ensure_whole_blocks(plaintext)?;
    let mut buf = plaintext.to_vec();
    let mut enc = Aes128CbcEnc::new(GenericArray::from_slice(key), GenericArray::from_slice(iv));
    for block in buf.chunks_exact_mut(BLOCK_LEN) {
        enc.encrypt_block_mut(GenericArray::from_mut_slice(block));
    }
    Ok(buf)
}

/// Decrypt `ciphertext` under `key` and `iv`. The result is still padded.
///
/// # Errors
///
/// Returns [`FernetError::MalformedCiphertext`] if `ciphertext` is empty or
/// not block aligned.
pub fn decrypt_cbc(
    key: &[u8; KEY_LEN],
    iv: &[u8; BLOCK_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, FernetError> {
    ensure_whole_blocks(ciphertext)?;
    let mut buf = ciphertext.to_vec();
    let mut dec = Aes128CbcDec::new(GenericArray::from_slice(key), GenericArray::from_slice(iv));
    for block in buf.chunks_exact_mut(BLOCK_LEN) {
        dec.decrypt_block_mut(GenericArray::from_mut_slice(block));
    }
    Ok(buf)
}

fn ensure_whole_blocks(buf: &[u8]) -> Result<(), FernetError> {
    if buf.is_empty() || buf.len() % BLOCK_LEN != 0 {
        return Err(FernetError::MalformedCiphertext);
    }
    Ok(())
}
