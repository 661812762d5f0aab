//! HMAC-SHA256 tags with constant-time verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::keys::KEY_LEN;

/// Byte length of an authentication tag.
pub const TAG_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Compute the tag over `data`.
pub fn sign(key: &[u8; KEY_LEN], data: &[u8]) -> [u8; TAG_LEN] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Recompute the tag over `data` and compare it with `tag`.
///
/// The comparison takes the same time wherever the first differing byte is.
pub fn verify(key: &[u8; KEY_LEN], data: &[u8], tag: &[u8; TAG_LEN]) -> bool {
    let expected = sign(key, data);
    expected[..].ct_eq(&tag[..]).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; KEY_LEN] = [0x0b; KEY_LEN];

    #[test]
    fn sign_is_deterministic() {
        assert_eq!(sign(&KEY, b"data"), sign(&KEY, b"data"));
        assert_ne!(sign(&KEY, b"data"), sign(&KEY, b"date"));
    }

    #[test]
    fn verify_accepts_own_tag() {
        let tag = sign(&KEY, b"payload");
        assert!(verify(&KEY, b"payload", &tag));
    }

    #[test]
    fn verify_rejects_any_flipped_bit() {
        let tag = sign(&KEY, b"payload");
        for i in 0..TAG_LEN {
            let mut bad = tag;
            bad[i] ^= 0x01;
            assert!(!verify(&KEY, b"payload", &bad), "byte {i}");
        }
    }

    #[test]
    fn verify_rejects_other_key() {
        let tag = sign(&KEY, b"payload");
        assert!(!verify(&[0x0c; KEY_LEN], b"payload", &tag));
    }
}
