//! PKCS #7 block padding (RFC 5652 §6.3) to [`BLOCK_LEN`]-byte boundaries.

use crate::crypto::BLOCK_LEN;
use crate::error::FernetError;

/// Length of `pad(m)` for a message of `len` bytes.
///
/// Always strictly greater than `len`: an already aligned message gains a
/// whole block of padding.
pub const fn padded_len(len: usize) -> usize {
    BLOCK_LEN * (len / BLOCK_LEN) + BLOCK_LEN
}

/// Pad `message` to the next block boundary.
///
/// Every added byte holds the number of bytes added (1 to [`BLOCK_LEN`]).
pub fn pad(message: &[u8]) -> Vec<u8> {
    let n = padded_len(message.len());
    // n - len is in 1..=BLOCK_LEN, so the cast is lossless.
    let c = (n - message.len()) as u8;
    let mut out = Vec::with_capacity(n);
    out.extend_from_slice(message);
    out.resize(n, c);
    out
}

/// Strip padding added by [`pad`].
///
/// # Errors
///
/// Returns [`FernetError::InvalidPadding`] if the input is empty, the claimed
/// count is zero or longer than the input, or any padding byte disagrees with
/// the count. No further detail is given.
pub fn unpad(padded: &[u8]) -> Result<&[u8], FernetError> {
    let &last = padded.last().ok_or(FernetError::InvalidPadding)?;
    let c = usize::from(last);
    if c == 0 || c > padded.len() {
        return Err(FernetError::InvalidPadding);
    }
    let (message, padding) = padded.split_at(padded.len() - c);
    if padding.iter().any(|&b| b != last) {
        return Err(FernetError::InvalidPadding);
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_lengths() {
        assert_eq!(padded_len(0), 16);
        assert_eq!(padded_len(15), 16);
        assert_eq!(padded_len(16), 32);
        assert_eq!(padded_len(17), 32);
        assert_eq!(padded_len(31), 32);
    }

    #[test]
    fn empty_message_gets_full_block() {
        assert_eq!(pad(b""), vec![16u8; 16]);
        assert_eq!(unpad(&[16u8; 16]).unwrap(), b"");
    }

    #[test]
    fn pads_with_count_bytes() {
        let padded = pad(b"hello");
        assert_eq!(&padded[..5], b"hello");
        assert!(padded[5..].iter().all(|&b| b == 11));
    }

    #[test]
    fn aligned_message_gains_a_block() {
        let msg = [0xAAu8; 16];
        let padded = pad(&msg);
        assert_eq!(padded.len(), 32);
        assert!(padded[16..].iter().all(|&b| b == 16));
        assert_eq!(unpad(&padded).unwrap(), &msg[..]);
    }

    #[test]
    fn unpad_reverses_pad() {
        for len in [0usize, 1, 15, 16, 17, 31, 32, 100] {
            let msg: Vec<u8> = (0..len).map(|i| i as u8).collect();
            assert_eq!(unpad(&pad(&msg)).unwrap(), msg.as_slice(), "len {len}");
        }
    }

    #[test]
    fn rejects_zero_count() {
        let mut block = [1u8; 16];
        block[15] = 0;
        assert_eq!(unpad(&block), Err(FernetError::InvalidPadding));
    }

    #[test]
    fn rejects_count_longer_than_input() {
        assert_eq!(unpad(&[17u8; 16]), Err(FernetError::InvalidPadding));
    }

    #[test]
    fn rejects_inconsistent_padding_bytes() {
        let mut block = [3u8; 16];
        block[14] = 2;
        assert_eq!(unpad(&block), Err(FernetError::InvalidPadding));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(unpad(&[]), Err(FernetError::InvalidPadding));
    }
}
