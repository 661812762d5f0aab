//! Symmetric primitives behind the token codec.
//!
//! Neither module knows about the token layout. [`cipher`] is a bare
//! AES-128-CBC transform with no authentication; [`mac`] computes and checks
//! HMAC-SHA256 tags in constant time.

pub mod cipher;
pub mod mac;

pub use cipher::BLOCK_LEN;
pub use mac::TAG_LEN;
