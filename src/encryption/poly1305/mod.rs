//! Poly1305 message authentication code (RFC 8439).
//!
//! Poly1305 is the one-time authenticator behind ChaCha20-Poly1305. It is
//! exposed so the AEAD can drive it incrementally (associated data, padding,
//! ciphertext, lengths) without first concatenating everything into one
//! buffer.
//!
//! A Poly1305 key must never authenticate more than one message.

mod mac;

pub use mac::{KEY_SIZE, Poly1305, TAG_SIZE};

/// One-shot Poly1305 over `msg`.
pub fn authenticate(key: &[u8; KEY_SIZE], msg: &[u8]) -> [u8; TAG_SIZE] {
    let mut mac = Poly1305::new(key);
    mac.update(msg);
    mac.finalize()
}
