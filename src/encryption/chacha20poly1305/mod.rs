//! ChaCha20-Poly1305 AEAD.
//!
//! Bit-compatible with RFC 8439 at the default 16-byte tag. A truncated tag
//! (1 to 16 bytes) can be chosen at construction; it trades forgery
//! resistance for size and should only be used where the protocol asks
//! for it.

mod core;

pub use self::core::{ChaCha20Poly1305, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
