//! Authenticated encryption.
//!
//! - `chacha20poly1305`: the ChaCha20-Poly1305 AEAD (RFC 8439)
//! - `poly1305`: the one-time authenticator the AEAD is built on
//!
//! Nonce reuse with the same key is catastrophic for both confidentiality
//! and integrity, and must be prevented by the caller.

pub mod chacha20poly1305;
pub mod poly1305;

pub use chacha20poly1305::ChaCha20Poly1305;
