//! ChaCha stream cipher and ChaCha20-Poly1305 AEAD.
//!
//! This crate provides the ChaCha family of stream ciphers with a
//! configurable round count, and the ChaCha20-Poly1305 authenticated
//! encryption construction built on top of it (RFC 8439).
//!
//! The focus is on **predictable, auditable semantics** with a fast path:
//! the keystream is produced by one of several bit-identical round engines,
//! chosen at runtime from the CPU features available.
//!
//! # Module overview
//!
//! - `stream`
//!   The raw ChaCha keystream. Builds the RFC 8439 state from key, nonce and
//!   block counter, runs it through a round engine (portable, SSE2 or AVX2),
//!   and XORs the result over arbitrary-length buffers. Exposes a one-shot
//!   function ([`stream::xor_key_stream`]) and a persistent [`stream::Cipher`]
//!   handle that continues a stream across calls.
//!
//!   No authentication happens here.
//!
//! - `encryption`
//!   Authenticated encryption. [`encryption::ChaCha20Poly1305`] derives a
//!   one-time Poly1305 key per nonce, encrypts with ChaCha20 and appends a
//!   (possibly truncated) tag, verified in constant time before any
//!   plaintext is released.
//!
//! - `error`
//!   The [`Error`] type shared by every entry point.
//!
//! # Design goals
//!
//! - No heap allocations in the keystream path
//! - Constant-time tag verification
//! - Engines chosen once per process, never per key
//! - Key material wiped on drop
//!
//! Key management and nonce uniqueness are the caller's responsibility:
//! reusing a `(key, nonce)` pair breaks every guarantee this crate makes.

mod utils;

pub mod encryption;
pub mod error;
pub mod stream;

pub use encryption::ChaCha20Poly1305;
pub use error::{Error, Result};
pub use stream::Cipher;
