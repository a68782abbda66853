//! ChaCha stream cipher with a configurable round count (RFC 8439 layout).
//!
//! The module is split by responsibility:
//!
//! - `state`: builds the sixteen-word state from key, nonce and counter
//! - `backends`: round engines (portable, SSE2, AVX2), bit-identical output
//! - `dispatch`: probes the CPU once and picks an engine per batch
//! - `core`: the XOR stream cipher and the [`Cipher`] handle
//!
//! This module performs no authentication. Use
//! [`crate::encryption::chacha20poly1305`] unless a raw keystream is really
//! what is wanted.

mod backends;
mod core;
mod dispatch;
mod state;

pub(crate) use self::core::apply_keystream;
pub use backends::Engine;
pub use self::core::{Cipher, xor_key_stream, xor_key_stream_in_place, xor_key_stream_with};
pub use dispatch::{Capabilities, available_engines, capabilities};
pub use state::{BLOCK_SIZE, KEY_SIZE, NONCE_SIZE, Rounds};
