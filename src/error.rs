//! Error types for the keystream and AEAD entry points.
//!
//! Messages never carry key, nonce or keystream material, so every variant
//! can be logged as-is.

use thiserror::Error;

use crate::stream::Engine;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the public API.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The destination buffer is shorter than the source.
    #[error("destination buffer too small: need {needed} bytes, got {got}")]
    DstTooSmall {
        /// Bytes the operation would write
        needed: usize,
        /// Bytes available in the destination
        got: usize,
    },

    /// The round count is zero or odd.
    #[error("round count must be a positive multiple of 2, got {0}")]
    InvalidRounds(usize),

    /// The requested tag size is outside `1..=16`.
    #[error("tag size must be between 1 and 16, got {0}")]
    InvalidTagSize(usize),

    /// The nonce is not exactly 12 bytes long.
    #[error("nonce size is invalid: expected 12 bytes, got {0}")]
    InvalidNonceSize(usize),

    /// The sealed input is shorter than the tag, or the tag does not verify.
    ///
    /// Both conditions deliberately share this variant.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The message would exhaust the 32-bit block counter of one nonce.
    #[error("message too large for a single nonce")]
    MessageTooLarge,

    /// A round engine was forced that this CPU (or build) cannot run.
    #[error("round engine {0:?} is not available on this machine")]
    EngineUnavailable(Engine),
}
