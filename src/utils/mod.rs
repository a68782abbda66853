//! Byte-level helpers shared by the cipher and the MAC.
//!
//! Nothing in here is cryptographic on its own: these are the little-endian
//! codecs, the bulk XOR loop and the constant-time comparison the primitives
//! are written against.

pub(crate) mod ct;
pub(crate) mod le;
