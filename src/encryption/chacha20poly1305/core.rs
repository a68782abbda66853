//! ChaCha20-Poly1305 authenticated encryption (RFC 8439).
//!
//! Per message:
//!
//! 1. Derive the Poly1305 one-time key: first 32 bytes of keystream block 0
//! 2. Encrypt the plaintext with keystream starting at block 1
//! 3. Authenticate:
//!    - AAD || pad16
//!    - ciphertext || pad16
//!    - len(AAD) || len(ciphertext), both little-endian `u64`
//!
//! The sealed form is `ciphertext || tag[..tag_size]`; the nonce travels
//! out of band.

use std::fmt;

use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::encryption::poly1305::{self, Poly1305};
use crate::error::{Error, Result};
use crate::stream::{BLOCK_SIZE, Rounds, apply_keystream};
use crate::utils::ct::ConstantTimeEq;

/// Size of a ChaCha20-Poly1305 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of a ChaCha20-Poly1305 nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Full (and default) tag size in bytes.
pub const TAG_SIZE: usize = poly1305::TAG_SIZE;

/// Longest message one nonce can protect: the counter starts at 1, so
/// 2³² - 1 blocks remain.
const MAX_MESSAGE_LEN: u64 = (u32::MAX as u64) * BLOCK_SIZE as u64;

const ROUNDS: Rounds = Rounds::R20;

const PADDING: [u8; 16] = [0u8; 16];

/// ChaCha20-Poly1305 AEAD bound to one key.
///
/// The handle is immutable after construction and carries no per-message
/// state, so it can be shared across threads. Each call must use a nonce
/// that has never been used with this key before; the handle does not
/// track nonces.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ChaCha20Poly1305 {
    key: [u8; KEY_SIZE],

    #[zeroize(skip)]
    tag_size: usize,
}

impl ChaCha20Poly1305 {
    /// Creates an AEAD with the full 16-byte tag.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        Self {
            key: *key,
            tag_size: TAG_SIZE,
        }
    }

    /// Creates an AEAD that emits and checks only the first `tag_size` bytes
    /// of the tag.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTagSize`] unless `1 <= tag_size <= 16`.
    pub fn with_tag_size(key: &[u8; KEY_SIZE], tag_size: usize) -> Result<Self> {
        if !(1..=TAG_SIZE).contains(&tag_size) {
            return Err(Error::InvalidTagSize(tag_size));
        }

        Ok(Self {
            key: *key,
            tag_size,
        })
    }

    /// Bytes added to a plaintext by sealing (the tag size).
    pub fn overhead(&self) -> usize {
        self.tag_size
    }

    /// Required nonce length.
    pub fn nonce_size(&self) -> usize {
        NONCE_SIZE
    }

    /// Encrypts and authenticates `plaintext`, returning
    /// `ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidNonceSize`] if `nonce` is not 12 bytes
    /// - [`Error::MessageTooLarge`] if `plaintext` exceeds the per-nonce limit
    pub fn seal(&self, nonce: &[u8], plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(plaintext.len() + self.tag_size);
        self.seal_append(&mut out, nonce, plaintext, associated_data)?;
        Ok(out)
    }

    /// Like [`seal`](Self::seal), but appends `ciphertext || tag` to `dst`.
    ///
    /// `dst` is left untouched on error.
    pub fn seal_append(
        &self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        plaintext: &[u8],
        associated_data: &[u8],
    ) -> Result<()> {
        let nonce = parse_nonce(nonce)?;
        check_length(plaintext.len())?;

        let poly_key = self.poly_key(&nonce);

        let start = dst.len();
        dst.reserve(plaintext.len() + self.tag_size);
        dst.extend_from_slice(plaintext);
        apply_keystream(&mut dst[start..], &nonce, &self.key, 1, ROUNDS);

        let tag = compute_tag(&poly_key, associated_data, &dst[start..]);
        dst.extend_from_slice(&tag[..self.tag_size]);

        Ok(())
    }

    /// Verifies and decrypts `ciphertext || tag`, returning the plaintext.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidNonceSize`] if `nonce` is not 12 bytes
    /// - [`Error::AuthenticationFailed`] if the input is shorter than the tag
    ///   or the tag does not match
    /// - [`Error::MessageTooLarge`] if the ciphertext exceeds the per-nonce
    ///   limit
    pub fn open(&self, nonce: &[u8], sealed: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(sealed.len().saturating_sub(self.tag_size));
        self.open_append(&mut out, nonce, sealed, associated_data)?;
        Ok(out)
    }

    /// Like [`open`](Self::open), but appends the plaintext to `dst`.
    ///
    /// The tag is checked before any byte is decrypted; on error `dst` is
    /// left untouched.
    pub fn open_append(
        &self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        sealed: &[u8],
        associated_data: &[u8],
    ) -> Result<()> {
        let nonce = parse_nonce(nonce)?;

        if sealed.len() < self.tag_size {
            trace!(len = sealed.len(), tag_size = self.tag_size, "sealed input shorter than tag");
            return Err(Error::AuthenticationFailed);
        }

        let (ciphertext, tag) = sealed.split_at(sealed.len() - self.tag_size);
        check_length(ciphertext.len())?;

        let poly_key = self.poly_key(&nonce);
        let expected = compute_tag(&poly_key, associated_data, ciphertext);

        if !expected[..self.tag_size].ct_eq(tag) {
            trace!(
                ciphertext_len = ciphertext.len(),
                associated_data_len = associated_data.len(),
                "tag mismatch"
            );
            return Err(Error::AuthenticationFailed);
        }

        let start = dst.len();
        dst.extend_from_slice(ciphertext);
        apply_keystream(&mut dst[start..], &nonce, &self.key, 1, ROUNDS);

        Ok(())
    }

    /// The Poly1305 key for `nonce`: 32 zero bytes encrypted at counter 0.
    fn poly_key(&self, nonce: &[u8; NONCE_SIZE]) -> Zeroizing<[u8; poly1305::KEY_SIZE]> {
        let mut key = Zeroizing::new([0u8; poly1305::KEY_SIZE]);
        apply_keystream(&mut key[..], nonce, &self.key, 0, ROUNDS);
        key
    }
}

impl fmt::Debug for ChaCha20Poly1305 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaCha20Poly1305")
            .field("tag_size", &self.tag_size)
            .finish_non_exhaustive()
    }
}

fn parse_nonce(nonce: &[u8]) -> Result<[u8; NONCE_SIZE]> {
    nonce
        .try_into()
        .map_err(|_| Error::InvalidNonceSize(nonce.len()))
}

fn check_length(len: usize) -> Result<()> {
    if len as u64 > MAX_MESSAGE_LEN {
        return Err(Error::MessageTooLarge);
    }
    Ok(())
}

/// Number of zero bytes that bring `len` to a multiple of 16.
#[inline(always)]
fn pad16(len: usize) -> usize {
    (16 - len % 16) % 16
}

/// Computes the Poly1305 tag over the RFC 8439 MAC input.
fn compute_tag(
    poly_key: &[u8; poly1305::KEY_SIZE],
    associated_data: &[u8],
    ciphertext: &[u8],
) -> [u8; TAG_SIZE] {
    let mut mac = Poly1305::new(poly_key);

    mac.update(associated_data);
    mac.update(&PADDING[..pad16(associated_data.len())]);

    mac.update(ciphertext);
    mac.update(&PADDING[..pad16(ciphertext.len())]);

    let mut lengths = [0u8; 16];
    lengths[..8].copy_from_slice(&(associated_data.len() as u64).to_le_bytes());
    lengths[8..].copy_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    mac.update(&lengths);

    mac.finalize()
}
