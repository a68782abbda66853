//! ChaCha stream cipher over arbitrary-length buffers.
//!
//! Full 64-byte blocks are handed to the dispatcher, which batches them
//! through the widest engine that fits; the final partial block is produced
//! by the portable engine and only its needed prefix is used.
//!
//! The block counter is 32 bits wide and wraps modulo 2³² after 256 GiB of
//! keystream under one nonce. Nothing here detects the wrap: keeping a
//! single `(key, nonce)` stream below that length is the caller's job.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::backends::{Engine, MAX_PAR_BLOCKS, soft};
use super::dispatch::capabilities;
use super::state::{BLOCK_SIZE, COUNTER_WORD, KEY_SIZE, NONCE_SIZE, Rounds, State, build_state};
use crate::error::{Error, Result};
use crate::utils::le::xor_in_place;

/// XORs `src` with the ChaCha keystream into `dst`.
///
/// The keystream starts at block `counter` for the given key and nonce and
/// uses `rounds` rounds (20 for ChaCha20). Only the first `src.len()` bytes
/// of `dst` are written. Encryption and decryption are the same operation.
///
/// # Errors
///
/// - [`Error::InvalidRounds`] if `rounds` is zero or odd
/// - [`Error::DstTooSmall`] if `dst` is shorter than `src`
///
/// Both are checked before anything is written.
///
/// # Security Notes
///
/// - No authentication is performed.
/// - A `(key, nonce)` pair must never be reused for different data.
pub fn xor_key_stream(
    dst: &mut [u8],
    src: &[u8],
    nonce: &[u8; NONCE_SIZE],
    key: &[u8; KEY_SIZE],
    counter: u32,
    rounds: usize,
) -> Result<()> {
    xor_key_stream_with(capabilities().best(), dst, src, nonce, key, counter, rounds)
}

/// Same as [`xor_key_stream`], but never uses an engine above `engine`.
///
/// Shorter remainders still fall back to narrower engines, exactly as the
/// unrestricted dispatcher does.
///
/// # Errors
///
/// In addition to the errors of [`xor_key_stream`], returns
/// [`Error::EngineUnavailable`] if `engine` cannot run on this machine.
pub fn xor_key_stream_with(
    engine: Engine,
    dst: &mut [u8],
    src: &[u8],
    nonce: &[u8; NONCE_SIZE],
    key: &[u8; KEY_SIZE],
    counter: u32,
    rounds: usize,
) -> Result<()> {
    let rounds = Rounds::new(rounds)?;
    if dst.len() < src.len() {
        return Err(Error::DstTooSmall {
            needed: src.len(),
            got: dst.len(),
        });
    }
    if !engine.is_available() {
        return Err(Error::EngineUnavailable(engine));
    }

    let buf = &mut dst[..src.len()];
    buf.copy_from_slice(src);

    let mut cipher = Cipher::from_state(build_state(key, nonce, counter), rounds);
    cipher.apply_with(engine, buf);

    Ok(())
}

/// XORs the ChaCha keystream into `buf` in place.
///
/// See [`xor_key_stream`] for parameters and security notes.
///
/// # Errors
///
/// [`Error::InvalidRounds`] if `rounds` is zero or odd.
pub fn xor_key_stream_in_place(
    buf: &mut [u8],
    nonce: &[u8; NONCE_SIZE],
    key: &[u8; KEY_SIZE],
    counter: u32,
    rounds: usize,
) -> Result<()> {
    apply_keystream(buf, nonce, key, counter, Rounds::new(rounds)?);
    Ok(())
}

/// In-place keystream with an already validated round count.
pub(crate) fn apply_keystream(
    buf: &mut [u8],
    nonce: &[u8; NONCE_SIZE],
    key: &[u8; KEY_SIZE],
    counter: u32,
    rounds: Rounds,
) {
    let mut cipher = Cipher::from_state(build_state(key, nonce, counter), rounds);
    cipher.apply_keystream(buf);
}

/// A ChaCha keystream positioned somewhere inside one `(key, nonce)` stream.
///
/// Successive calls continue where the previous one stopped, including in
/// the middle of a block: applying the keystream to `a` and then `b` gives
/// the same bytes as applying it once to `a ‖ b`.
///
/// A `Cipher` is mutated by every call and must not be shared between
/// threads without external locking. Key material is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Cipher {
    /// State for the next block to generate.
    state: State,

    #[zeroize(skip)]
    rounds: Rounds,

    /// Last partially consumed block.
    keystream: [u8; BLOCK_SIZE],

    /// Consumed bytes of `keystream`; `BLOCK_SIZE` when nothing is buffered.
    offset: usize,
}

impl Cipher {
    /// Creates a cipher at block counter 0.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRounds`] if `rounds` is zero or odd.
    pub fn new(nonce: &[u8; NONCE_SIZE], key: &[u8; KEY_SIZE], rounds: usize) -> Result<Self> {
        Ok(Self::from_state(build_state(key, nonce, 0), Rounds::new(rounds)?))
    }

    fn from_state(state: State, rounds: Rounds) -> Self {
        Self {
            state,
            rounds,
            keystream: [0u8; BLOCK_SIZE],
            offset: BLOCK_SIZE,
        }
    }

    /// The round count this cipher was built with.
    pub fn rounds(&self) -> Rounds {
        self.rounds
    }

    /// Counter of the next block that will be generated.
    ///
    /// Bytes left over from a partially used block are not counted.
    pub fn counter(&self) -> u32 {
        self.state[COUNTER_WORD]
    }

    /// Moves the stream to the start of block `counter`, dropping any
    /// buffered keystream.
    pub fn set_counter(&mut self, counter: u32) {
        self.state[COUNTER_WORD] = counter;
        self.keystream.zeroize();
        self.offset = BLOCK_SIZE;
    }

    /// XORs `src` with the keystream into `dst`, advancing the stream by
    /// `src.len()` bytes.
    ///
    /// # Errors
    ///
    /// [`Error::DstTooSmall`] if `dst` is shorter than `src`; the stream is
    /// not advanced in that case.
    pub fn xor_key_stream(&mut self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        if dst.len() < src.len() {
            return Err(Error::DstTooSmall {
                needed: src.len(),
                got: dst.len(),
            });
        }

        let buf = &mut dst[..src.len()];
        buf.copy_from_slice(src);
        self.apply_keystream(buf);

        Ok(())
    }

    /// XORs the keystream into `buf` in place, advancing the stream by
    /// `buf.len()` bytes.
    pub fn apply_keystream(&mut self, buf: &mut [u8]) {
        self.apply_with(capabilities().best(), buf);
    }

    fn apply_with(&mut self, ceiling: Engine, buf: &mut [u8]) {
        let mut pos = 0;

        // Leftover keystream from the previous call
        if self.offset < BLOCK_SIZE {
            let take = buf.len().min(BLOCK_SIZE - self.offset);
            xor_in_place(&mut buf[..take], &self.keystream[self.offset..self.offset + take]);
            self.offset += take;
            pos = take;
        }

        pos += self.xor_blocks(ceiling, &mut buf[pos..]);

        // Final partial block
        let tail = &mut buf[pos..];
        if !tail.is_empty() {
            soft::keystream(&mut self.state, self.rounds, &mut self.keystream);
            xor_in_place(tail, &self.keystream);
            self.offset = tail.len();
        }
    }

    /// XORs keystream over the whole-block prefix of `buf` and returns its
    /// length.
    fn xor_blocks(&mut self, ceiling: Engine, buf: &mut [u8]) -> usize {
        let caps = capabilities();
        let full = buf.len() - buf.len() % BLOCK_SIZE;
        let mut batch = [0u8; MAX_PAR_BLOCKS * BLOCK_SIZE];
        let mut done = 0;

        while done < full {
            let engine = caps.select(ceiling, full - done);
            let n = engine.batch_len();

            engine.keystream(&mut self.state, self.rounds, &mut batch[..n]);
            xor_in_place(&mut buf[done..done + n], &batch[..n]);

            done += n;
        }

        batch.zeroize();
        done
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher")
            .field("rounds", &self.rounds)
            .field("counter", &self.counter())
            .finish_non_exhaustive()
    }
}
