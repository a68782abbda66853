//! ChaCha state layout.
//!
//! The sixteen-word state is laid out exactly as RFC 8439 section 2.3:
//!
//! ```text
//! cccccccc  cccccccc  cccccccc  cccccccc
//! kkkkkkkk  kkkkkkkk  kkkkkkkk  kkkkkkkk
//! kkkkkkkk  kkkkkkkk  kkkkkkkk  kkkkkkkk
//! bbbbbbbb  nnnnnnnn  nnnnnnnn  nnnnnnnn
//! ```
//!
//! `c` = constant, `k` = key, `b` = block counter, `n` = nonce. All words are
//! little-endian. The keystream is bit-for-bit determined by this layout, so
//! every round engine starts from a state produced here.

use crate::error::{Error, Result};
use crate::utils::le::load_words;

/// Size of a ChaCha key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of an IETF ChaCha nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Size of one keystream block in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Number of 32-bit words in the state.
pub(crate) const STATE_WORDS: usize = 16;

/// Index of the block counter word.
pub(crate) const COUNTER_WORD: usize = 12;

/// The ASCII string `"expand 32-byte k"` as little-endian words.
const CONSTANTS: [u32; 4] = [
    0x6170_7865, // "expa"
    0x3320_646e, // "nd 3"
    0x7962_2d32, // "2-by"
    0x6b20_6574, // "te k"
];

/// The cipher state: sixteen words in the layout above.
pub(crate) type State = [u32; STATE_WORDS];

/// Builds the initial state from a key, a nonce and a block counter.
pub(crate) fn build_state(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], counter: u32) -> State {
    let mut state = [0u32; STATE_WORDS];

    state[0..4].copy_from_slice(&CONSTANTS);
    state[4..12].copy_from_slice(&load_words::<8>(key));
    state[COUNTER_WORD] = counter;
    state[13..16].copy_from_slice(&load_words::<3>(nonce));

    state
}

/// A validated round count.
///
/// ChaCha applies its rounds in column/diagonal pairs, so the count must be a
/// positive even number. 20 is the standard; 12 and 8 are the reduced-round
/// variants in common use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rounds(usize);

impl Rounds {
    /// ChaCha8.
    pub const R8: Rounds = Rounds(8);
    /// ChaCha12.
    pub const R12: Rounds = Rounds(12);
    /// ChaCha20.
    pub const R20: Rounds = Rounds(20);

    /// Validates a round count.
    ///
    /// Returns [`Error::InvalidRounds`] for zero or odd values.
    pub const fn new(rounds: usize) -> Result<Self> {
        if rounds == 0 || rounds % 2 != 0 {
            return Err(Error::InvalidRounds(rounds));
        }
        Ok(Rounds(rounds))
    }

    /// The number of rounds.
    pub const fn get(self) -> usize {
        self.0
    }

    /// The number of column + diagonal double rounds.
    #[inline(always)]
    pub(crate) const fn double_rounds(self) -> usize {
        self.0 / 2
    }
}

impl TryFrom<usize> for Rounds {
    type Error = Error;

    fn try_from(rounds: usize) -> Result<Self> {
        Rounds::new(rounds)
    }
}
