//! Round engine variants.
//!
//! Every engine takes the same input (a state and a round count) and writes
//! `parallel_blocks() * 64` bytes of keystream, advancing the state's block
//! counter by the number of blocks written. Engines differ only in how many
//! blocks they compute per call; their output is bit-identical.

use cfg_if::cfg_if;

use crate::stream::state::{BLOCK_SIZE, Rounds, State};

pub(crate) mod soft;

cfg_if! {
    if #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(feature = "force-soft")))] {
        pub(crate) mod avx2;
        pub(crate) mod sse2;

        use crate::stream::state::STATE_WORDS;

        /// Serializes word-sliced lanes (`lanes[word][block]`) as consecutive
        /// 64-byte blocks.
        #[inline(always)]
        pub(super) fn scatter_lanes<const N: usize>(lanes: &[[u32; N]; STATE_WORDS], out: &mut [u8]) {
            for (j, block) in out.chunks_exact_mut(BLOCK_SIZE).enumerate() {
                for (chunk, words) in block.chunks_exact_mut(4).zip(lanes.iter()) {
                    chunk.copy_from_slice(&words[j].to_le_bytes());
                }
            }
        }
    }
}

/// Widest batch any engine produces, in blocks.
pub(crate) const MAX_PAR_BLOCKS: usize = 8;

/// A round engine implementation.
///
/// Variants are ordered from least to most capable; the dispatcher picks the
/// greatest available one whose batch fits the remaining input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Engine {
    /// Portable scalar engine, one block per call. Always available.
    Soft,
    /// SSE2, four blocks per call.
    Sse2,
    /// AVX2, eight blocks per call.
    Avx2,
}

impl Engine {
    /// All engines, least capable first.
    pub const ALL: [Engine; 3] = [Engine::Soft, Engine::Sse2, Engine::Avx2];

    /// Number of 64-byte blocks produced per call.
    pub const fn parallel_blocks(self) -> usize {
        match self {
            Engine::Soft => 1,
            Engine::Sse2 => 4,
            Engine::Avx2 => 8,
        }
    }

    /// Bytes of keystream produced per call.
    pub(crate) const fn batch_len(self) -> usize {
        self.parallel_blocks() * BLOCK_SIZE
    }

    /// Whether this engine can run on the executing machine.
    pub fn is_available(self) -> bool {
        super::dispatch::capabilities().supports(self)
    }

    /// Writes `batch_len()` bytes of keystream into `out`.
    ///
    /// Only engines handed out by the dispatcher reach this point, and the
    /// dispatcher never hands out an engine the CPU does not support.
    #[inline]
    pub(crate) fn keystream(self, state: &mut State, rounds: Rounds, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.batch_len());
        debug_assert!(self.is_available());

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(feature = "force-soft")))]
        match self {
            Engine::Soft => soft::keystream(state, rounds, out),
            // SAFETY: the dispatcher only selects SSE2 after probing it.
            Engine::Sse2 => unsafe { sse2::keystream(state, rounds, out) },
            // SAFETY: the dispatcher only selects AVX2 after probing it.
            Engine::Avx2 => unsafe { avx2::keystream(state, rounds, out) },
        }

        #[cfg(not(all(any(target_arch = "x86", target_arch = "x86_64"), not(feature = "force-soft"))))]
        for block in out.chunks_exact_mut(BLOCK_SIZE) {
            soft::keystream(state, rounds, block);
        }
    }
}
