//! SSE2 round engine.
//!
//! Word-sliced: register `v[i]` holds state word `i` of four consecutive
//! blocks, one block per 32-bit lane, so the quarter rounds are the same
//! column/diagonal index pattern as the portable engine.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::scatter_lanes;
use crate::stream::state::{BLOCK_SIZE, COUNTER_WORD, Rounds, STATE_WORDS, State};

/// Blocks produced per call.
pub(crate) const PAR_BLOCKS: usize = 4;

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn rotl<const L: i32, const R: i32>(x: __m128i) -> __m128i {
    _mm_or_si128(_mm_slli_epi32::<L>(x), _mm_srli_epi32::<R>(x))
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn quarter_round(v: &mut [__m128i; STATE_WORDS], a: usize, b: usize, c: usize, d: usize) {
    unsafe {
        v[a] = _mm_add_epi32(v[a], v[b]);
        v[d] = rotl::<16, 16>(_mm_xor_si128(v[d], v[a]));

        v[c] = _mm_add_epi32(v[c], v[d]);
        v[b] = rotl::<12, 20>(_mm_xor_si128(v[b], v[c]));

        v[a] = _mm_add_epi32(v[a], v[b]);
        v[d] = rotl::<8, 24>(_mm_xor_si128(v[d], v[a]));

        v[c] = _mm_add_epi32(v[c], v[d]);
        v[b] = rotl::<7, 25>(_mm_xor_si128(v[b], v[c]));
    }
}

/// Writes four keystream blocks (counters `c..c+3`) into `out` and advances
/// the block counter by four (wrapping).
///
/// # Safety
///
/// The executing CPU must support SSE2. `out` must be exactly
/// `PAR_BLOCKS * BLOCK_SIZE` bytes long.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn keystream(state: &mut State, rounds: Rounds, out: &mut [u8]) {
    debug_assert_eq!(out.len(), PAR_BLOCKS * BLOCK_SIZE);

    let counter = state[COUNTER_WORD];
    let mut lanes = [[0u32; PAR_BLOCKS]; STATE_WORDS];

    unsafe {
        let mut v = [_mm_setzero_si128(); STATE_WORDS];
        for (reg, word) in v.iter_mut().zip(state.iter()) {
            *reg = _mm_set1_epi32(*word as i32);
        }
        v[COUNTER_WORD] = _mm_setr_epi32(
            counter as i32,
            counter.wrapping_add(1) as i32,
            counter.wrapping_add(2) as i32,
            counter.wrapping_add(3) as i32,
        );

        let original = v;

        for _ in 0..rounds.double_rounds() {
            quarter_round(&mut v, 0, 4, 8, 12);
            quarter_round(&mut v, 1, 5, 9, 13);
            quarter_round(&mut v, 2, 6, 10, 14);
            quarter_round(&mut v, 3, 7, 11, 15);

            quarter_round(&mut v, 0, 5, 10, 15);
            quarter_round(&mut v, 1, 6, 11, 12);
            quarter_round(&mut v, 2, 7, 8, 13);
            quarter_round(&mut v, 3, 4, 9, 14);
        }

        for ((lane, reg), orig) in lanes.iter_mut().zip(v.iter()).zip(original.iter()) {
            _mm_storeu_si128(lane.as_mut_ptr().cast(), _mm_add_epi32(*reg, *orig));
        }
    }

    scatter_lanes(&lanes, out);

    state[COUNTER_WORD] = counter.wrapping_add(PAR_BLOCKS as u32);
}
