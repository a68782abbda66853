//! AVX2 round engine: the SSE2 layout widened to eight 32-bit lanes, so one
//! call produces eight consecutive blocks.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::scatter_lanes;
use crate::stream::state::{BLOCK_SIZE, COUNTER_WORD, Rounds, STATE_WORDS, State};

/// Blocks produced per call.
pub(crate) const PAR_BLOCKS: usize = 8;

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn rotl<const L: i32, const R: i32>(x: __m256i) -> __m256i {
    _mm256_or_si256(_mm256_slli_epi32::<L>(x), _mm256_srli_epi32::<R>(x))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn quarter_round(v: &mut [__m256i; STATE_WORDS], a: usize, b: usize, c: usize, d: usize) {
    unsafe {
        v[a] = _mm256_add_epi32(v[a], v[b]);
        v[d] = rotl::<16, 16>(_mm256_xor_si256(v[d], v[a]));

        v[c] = _mm256_add_epi32(v[c], v[d]);
        v[b] = rotl::<12, 20>(_mm256_xor_si256(v[b], v[c]));

        v[a] = _mm256_add_epi32(v[a], v[b]);
        v[d] = rotl::<8, 24>(_mm256_xor_si256(v[d], v[a]));

        v[c] = _mm256_add_epi32(v[c], v[d]);
        v[b] = rotl::<7, 25>(_mm256_xor_si256(v[b], v[c]));
    }
}

/// Writes eight keystream blocks (counters `c..c+7`) into `out` and advances
/// the block counter by eight (wrapping).
///
/// # Safety
///
/// The executing CPU must support AVX2. `out` must be exactly
/// `PAR_BLOCKS * BLOCK_SIZE` bytes long.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn keystream(state: &mut State, rounds: Rounds, out: &mut [u8]) {
    debug_assert_eq!(out.len(), PAR_BLOCKS * BLOCK_SIZE);

    let counter = state[COUNTER_WORD];
    let mut lanes = [[0u32; PAR_BLOCKS]; STATE_WORDS];

    unsafe {
        let mut v = [_mm256_setzero_si256(); STATE_WORDS];
        for (reg, word) in v.iter_mut().zip(state.iter()) {
            *reg = _mm256_set1_epi32(*word as i32);
        }
        v[COUNTER_WORD] = _mm256_setr_epi32(
            counter as i32,
            counter.wrapping_add(1) as i32,
            counter.wrapping_add(2) as i32,
            counter.wrapping_add(3) as i32,
            counter.wrapping_add(4) as i32,
            counter.wrapping_add(5) as i32,
            counter.wrapping_add(6) as i32,
            counter.wrapping_add(7) as i32,
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
            _mm256_storeu_si256(lane.as_mut_ptr().cast(), _mm256_add_epi32(*reg, *orig));
        }
    }

    scatter_lanes(&lanes, out);

    state[COUNTER_WORD] = counter.wrapping_add(PAR_BLOCKS as u32);
}
