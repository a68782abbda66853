//! Portable round engine which does not rely on architecture-specific
//! intrinsics. Produces one block per call and is always available.

use crate::stream::state::{BLOCK_SIZE, COUNTER_WORD, Rounds, State};
use crate::utils::le::store_words;

/// Blocks produced per call.
pub(crate) const PAR_BLOCKS: usize = 1;

/// Performs one ChaCha quarter round.
///
/// A quarter round mixes four 32-bit words of the state using addition
/// modulo 2³², XOR, and fixed left rotations. It is branchless and runs in
/// constant time.
#[inline(always)]
fn quarter_round(state: &mut State, a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

/// Applies the ChaCha permutation for the given number of rounds.
///
/// Each iteration performs one double round:
/// - 4 column quarter rounds
/// - 4 diagonal quarter rounds
#[inline(always)]
fn permute(state: &mut State, rounds: Rounds) {
    for _ in 0..rounds.double_rounds() {
        // Column rounds
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        // Diagonal rounds
        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

/// Writes one 64-byte keystream block for `state` into `out` and advances
/// the block counter by one (wrapping).
///
/// `out` must be exactly [`BLOCK_SIZE`] bytes long.
pub(crate) fn keystream(state: &mut State, rounds: Rounds, out: &mut [u8]) {
    debug_assert_eq!(out.len(), PAR_BLOCKS * BLOCK_SIZE);

    let mut working = *state;
    permute(&mut working, rounds);

    // Feed-forward
    working
        .iter_mut()
        .zip(state.iter())
        .for_each(|(w, s)| *w = w.wrapping_add(*s));

    store_words(&working, out);

    state[COUNTER_WORD] = state[COUNTER_WORD].wrapping_add(1);
}
