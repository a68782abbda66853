//! Little-endian word codecs and the bulk XOR loop.
//!
//! Buffers are always treated as plain byte sequences; words are decoded and
//! encoded explicitly instead of reinterpreting memory.

/// Reads a little-endian `u32` from the first four bytes of `bytes`.
#[inline(always)]
pub(crate) fn load_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Decodes `N` little-endian words from `bytes` (which must hold `4 * N`).
#[inline(always)]
pub(crate) fn load_words<const N: usize>(bytes: &[u8]) -> [u32; N] {
    let mut words = [0u32; N];
    words
        .iter_mut()
        .zip(bytes.chunks_exact(4))
        .for_each(|(w, chunk)| *w = load_u32(chunk));
    words
}

/// Serializes `words` as little-endian bytes into `out`.
#[inline(always)]
pub(crate) fn store_words(words: &[u32], out: &mut [u8]) {
    out.chunks_exact_mut(4)
        .zip(words)
        .for_each(|(chunk, word)| chunk.copy_from_slice(&word.to_le_bytes()));
}

/// XORs `keystream` into `buf`, eight bytes at a time with a byte tail.
///
/// Only `min(buf.len(), keystream.len())` bytes are touched.
#[inline]
pub(crate) fn xor_in_place(buf: &mut [u8], keystream: &[u8]) {
    let n = buf.len().min(keystream.len());
    let (buf, keystream) = (&mut buf[..n], &keystream[..n]);

    let mut words = buf.chunks_exact_mut(8);
    let mut ks_words = keystream.chunks_exact(8);
    for (d, k) in (&mut words).zip(&mut ks_words) {
        let mut a = [0u8; 8];
        let mut b = [0u8; 8];
        a.copy_from_slice(d);
        b.copy_from_slice(k);
        d.copy_from_slice(&(u64::from_ne_bytes(a) ^ u64::from_ne_bytes(b)).to_ne_bytes());
    }

    for (d, k) in words.into_remainder().iter_mut().zip(ks_words.remainder()) {
        *d ^= k;
    }
}
