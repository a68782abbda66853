use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::utils::le::load_u32;

/// Size of a Poly1305 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of a Poly1305 tag in bytes.
pub const TAG_SIZE: usize = 16;

const BLOCK: usize = 16;

/// Streaming Poly1305 state.
///
/// This structure implements the Poly1305 one-time authenticator as
/// specified in RFC 8439 section 2.5, with a 26-bit limb representation.
///
/// Input may be fed in arbitrary pieces through [`Poly1305::update`]; bytes
/// are buffered until a full 16-byte block is available, so the result only
/// depends on the concatenated input.
///
/// # Security
///
/// - A key must authenticate exactly one message.
/// - All arithmetic runs in constant time with respect to key and message.
/// - Key material and the accumulator are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Poly1305 {
    /// Clamped `r` value, split into five 26-bit limbs.
    r: [u32; 5],

    /// Accumulator `h`, five 26-bit limbs.
    h: [u32; 5],

    /// `s` value (second half of the key), added at finalization.
    s: [u8; 16],

    /// Pending bytes of an incomplete block.
    buffer: [u8; BLOCK],
    buffered: usize,
}

impl Poly1305 {
    /// Creates a new Poly1305 instance from a one-time 32-byte key.
    ///
    /// # Key layout
    ///
    /// - `key[0..16]` → `r` (clamped, used for polynomial multiplication)
    /// - `key[16..32]` → `s` (added at finalization)
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let r0 = load_u32(&key[0..4]) & 0x0fff_ffff;
        let r1 = load_u32(&key[4..8]) & 0x0fff_fffc;
        let r2 = load_u32(&key[8..12]) & 0x0fff_fffc;
        let r3 = load_u32(&key[12..16]) & 0x0fff_fffc;

        let r = [
            r0 & 0x3ffffff,
            ((r0 >> 26) | (r1 << 6)) & 0x3ffffff,
            ((r1 >> 20) | (r2 << 12)) & 0x3ffffff,
            ((r2 >> 14) | (r3 << 18)) & 0x3ffffff,
            (r3 >> 8) & 0x3ffffff,
        ];

        let mut s = [0u8; 16];
        s.copy_from_slice(&key[16..32]);

        Poly1305 {
            r,
            h: [0; 5],
            s,
            buffer: [0; BLOCK],
            buffered: 0,
        }
    }

    /// Absorbs `data`. May be called any number of times.
    pub fn update(&mut self, mut data: &[u8]) {
        if self.buffered > 0 {
            let take = data.len().min(BLOCK - self.buffered);
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK {
                return;
            }

            let block = self.buffer;
            self.update_block(&block);
            self.buffered = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK);
        for block in &mut blocks {
            self.update_block(block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Absorbs a single block of at most 16 bytes.
    ///
    /// The block is read as a little-endian integer with an implicit `1` bit
    /// appended at position `8 * block.len()`, then:
    ///
    /// ```text
    /// h = (h + block) * r mod (2^130 - 5)
    /// ```
    fn update_block(&mut self, block: &[u8]) {
        let mut padded = [0u8; 17];
        padded[..block.len()].copy_from_slice(block);
        padded[block.len()] = 1;

        let t0 = load_u32(&padded[0..4]);
        let t1 = load_u32(&padded[4..8]);
        let t2 = load_u32(&padded[8..12]);
        let t3 = load_u32(&padded[12..16]);
        let t4 = padded[16] as u32;

        self.h[0] = self.h[0].wrapping_add(t0 & 0x3ffffff);
        self.h[1] = self.h[1].wrapping_add(((t0 >> 26) | (t1 << 6)) & 0x3ffffff);
        self.h[2] = self.h[2].wrapping_add(((t1 >> 20) | (t2 << 12)) & 0x3ffffff);
        self.h[3] = self.h[3].wrapping_add(((t2 >> 14) | (t3 << 18)) & 0x3ffffff);
        self.h[4] = self.h[4].wrapping_add(((t3 >> 8) | (t4 << 24)) & 0x3ffffff);

        let [h0, h1, h2, h3, h4] = self.h.map(u64::from);
        let [r0, r1, r2, r3, r4] = self.r.map(u64::from);

        let r1_5 = r1 * 5;
        let r2_5 = r2 * 5;
        let r3_5 = r3 * 5;
        let r4_5 = r4 * 5;

        let d0 = h0 * r0 + h1 * r4_5 + h2 * r3_5 + h3 * r2_5 + h4 * r1_5;
        let mut d1 = h0 * r1 + h1 * r0 + h2 * r4_5 + h3 * r3_5 + h4 * r2_5;
        let mut d2 = h0 * r2 + h1 * r1 + h2 * r0 + h3 * r4_5 + h4 * r3_5;
        let mut d3 = h0 * r3 + h1 * r2 + h2 * r1 + h3 * r0 + h4 * r4_5;
        let mut d4 = h0 * r4 + h1 * r3 + h2 * r2 + h3 * r1 + h4 * r0;

        let mut c: u64;

        c = d0 >> 26;
        self.h[0] = (d0 & 0x3ffffff) as u32;
        d1 += c;

        c = d1 >> 26;
        self.h[1] = (d1 & 0x3ffffff) as u32;
        d2 += c;

        c = d2 >> 26;
        self.h[2] = (d2 & 0x3ffffff) as u32;
        d3 += c;

        c = d3 >> 26;
        self.h[3] = (d3 & 0x3ffffff) as u32;
        d4 += c;

        c = d4 >> 26;
        self.h[4] = (d4 & 0x3ffffff) as u32;
        self.h[0] += (c * 5) as u32;

        c = (self.h[0] >> 26) as u64;
        self.h[0] &= 0x3ffffff;
        self.h[1] += c as u32;
    }

    /// Finalizes the computation and returns the 16-byte tag.
    ///
    /// Consumes the state, so a key cannot be finalized twice.
    ///
    /// # Algorithm
    ///
    /// 1. Absorb any buffered partial block
    /// 2. Final carry propagation and full reduction modulo `2^130 - 5`
    /// 3. Constant-time conditional subtraction of the modulus
    /// 4. Addition of `s` modulo `2^128`
    pub fn finalize(mut self) -> [u8; TAG_SIZE] {
        if self.buffered > 0 {
            let block = self.buffer;
            let len = self.buffered;
            self.update_block(&block[..len]);
        }

        let mut c: u32;

        c = self.h[1] >> 26;
        self.h[1] &= 0x3ffffff;
        self.h[2] += c;

        c = self.h[2] >> 26;
        self.h[2] &= 0x3ffffff;
        self.h[3] += c;

        c = self.h[3] >> 26;
        self.h[3] &= 0x3ffffff;
        self.h[4] += c;

        c = self.h[4] >> 26;
        self.h[4] &= 0x3ffffff;
        self.h[0] += c * 5;

        c = self.h[0] >> 26;
        self.h[0] &= 0x3ffffff;
        self.h[1] += c;

        // g = h + 5 - 2^130; keep g only if it did not underflow
        let mut g = [0u32; 5];
        g[0] = self.h[0].wrapping_add(5);
        c = g[0] >> 26;
        g[0] &= 0x3ffffff;

        for (h_i, g_i) in self.h[1..].iter().zip(&mut g[1..]) {
            *g_i = h_i.wrapping_add(c);
            c = *g_i >> 26;
            *g_i &= 0x3ffffff;
        }

        let mask = 0u32.wrapping_sub(c);

        for (h_i, g_i) in self.h.iter_mut().zip(&g) {
            *h_i = (*h_i & !mask) | (*g_i & mask);
        }

        let words = [
            self.h[0] | (self.h[1] << 26),
            (self.h[1] >> 6) | (self.h[2] << 20),
            (self.h[2] >> 12) | (self.h[3] << 14),
            (self.h[3] >> 18) | (self.h[4] << 8),
        ];

        let mut tag = [0u8; TAG_SIZE];
        let mut carry = 0u64;
        for (i, word) in words.iter().enumerate() {
            let sum = u64::from(*word) + u64::from(load_u32(&self.s[4 * i..4 * i + 4])) + carry;
            tag[4 * i..4 * i + 4].copy_from_slice(&(sum as u32).to_le_bytes());
            carry = sum >> 32;
        }

        tag
    }
}
