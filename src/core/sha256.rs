//! SHA-256 implementation (FIPS 180-4)
//!
//! An incremental hasher over a fixed 64-byte block buffer. Input may be fed
//! in any number of `update` calls with arbitrary chunking; the result only
//! depends on the concatenated bytes. `finalize` consumes the hasher, so no
//! data can be added once the length padding has been applied.

use crate::core::digest::Digest;

/// Size of one message block in bytes
pub const BLOCK_LEN: usize = 64;

/// Size of a digest in bytes
pub const DIGEST_LEN: usize = 32;

/// Offset of the 64-bit length field inside the final block
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// First 32 bits of the fractional parts of the square roots of the first 8 primes
const INITIAL_STATE: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// First 32 bits of the fractional parts of the cube roots of the first 64 primes
const ROUND_CONSTANTS: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// Incremental SHA-256 hasher
#[derive(Clone)]
pub struct Sha256 {
    /// Pending bytes of the current, not yet compressed block
    block: [u8; BLOCK_LEN],
    /// Number of valid bytes in `block`, always below `BLOCK_LEN`
    block_len: usize,
    /// Running hash state
    state: [u32; 8],
    /// Total message length in bits (modulo 2^64)
    length_bits: u64,
}

impl Sha256 {
    /// Create a hasher seeded with the SHA-256 initial hash values
    pub fn new() -> Self {
        Self {
            block: [0; BLOCK_LEN],
            block_len: 0,
            state: INITIAL_STATE,
            length_bits: 0,
        }
    }

    /// Append bytes to the message
    ///
    /// Each time the pending block fills up it is compressed into the
    /// running state. Leftover bytes are kept for the next call.
    pub fn update(&mut self, mut data: &[u8]) {
        self.length_bits = self
            .length_bits
            .wrapping_add((data.len() as u64).wrapping_mul(8));

        while !data.is_empty() {
            let take = (BLOCK_LEN - self.block_len).min(data.len());
            self.block[self.block_len..self.block_len + take].copy_from_slice(&data[..take]);
            self.block_len += take;
            data = &data[take..];

            if self.block_len == BLOCK_LEN {
                compress(&mut self.state, &self.block);
                self.block_len = 0;
            }
        }
    }

    /// Apply the length padding and return the digest
    pub fn finalize(mut self) -> Digest {
        self.pad();
        self.extract()
    }

    /// Append `0x80`, zero fill, and the big-endian bit length, compressing
    /// one or two final blocks.
    fn pad(&mut self) {
        self.block[self.block_len] = 0x80;
        self.block_len += 1;

        // No room left for the length field: finish this block first
        if self.block_len > LENGTH_OFFSET {
            self.block[self.block_len..].fill(0);
            compress(&mut self.state, &self.block);
            self.block_len = 0;
        }

        self.block[self.block_len..LENGTH_OFFSET].fill(0);
        self.block[LENGTH_OFFSET..].copy_from_slice(&self.length_bits.to_be_bytes());
        compress(&mut self.state, &self.block);
        self.block_len = 0;
    }

    /// Serialize the state words big-endian
    fn extract(&self) -> Digest {
        let mut out = [0u8; DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Digest::from_bytes(out)
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

#[inline]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline]
fn choice(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline]
fn majority(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

/// Compress one 64-byte block into the running state
fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_LEN]) {
    let mut w = [0u32; 64];
    for (i, word) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
    }
    for i in 16..64 {
        w[i] = w[i - 16]
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma1(w[i - 2]));
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for i in 0..64 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(choice(e, f, g))
            .wrapping_add(ROUND_CONSTANTS[i])
            .wrapping_add(w[i]);
        let t2 = big_sigma0(a).wrapping_add(majority(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (slot, value) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *slot = slot.wrapping_add(value);
    }
}
