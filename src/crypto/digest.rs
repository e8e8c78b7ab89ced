//! RIPEMD-128 hash digest.
//!
//! This module provides the RIPEMD-128 message digest used for:
//! - Deriving cipher keys from passwords or device identifiers
//! - Computing checksums for data integrity
//!
//! Both a one-shot function ([`ripemd_digest`]) and an incremental hasher
//! ([`Ripemd128`]) are available. The incremental hasher only keeps the
//! trailing partial block, so arbitrarily large inputs are hashed in constant
//! memory.
//!
//! # Examples
//!
//! ```
//! use ripsalsa::crypto::digest::{ripemd_digest, Ripemd128};
//!
//! let digest = ripemd_digest(b"abc");
//! assert_eq!(hex::encode(digest), "c14a12199c66e4ba84636b0f69144c77");
//!
//! let mut hasher = Ripemd128::new();
//! hasher.update(b"a");
//! hasher.update(b"bc");
//! assert_eq!(hasher.finalize(), digest);
//! ```

use std::io::{self, Read, Write};

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use crate::Result;

/// Size of a RIPEMD-128 digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Size of a compression block in bytes.
pub const BLOCK_LEN: usize = 64;

const INITIAL_STATE: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

// Round constants, one per 16-step round.
const K_LEFT: [u32; 4] = [0x0000_0000, 0x5a82_7999, 0x6ed9_eba1, 0x8f1b_bcdc];
const K_RIGHT: [u32; 4] = [0x50a2_8be6, 0x5c4d_d124, 0x6d70_3ef3, 0x0000_0000];

// Message word selection per step.
const R_LEFT: [usize; 64] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
    7, 4, 13, 1, 10, 6, 15, 3, 12, 0, 9, 5, 2, 14, 11, 8,
    3, 10, 14, 4, 9, 15, 8, 1, 2, 7, 0, 6, 13, 11, 5, 12,
    1, 9, 11, 10, 0, 8, 12, 4, 13, 3, 7, 15, 14, 5, 6, 2,
];

const R_RIGHT: [usize; 64] = [
    5, 14, 7, 0, 9, 2, 11, 4, 13, 6, 15, 8, 1, 10, 3, 12,
    6, 11, 3, 7, 0, 13, 5, 10, 14, 15, 8, 12, 4, 9, 1, 2,
    15, 5, 1, 3, 7, 14, 6, 9, 11, 8, 12, 2, 10, 0, 4, 13,
    8, 6, 4, 1, 3, 11, 15, 0, 5, 12, 2, 13, 9, 7, 10, 14,
];

// Left-rotation amounts per step.
const S_LEFT: [u32; 64] = [
    11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8,
    7, 6, 8, 13, 11, 9, 7, 15, 7, 12, 15, 9, 11, 7, 13, 12,
    11, 13, 6, 7, 14, 9, 13, 15, 14, 8, 13, 6, 5, 12, 7, 5,
    11, 12, 14, 15, 14, 15, 9, 8, 9, 14, 5, 6, 8, 6, 5, 12,
];

const S_RIGHT: [u32; 64] = [
    8, 9, 9, 11, 13, 15, 15, 5, 7, 7, 8, 11, 14, 14, 12, 6,
    9, 13, 15, 7, 12, 8, 9, 11, 7, 7, 12, 7, 6, 15, 13, 11,
    9, 7, 15, 11, 8, 6, 6, 14, 12, 13, 5, 14, 13, 13, 7, 5,
    15, 5, 8, 11, 14, 14, 6, 14, 6, 9, 12, 9, 12, 5, 15, 8,
];

/// Boolean function of the given round (0..4). The right line runs the
/// same functions in reverse order.
#[inline]
fn boolean_fn(round: usize, x: u32, y: u32, z: u32) -> u32 {
    match round {
        0 => x ^ y ^ z,
        1 => (x & y) | (!x & z),
        2 => (x | !y) ^ z,
        _ => (x & z) | (y & !z),
    }
}

/// Compresses one 64-byte block into the hash state.
fn compress(h: &mut [u32; 4], block: &[u8]) {
    let mut x = [0u32; 16];
    LittleEndian::read_u32_into(block, &mut x);

    let [mut a1, mut b1, mut c1, mut d1] = *h;
    let [mut a2, mut b2, mut c2, mut d2] = *h;

    for j in 0..64 {
        let round = j / 16;

        let t = a1
            .wrapping_add(boolean_fn(round, b1, c1, d1))
            .wrapping_add(x[R_LEFT[j]])
            .wrapping_add(K_LEFT[round])
            .rotate_left(S_LEFT[j]);
        a1 = d1;
        d1 = c1;
        c1 = b1;
        b1 = t;

        let t = a2
            .wrapping_add(boolean_fn(3 - round, b2, c2, d2))
            .wrapping_add(x[R_RIGHT[j]])
            .wrapping_add(K_RIGHT[round])
            .rotate_left(S_RIGHT[j]);
        a2 = d2;
        d2 = c2;
        c2 = b2;
        b2 = t;
    }

    let t = h[1].wrapping_add(c1).wrapping_add(d2);
    h[1] = h[2].wrapping_add(d1).wrapping_add(a2);
    h[2] = h[3].wrapping_add(a1).wrapping_add(b2);
    h[3] = h[0].wrapping_add(b1).wrapping_add(c2);
    h[0] = t;
}

/// Incremental RIPEMD-128 hasher.
///
/// Feed data with [`update`](Self::update) any number of times, then call
/// [`finalize`](Self::finalize) to obtain the 16-byte digest. Splitting the
/// input differently never changes the result.
///
/// The hasher also implements [`std::io::Write`], so it can be the target of
/// [`std::io::copy`].
#[derive(Clone)]
pub struct Ripemd128 {
    h: [u32; 4],
    buffer: [u8; BLOCK_LEN],
    buffer_len: usize,
    /// Total bytes fed so far
    total_len: u64,
}

impl Default for Ripemd128 {
    fn default() -> Self {
        Self {
            h: INITIAL_STATE,
            buffer: [0; BLOCK_LEN],
            buffer_len: 0,
            total_len: 0,
        }
    }
}

impl std::fmt::Debug for Ripemd128 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ripemd128")
            .field("total_len", &self.total_len)
            .finish_non_exhaustive()
    }
}

impl Ripemd128 {
    /// Creates a hasher in the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the digest of `data` in one call.
    pub fn digest(data: &[u8]) -> [u8; DIGEST_LEN] {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Feeds more message bytes into the hasher.
    pub fn update(&mut self, data: &[u8]) {
        self.total_len = self.total_len.wrapping_add(data.len() as u64);
        self.absorb(data);
    }

    /// Applies the padding and returns the digest.
    ///
    /// The digest is the four state registers, each serialized little-endian.
    pub fn finalize(mut self) -> [u8; DIGEST_LEN] {
        trace!("RIPEMD-128 finalize after {} bytes", self.total_len);

        let bit_len = self.total_len.wrapping_mul(8);
        let pad_len = if self.buffer_len < BLOCK_LEN - 8 {
            BLOCK_LEN - 8 - self.buffer_len
        } else {
            2 * BLOCK_LEN - 8 - self.buffer_len
        };
        let mut padding = [0u8; 2 * BLOCK_LEN];
        padding[0] = 0x80;
        LittleEndian::write_u64(&mut padding[pad_len..pad_len + 8], bit_len);
        self.absorb(&padding[..pad_len + 8]);
        debug_assert_eq!(self.buffer_len, 0);

        let mut digest = [0u8; DIGEST_LEN];
        LittleEndian::write_u32_into(&self.h, &mut digest);
        digest
    }

    /// Runs whole blocks through the compression function, buffering the
    /// trailing partial block. Does not count toward the message length.
    fn absorb(&mut self, data: &[u8]) {
        let mut input = data;

        if self.buffer_len > 0 {
            let take = (BLOCK_LEN - self.buffer_len).min(input.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&input[..take]);
            self.buffer_len += take;
            input = &input[take..];
            if self.buffer_len < BLOCK_LEN {
                return;
            }
            compress(&mut self.h, &self.buffer);
            self.buffer_len = 0;
        }

        let mut blocks = input.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            compress(&mut self.h, block);
        }
        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }
}

impl Write for Ripemd128 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Computes a RIPEMD-128 hash digest of the input data.
///
/// # Arguments
///
/// * `data` - The data to hash
///
/// # Returns
///
/// Returns the 16-byte RIPEMD-128 digest. Never fails, including for empty input.
pub fn ripemd_digest(data: &[u8]) -> [u8; DIGEST_LEN] {
    Ripemd128::digest(data)
}

/// Computes the RIPEMD-128 digest of everything a reader yields.
///
/// # Errors
///
/// Returns an error if reading from `reader` fails.
pub fn ripemd_digest_reader<R: Read>(mut reader: R) -> Result<[u8; DIGEST_LEN]> {
    let mut hasher = Ripemd128::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ripemd128::{Digest, Ripemd128 as ReferenceRipemd128};

    const VECTORS: &[(&str, &str)] = &[
        ("", "cdf26213a150dc3ecb610f18f6b38b46"),
        ("a", "86be7afa339d0fc7cfc785e72f578d33"),
        ("abc", "c14a12199c66e4ba84636b0f69144c77"),
        ("message digest", "9e327b3d6e523062afc1132d7df9d1b8"),
        ("abcdefghijklmnopqrstuvwxyz", "fd2aa607f71dc8f510714922b371834e"),
        (
            "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
            "a1aa0689d0fafa2ddc22e88b49133a06",
        ),
        (
            "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
            "d1e959eb179c911faea4624c60c5c702",
        ),
    ];

    fn reference_digest(data: &[u8]) -> Vec<u8> {
        let mut hasher = ReferenceRipemd128::new();
        hasher.input(data);
        hasher.result().to_vec()
    }

    #[test]
    fn test_reference_vectors() {
        for (message, expected) in VECTORS {
            assert_eq!(hex::encode(ripemd_digest(message.as_bytes())), *expected, "message {:?}", message);
        }
        let repeated = "1234567890".repeat(8);
        assert_eq!(hex::encode(ripemd_digest(repeated.as_bytes())), "3f45ef194732c2dbb2c4a2c769795fa3");
    }

    #[test]
    fn test_million_a() {
        let data = vec![b'a'; 1_000_000];
        assert_eq!(hex::encode(ripemd_digest(&data)), "4a7f5723f954eba1216c9d8f6320431f");
    }

    #[test]
    fn test_key_derivation_message() {
        let message = [0x95, 0x36, 0x00, 0x00, 0x95, 0x36, 0x00, 0x00];
        let expected = [
            0x5e, 0x44, 0xe5, 0x4f, 0x0a, 0xaf, 0x7d, 0x40,
            0x28, 0xdb, 0x13, 0x3a, 0x56, 0xfb, 0xd3, 0x65,
        ];
        assert_eq!(ripemd_digest(&message), expected);
    }

    #[test]
    fn test_padding_boundaries() {
        // 55, 56, 63 and 64 bytes straddle the one/two padding block switch
        for len in [55usize, 56, 57, 63, 64, 65, 119, 120, 128] {
            let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
            assert_eq!(ripemd_digest(&data).to_vec(), reference_digest(&data), "length {}", len);
        }
    }

    #[test]
    fn test_million_a_streamed() {
        let mut hasher = Ripemd128::new();
        let chunk = [b'a'; 1000];
        for _ in 0..1000 {
            hasher.update(&chunk);
        }
        assert_eq!(hex::encode(hasher.finalize()), "4a7f5723f954eba1216c9d8f6320431f");
    }

    #[test]
    fn test_reader_digest() {
        let data = b"message digest".to_vec();
        let digest = ripemd_digest_reader(std::io::Cursor::new(data)).unwrap();
        assert_eq!(hex::encode(digest), "9e327b3d6e523062afc1132d7df9d1b8");
    }

    #[test]
    fn test_reader_error_propagates() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
        }
        let err = ripemd_digest_reader(FailingReader).unwrap_err();
        assert!(matches!(err, crate::CryptoError::Io { .. }));
    }

    #[test]
    fn test_cloned_state_forks() {
        let mut hasher = Ripemd128::new();
        hasher.update(b"message ");
        let mut fork = hasher.clone();
        hasher.update(b"digest");
        fork.update(b"digest");
        assert_eq!(hasher.finalize(), fork.finalize());
    }

    proptest! {
        #[test]
        fn prop_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..600)) {
            prop_assert_eq!(ripemd_digest(&data).to_vec(), reference_digest(&data));
        }

        #[test]
        fn prop_split_updates_agree(
            data in proptest::collection::vec(any::<u8>(), 0..400),
            cuts in proptest::collection::vec(any::<usize>(), 0..6),
        ) {
            let mut points: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
            points.sort_unstable();
            let mut hasher = Ripemd128::new();
            let mut start = 0;
            for point in points {
                hasher.update(&data[start..point]);
                start = point;
            }
            hasher.update(&data[start..]);
            prop_assert_eq!(hasher.finalize(), ripemd_digest(&data));
        }
    }
}
