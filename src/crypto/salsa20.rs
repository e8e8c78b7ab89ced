//! Salsa20 stream cipher implementation.
//!
//! This module provides an implementation of the Salsa20 stream cipher after
//! the reference implementation by D. J. Bernstein (public domain).
//! Both key sizes are supported: 16-byte keys (Salsa20/128) and 32-byte keys
//! (Salsa20/256), with an 8-byte nonce and any positive even round count.
//!
//! Encryption and decryption are the same operation: the input is XORed with
//! the keystream and the block counter advances by one per 64-byte window.
//!
//! # Examples
//!
//! ```
//! use ripsalsa::crypto::Salsa20;
//!
//! let key = [7u8; 32];
//! let nonce = [0u8; 8];
//!
//! let ciphertext = Salsa20::new(&key, &nonce)?.process(b"attack at dawn");
//! let plaintext = Salsa20::new(&key, &nonce)?.process(&ciphertext);
//! assert_eq!(plaintext, b"attack at dawn");
//! # Ok::<(), ripsalsa::CryptoError>(())
//! ```

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};

use crate::{CryptoError, Result};

/// Size of one keystream block in bytes.
pub const BLOCK_LEN: usize = 64;

/// Required nonce length in bytes.
pub const NONCE_LEN: usize = 8;

/// Round count used when none is given.
pub const DEFAULT_ROUNDS: u32 = 20;

// "expand 32-byte k"
const SIGMA: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];
// "expand 16-byte k"
const TAU: [u32; 4] = [0x6170_7865, 0x3120_646e, 0x7962_2d36, 0x6b20_6574];

/// Expanded key material, resolved once at construction.
///
/// A 16-byte key fills all eight key slots by repeating its four words and is
/// paired with the `"expand 16-byte k"` constants; a 32-byte key maps onto the
/// eight slots directly and uses `"expand 32-byte k"`.
#[derive(Clone, PartialEq, Eq)]
pub enum KeySchedule {
    Key128([u32; 4]),
    Key256([u32; 8]),
}

impl KeySchedule {
    /// Expands a raw key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeySize`] unless the key is 16 or 32 bytes.
    pub fn expand(key: &[u8]) -> Result<Self> {
        match key.len() {
            16 => {
                let mut words = [0u32; 4];
                LittleEndian::read_u32_into(key, &mut words);
                Ok(KeySchedule::Key128(words))
            }
            32 => {
                let mut words = [0u32; 8];
                LittleEndian::read_u32_into(key, &mut words);
                Ok(KeySchedule::Key256(words))
            }
            len => Err(CryptoError::invalid_key_size(len)),
        }
    }

    /// Key length in bytes.
    pub fn key_size(&self) -> usize {
        match self {
            KeySchedule::Key128(_) => 16,
            KeySchedule::Key256(_) => 32,
        }
    }

    fn constants(&self) -> &'static [u32; 4] {
        match self {
            KeySchedule::Key128(_) => &TAU,
            KeySchedule::Key256(_) => &SIGMA,
        }
    }

    fn key_words(&self) -> [u32; 8] {
        match *self {
            KeySchedule::Key128([k0, k1, k2, k3]) => [k0, k1, k2, k3, k0, k1, k2, k3],
            KeySchedule::Key256(words) => words,
        }
    }
}

/// Salsa20 cipher context.
///
/// Key words, nonce, constants and round count are fixed at construction; only
/// the block counter moves, advanced by [`process`](Self::process) and
/// [`apply_keystream`](Self::apply_keystream) or set by [`seek`](Self::seek).
/// Use one instance per logical stream; clone it to start a second stream from
/// the same position.
#[derive(Clone)]
pub struct Salsa20 {
    /// Pre-round state with the counter slots left at zero
    input: [u32; 16],
    key_size: usize,
    counter: u64,
    rounds: u32,
}

impl std::fmt::Debug for Salsa20 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut nonce = [0u8; NONCE_LEN];
        LittleEndian::write_u32_into(&self.input[6..8], &mut nonce);
        f.debug_struct("Salsa20")
            .field("key_size", &self.key_size)
            .field("nonce", &hex::encode(nonce))
            .field("counter", &self.counter)
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

impl Salsa20 {
    /// Creates a cipher at counter 0 with 20 rounds.
    ///
    /// # Arguments
    ///
    /// * `key` - 16-byte (Salsa20/128) or 32-byte (Salsa20/256) key
    /// * `nonce` - 8-byte nonce
    ///
    /// # Errors
    ///
    /// See [`with_params`](Self::with_params).
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        Self::with_params(key, nonce, 0, DEFAULT_ROUNDS)
    }

    /// Creates a cipher with an explicit starting counter and round count.
    ///
    /// # Arguments
    ///
    /// * `key` - 16-byte (Salsa20/128) or 32-byte (Salsa20/256) key
    /// * `nonce` - 8-byte nonce
    /// * `counter` - Initial block counter
    /// * `rounds` - Number of rounds, positive and even
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeySize`], [`CryptoError::InvalidNonceSize`]
    /// or [`CryptoError::InvalidRounds`], checked in that order.
    pub fn with_params(key: &[u8], nonce: &[u8], counter: u64, rounds: u32) -> Result<Self> {
        let schedule = KeySchedule::expand(key)?;
        if nonce.len() != NONCE_LEN {
            return Err(CryptoError::invalid_nonce_size(nonce.len()));
        }
        if rounds == 0 || rounds % 2 != 0 {
            return Err(CryptoError::invalid_rounds(rounds));
        }

        let constants = schedule.constants();
        let k = schedule.key_words();
        let mut n = [0u32; 2];
        LittleEndian::read_u32_into(nonce, &mut n);

        let input = [
            constants[0], k[0], k[1], k[2],
            k[3], constants[1], n[0], n[1],
            0, 0, constants[2], k[4],
            k[5], k[6], k[7], constants[3],
        ];

        debug!(
            "Salsa20 setup: {}-bit key, {} rounds, counter {}",
            schedule.key_size() * 8,
            rounds,
            counter
        );

        Ok(Self {
            input,
            key_size: schedule.key_size(),
            counter,
            rounds,
        })
    }

    /// Block counter used for the next keystream block.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Number of rounds per keystream block.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Key length in bytes (16 or 32).
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Resets the internal counter to a specific block index.
    ///
    /// No validation is done; reusing a counter position repeats keystream.
    pub fn seek(&mut self, counter: u64) {
        self.counter = counter;
    }

    /// Encrypts/decrypts `data` and advances the internal counter.
    ///
    /// Returns a buffer of the same length as `data`.
    pub fn process(&mut self, data: &[u8]) -> Vec<u8> {
        let mut output = data.to_vec();
        self.apply_keystream(&mut output);
        output
    }

    /// XORs the keystream into `buf` in place.
    ///
    /// Each 64-byte window, including a shorter final one, consumes one block
    /// counter value.
    pub fn apply_keystream(&mut self, buf: &mut [u8]) {
        for chunk in buf.chunks_mut(BLOCK_LEN) {
            let block = self.keystream_block(self.counter);
            for (byte, key_byte) in chunk.iter_mut().zip(block.iter()) {
                *byte ^= key_byte;
            }
            self.counter = self.counter.wrapping_add(1);
            if self.counter == 0 {
                warn!("Salsa20 block counter wrapped around");
            }
        }
    }

    /// Generates the keystream block for `counter` without touching the
    /// cipher's own counter.
    pub fn keystream_block(&self, counter: u64) -> [u8; BLOCK_LEN] {
        let mut state = self.input;
        state[8] = counter as u32;
        state[9] = (counter >> 32) as u32;

        let mut output = [0u8; BLOCK_LEN];
        salsa20_word_to_byte(&mut output, &state, self.rounds);
        output
    }
}

/// One quarter-round step: `x[target] ^= rotl(x[a] + x[b], shift)`.
#[inline(always)]
fn step(x: &mut [u32; 16], target: usize, a: usize, b: usize, shift: u32) {
    x[target] ^= x[a].wrapping_add(x[b]).rotate_left(shift);
}

/// Four quarter-round steps over the indices `(p0, p1, p2, p3)`.
#[inline(always)]
fn quarter_round(x: &mut [u32; 16], p0: usize, p1: usize, p2: usize, p3: usize) {
    step(x, p1, p0, p3, 7);
    step(x, p2, p1, p0, 9);
    step(x, p3, p2, p1, 13);
    step(x, p0, p3, p2, 18);
}

fn double_round(x: &mut [u32; 16]) {
    // columns
    quarter_round(x, 0, 4, 8, 12);
    quarter_round(x, 5, 9, 13, 1);
    quarter_round(x, 10, 14, 2, 6);
    quarter_round(x, 15, 3, 7, 11);
    // rows
    quarter_round(x, 0, 1, 2, 3);
    quarter_round(x, 5, 6, 7, 4);
    quarter_round(x, 10, 11, 8, 9);
    quarter_round(x, 15, 12, 13, 14);
}

fn salsa20_word_to_byte(output: &mut [u8; BLOCK_LEN], input: &[u32; 16], rounds: u32) {
    let mut x = *input;

    for _ in 0..rounds / 2 {
        double_round(&mut x);
    }

    for (word, original) in x.iter_mut().zip(input.iter()) {
        *word = word.wrapping_add(*original);
    }
    LittleEndian::write_u32_into(&x, output);
}
