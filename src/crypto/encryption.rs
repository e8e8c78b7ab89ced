//! Buffer-oriented encryption on top of the Salsa20 keystream.
//!
//! This module provides:
//! - The [`Encryptor`] trait, a uniform encrypt/decrypt-into-buffer interface
//! - [`Salsa20Config`], the serializable counter/round settings of a cipher
//! - [`encrypt_salsa20`] and [`decrypt_salsa20`], zero-nonce one-shot helpers
//!
//! # Examples
//!
//! ```
//! use ripsalsa::crypto::{Encryptor, Salsa20};
//!
//! let key = [1u8; 16];
//! let nonce = [0u8; 8];
//! let plaintext = b"Hello, World!";
//! let mut ciphertext = vec![0u8; plaintext.len()];
//! let mut decrypted = vec![0u8; plaintext.len()];
//!
//! Salsa20::new(&key, &nonce)?.encrypt(plaintext, &mut ciphertext)?;
//! Salsa20::new(&key, &nonce)?.decrypt(&ciphertext, &mut decrypted)?;
//! assert_eq!(plaintext, &decrypted[..]);
//! # Ok::<(), ripsalsa::CryptoError>(())
//! ```

use serde::{Deserialize, Serialize};

use super::salsa20::{Salsa20, DEFAULT_ROUNDS, NONCE_LEN};
use crate::{CryptoError, Result};

/// Common interface for encryption and decryption operations.
pub trait Encryptor {
    /// Encrypts the input data into the output buffer.
    ///
    /// # Arguments
    ///
    /// * `input` - The plaintext data to encrypt
    /// * `output` - The buffer to write encrypted data to (must be same length as input)
    ///
    /// # Errors
    ///
    /// Returns an error if the input and output lengths don't match.
    fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()>;

    /// Decrypts the input data into the output buffer.
    ///
    /// # Arguments
    ///
    /// * `input` - The encrypted data to decrypt
    /// * `output` - The buffer to write decrypted data to (must be same length as input)
    ///
    /// # Errors
    ///
    /// Returns an error if the input and output lengths don't match.
    fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()>;
}

impl Encryptor for Salsa20 {
    fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        if input.len() != output.len() {
            return Err(CryptoError::length_mismatch(input.len(), output.len()));
        }
        output.copy_from_slice(input);
        self.apply_keystream(output);
        Ok(())
    }

    fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        // Salsa20 decryption is identical to encryption due to XOR
        self.encrypt(input, output)
    }
}

/// Cipher settings that can be stored alongside encrypted data.
///
/// Key and nonce are not part of the config.
///
/// # Examples
///
/// ```
/// use ripsalsa::crypto::Salsa20Config;
///
/// let config = Salsa20Config::from_json(r#"{ "rounds": 12 }"#)?;
/// assert_eq!(config.rounds, 12);
/// assert_eq!(config.counter, 0);
/// # Ok::<(), ripsalsa::CryptoError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Salsa20Config {
    /// Initial block counter
    pub counter: u64,
    /// Number of rounds, positive and even
    pub rounds: u32,
}

impl Default for Salsa20Config {
    fn default() -> Self {
        Salsa20Config {
            counter: 0,
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl Salsa20Config {
    /// Parses a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the config to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Salsa20 {
    /// Creates a cipher using the counter and round count from `config`.
    ///
    /// # Errors
    ///
    /// Same as [`Salsa20::with_params`].
    pub fn from_config(key: &[u8], nonce: &[u8], config: &Salsa20Config) -> Result<Self> {
        Self::with_params(key, nonce, config.counter, config.rounds)
    }
}

/// Decrypts `data` with a 20-round Salsa20 keyed by `key` and an all-zero nonce.
pub fn decrypt_salsa20(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let nonce = [0u8; NONCE_LEN];
    let mut salsa20_encryptor = Salsa20::new(key, &nonce)?;
    let mut decrypted_data = vec![0; data.len()];
    salsa20_encryptor.decrypt(data, &mut decrypted_data)?;
    Ok(decrypted_data)
}

/// Encrypts `data` with a 20-round Salsa20 keyed by `key` and an all-zero nonce.
pub fn encrypt_salsa20(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let nonce = [0u8; NONCE_LEN];
    let mut salsa20_encryptor = Salsa20::new(key, &nonce)?;
    let mut encrypted_data = vec![0; data.len()];
    salsa20_encryptor.encrypt(data, &mut encrypted_data)?;
    Ok(encrypted_data)
}
