//! Error types and result type for the crate.
//!
//! The hash engine never fails, so almost every variant here belongs to the
//! cipher side: construction of a [`Salsa20`](crate::crypto::Salsa20) is the
//! only fallible cipher operation. It uses the `snafu` library for ergonomic
//! error handling with automatic backtrace capture.
//!
//! # Examples
//!
//! ```
//! use ripsalsa::{CryptoError, Result};
//! use ripsalsa::crypto::Salsa20;
//!
//! fn open_cipher(key: &[u8]) -> Result<Salsa20> {
//!     Salsa20::new(key, &[0u8; 8])
//! }
//!
//! match open_cipher(b"too short") {
//!     Err(CryptoError::InvalidKeySize { len, .. }) => assert_eq!(len, 9),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! # Error Variants
//!
//! - [`CryptoError::InvalidKeySize`]: Salsa20 key is neither 16 nor 32 bytes
//! - [`CryptoError::InvalidNonceSize`]: Salsa20 nonce is not 8 bytes
//! - [`CryptoError::InvalidRounds`]: round count is zero or odd
//! - [`CryptoError::LengthMismatch`]: input and output buffers differ in length
//! - [`CryptoError::Io`]: I/O errors while hashing a reader
//! - [`CryptoError::ParserError`]: configuration parsing errors

use std::io;
use snafu::{Snafu, Backtrace};

// Re-export snafu for context providers
pub use snafu;

/// Main error type for the crate.
///
/// All errors include automatic backtrace capture for debugging purposes.
/// Use the helper methods on `CryptoError` for convenient error construction.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CryptoError {
    /// Salsa20 key length is not 16 or 32 bytes.
    #[snafu(display("Invalid key size: {len} bytes (expected 16 or 32)"))]
    InvalidKeySize {
        len: usize,
        backtrace: Backtrace,
    },

    /// Salsa20 nonce length is not 8 bytes.
    #[snafu(display("Invalid nonce size: {len} bytes (expected 8)"))]
    InvalidNonceSize {
        len: usize,
        backtrace: Backtrace,
    },

    /// Round count is zero or odd.
    #[snafu(display("Invalid rounds: {rounds} (must be positive and even)"))]
    InvalidRounds {
        rounds: u32,
        backtrace: Backtrace,
    },

    /// Input and output buffers of an encrypt/decrypt call differ in length.
    #[snafu(display("Input and output length mismatch: {input} != {output}"))]
    LengthMismatch {
        input: usize,
        output: usize,
        backtrace: Backtrace,
    },

    /// I/O error occurred while reading data to hash.
    #[snafu(display("IO error: {source}"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// Error parsing a JSON configuration.
    #[snafu(display("Parser error: {source}"))]
    ParserError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        backtrace: Backtrace,
    },
}

// For automatic conversions from standard error types
impl From<io::Error> for CryptoError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, backtrace: Backtrace::capture() }
    }
}

impl From<serde_json::Error> for CryptoError {
    fn from(source: serde_json::Error) -> Self {
        Self::ParserError {
            source: Box::new(source),
            backtrace: Backtrace::capture(),
        }
    }
}

/// Helper methods for creating errors without context providers.
impl CryptoError {
    /// Creates an `InvalidKeySize` error for a key of `len` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ripsalsa::CryptoError;
    ///
    /// let error = CryptoError::invalid_key_size(24);
    /// assert!(error.to_string().contains("24 bytes"));
    /// ```
    pub fn invalid_key_size(len: usize) -> Self {
        Self::InvalidKeySize {
            len,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidNonceSize` error for a nonce of `len` bytes.
    pub fn invalid_nonce_size(len: usize) -> Self {
        Self::InvalidNonceSize {
            len,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidRounds` error.
    pub fn invalid_rounds(rounds: u32) -> Self {
        Self::InvalidRounds {
            rounds,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `LengthMismatch` error with the two buffer lengths.
    pub fn length_mismatch(input: usize, output: usize) -> Self {
        Self::LengthMismatch {
            input,
            output,
            backtrace: Backtrace::capture(),
        }
    }

    /// Checks if this error was raised while constructing a cipher.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            CryptoError::InvalidKeySize { .. }
                | CryptoError::InvalidNonceSize { .. }
                | CryptoError::InvalidRounds { .. }
        )
    }
}

/// A specialized `Result` type for this crate.
///
/// This is a convenience type alias that uses [`CryptoError`] as the error type.
pub type Result<T> = std::result::Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let err: CryptoError = io::Error::new(io::ErrorKind::UnexpectedEof, "short read").into();
        assert!(matches!(err, CryptoError::Io { .. }));
        assert!(!err.is_construction_error());
        assert_eq!(err.to_string(), "IO error: short read");
    }

    #[test]
    fn test_construction_errors() {
        assert!(CryptoError::invalid_key_size(0).is_construction_error());
        assert!(CryptoError::invalid_nonce_size(12).is_construction_error());
        assert!(CryptoError::invalid_rounds(7).is_construction_error());
        assert!(!CryptoError::length_mismatch(1, 2).is_construction_error());
        assert_eq!(
            CryptoError::invalid_rounds(7).to_string(),
            "Invalid rounds: 7 (must be positive and even)"
        );
    }
}
