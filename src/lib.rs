//! # ripsalsa - RIPEMD-128 and Salsa20
//!
//! This crate provides two standalone cryptographic primitives, reproduced
//! bit-exactly from their published definitions:
//!
//! ## Features
//!
//! - **RIPEMD-128**: 128-bit message digest, one-shot or incremental
//! - **Salsa20**: stream cipher with 16- or 32-byte keys, 8-byte nonce and a
//!   configurable even round count (Salsa20/20 by default)
//! - **Encryption helpers**: buffer-to-buffer [`crypto::Encryptor`] interface and
//!   zero-nonce one-shot helpers
//!
//! ## Quick Start
//!
//! ### Hashing
//!
//! ```
//! use ripsalsa::crypto::ripemd_digest;
//!
//! let digest = ripemd_digest(b"message digest");
//! assert_eq!(hex::encode(digest), "9e327b3d6e523062afc1132d7df9d1b8");
//! ```
//!
//! ### Encrypting with a derived key
//!
//! ```
//! use ripsalsa::crypto::{ripemd_digest, Salsa20};
//!
//! # fn main() -> ripsalsa::Result<()> {
//! let key = ripemd_digest(b"password");
//! let mut cipher = Salsa20::new(&key, &[0u8; 8])?;
//! let ciphertext = cipher.process(b"secret");
//!
//! cipher.seek(0);
//! assert_eq!(cipher.process(&ciphertext), b"secret");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Hashing never fails. Fallible operations return a [`Result<T>`] type, where
//! errors are represented by [`CryptoError`]. The crate uses the `snafu` library
//! for ergonomic error handling with context and backtraces.
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade; install any logger (for example
//! `env_logger`) to see them. Key material is never logged.

pub mod crypto;
pub mod error;

// Re-export commonly used types for convenience
pub use crypto::{Ripemd128, Salsa20};

// Re-export error types for convenience
pub use error::{CryptoError, Result, snafu};
