// Cryptographic primitives
//
// This module provides the RIPEMD-128 digest and the Salsa20 stream cipher,
// plus buffer-oriented encryption helpers built on the cipher.

pub mod digest;
pub mod encryption;
pub mod salsa20;

pub use digest::{ripemd_digest, ripemd_digest_reader, Ripemd128};
pub use encryption::{Encryptor, Salsa20Config, decrypt_salsa20, encrypt_salsa20};
pub use salsa20::{KeySchedule, Salsa20};
