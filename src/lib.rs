// src/lib.rs
//! envelope-crypt — symmetric authenticated encryption
//!
//! Features:
//! - AES-128-CBC + HMAC-SHA-256, encrypt-then-MAC
//! - HKDF (RFC 5869) key separation between the two sub-keys
//! - Constant-time MAC verification
//! - Known-answer + round-trip self-test gate, run once per handle
//!
//! Keys must be uniformly random ([`CryptoCore::create_random_key`]),
//! never passwords. The library holds no state beyond the self-test
//! verdict and performs no I/O.
//!
//! ```no_run
//! use envelope_crypt::CryptoCore;
//!
//! # fn main() -> Result<(), envelope_crypt::CoreError> {
//! let core = CryptoCore::new();
//! let key = core.create_random_key()?;
//! let ciphertext = core.encrypt(b"attack at dawn", &key)?;
//! let plaintext = core.decrypt(&ciphertext, &key)?;
//! # assert_eq!(plaintext, b"attack at dawn");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod consts;
pub mod core;
pub mod error;
pub mod keys;

mod compare;
mod crypto;
mod kdf;
mod primitives;
mod selftest;

// Re-export everything users need at the crate root
pub use crate::core::CryptoCore;
pub use crate::error::{CoreError, Result};
pub use crate::keys::MasterKey;
