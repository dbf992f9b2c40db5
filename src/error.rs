// src/error.rs
//! Public error type for the entire crate
//!
//! Exactly three kinds, on purpose. Decrypt-side failures collapse to
//! [`CoreError::InvalidCiphertext`] so a caller can never tell (and never
//! leak to an attacker) whether the key was wrong, the ciphertext was
//! tampered with, or the input was malformed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Wrong key, corrupted/tampered ciphertext, or malformed input.
    /// Deliberately indistinguishable — treat the input as hostile.
    #[error("invalid ciphertext")]
    InvalidCiphertext,

    /// Environment or programmer-error condition: missing primitive,
    /// failed randomness, wrong key length, HKDF length out of range.
    /// Not retryable — a retry cannot restore a missing capability.
    // &'static str only: no runtime data can be formatted into the
    // message, so key material cannot end up in an error path.
    #[error("cannot perform operation: {0}")]
    CannotPerform(&'static str),

    /// The platform's cryptographic primitives failed the known-answer
    /// or round-trip checks. Fatal for the whole process; sticky.
    #[error("cryptographic self-test failed")]
    SelfTestFailed,
}

pub type Result<T> = std::result::Result<T, CoreError>;
