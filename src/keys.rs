// src/keys.rs
//! Key types — master key and derived sub-keys
//!
//! All key material lives in byte-sequence newtypes that zeroize on drop
//! and print redacted. Lengths are enforced at construction, never at the
//! call sites that consume a key.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::KEY_LEN;
use crate::error::{CoreError, Result};

/// 128-bit master key — caller-owned, reused across many calls.
///
/// Opaque: never logged, never echoed in error paths. Zeroizes on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    /// Wrap an existing uniformly random key.
    ///
    /// The bytes must come from a cryptographically secure source
    /// (see [`crate::CryptoCore::create_random_key`]) — this is not a
    /// password slot.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Wrap a key held in a slice, enforcing the fixed key length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CoreError::CannotPerform("wrong master key length"))?;
        Ok(Self(bytes))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(..)")
    }
}

/// Derived sub-key — scoped to a single encrypt or decrypt call.
///
/// Never persisted, never exposed outside the crate. Zeroizes on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct SubKey(Vec<u8>);

impl SubKey {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
