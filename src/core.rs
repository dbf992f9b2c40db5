// src/core.rs
//! Public operations — the beating heart of envelope-crypt

use std::sync::Arc;

use crate::consts::KEY_LEN;
use crate::crypto;
use crate::error::Result;
use crate::keys::MasterKey;
use crate::primitives::random_bytes;
use crate::selftest::SelfTest;

/// Handle to the cryptographic core.
///
/// Owns the self-test gate: the first operation on any clone of a
/// handle runs the known-answer and round-trip checks, after which the
/// result is cached for the handle's lifetime. Construct one at process
/// start and share it (it is `Clone` + `Send` + `Sync`); cloning shares
/// the cached verdict.
///
/// All operations are otherwise stateless and safe to call from any
/// number of threads.
#[derive(Clone)]
pub struct CryptoCore {
    selftest: Arc<SelfTest>,
}

impl CryptoCore {
    pub fn new() -> Self {
        Self {
            selftest: Arc::new(SelfTest::new()),
        }
    }

    /// Generate a fresh random 128-bit master key.
    pub fn create_random_key(&self) -> Result<MasterKey> {
        self.selftest.ensure_passed()?;
        MasterKey::from_slice(&random_bytes(KEY_LEN)?)
    }

    /// Encrypt `plaintext` under `key` → `MAC || IV || raw ciphertext`.
    ///
    /// A fresh IV is drawn per call; encrypting the same plaintext twice
    /// yields different ciphertexts.
    pub fn encrypt(&self, plaintext: &[u8], key: &MasterKey) -> Result<Vec<u8>> {
        self.selftest.ensure_passed()?;
        crypto::encrypt_to_vec(plaintext, key)
    }

    /// Authenticate and decrypt `ciphertext` under `key`.
    ///
    /// The MAC is verified before any decryption is attempted. Wrong
    /// key, tampering and malformed input are indistinguishable in the
    /// returned error.
    pub fn decrypt(&self, ciphertext: &[u8], key: &MasterKey) -> Result<Vec<u8>> {
        self.selftest.ensure_passed()?;
        crypto::decrypt_to_vec(ciphertext, key)
    }
}

impl Default for CryptoCore {
    fn default() -> Self {
        Self::new()
    }
}
