// src/crypto/mod.rs
//! Encrypt-then-MAC orchestration
//!
//! Envelope wire format, byte-compatible across versions:
//!
//! ```text
//! MAC (32 bytes) || IV (16 bytes) || raw AES-128-CBC output
//! ```
//!
//! The MAC covers `IV || raw ciphertext`. These functions are ungated;
//! [`crate::core::CryptoCore`] runs the self-test before reaching them.

mod decrypt;
mod encrypt;

pub(crate) use decrypt::decrypt_to_vec;
pub(crate) use encrypt::encrypt_to_vec;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BLOCK_LEN, IV_LEN, MAC_LEN};
    use crate::keys::MasterKey;

    #[test]
    fn test_envelope_layout_lengths() {
        let key = MasterKey::from_bytes([1u8; 16]);
        // PKCS#7 pads to the next whole block, so 5 bytes → 1 block
        let ct = encrypt_to_vec(b"hello", &key).unwrap();
        assert_eq!(ct.len(), MAC_LEN + IV_LEN + BLOCK_LEN);

        // Exactly one block of plaintext gains a full padding block
        let ct = encrypt_to_vec(&[0u8; BLOCK_LEN], &key).unwrap();
        assert_eq!(ct.len(), MAC_LEN + IV_LEN + 2 * BLOCK_LEN);
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let key = MasterKey::from_bytes([1u8; 16]);
        let a = encrypt_to_vec(b"same plaintext", &key).unwrap();
        let b = encrypt_to_vec(b"same plaintext", &key).unwrap();
        assert_ne!(a, b);
        assert_ne!(&a[MAC_LEN..MAC_LEN + IV_LEN], &b[MAC_LEN..MAC_LEN + IV_LEN]);
    }

    #[test]
    fn test_internal_roundtrip() {
        let key = MasterKey::from_bytes([9u8; 16]);
        let ct = encrypt_to_vec(b"payload", &key).unwrap();
        assert_eq!(decrypt_to_vec(&ct, &key).unwrap(), b"payload");
    }
}
