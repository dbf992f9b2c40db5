// src/crypto/decrypt.rs
use crate::compare::verify_mac;
use crate::consts::{
    AUTHENTICATION_LABEL, AUTH_SUBKEY_LEN, ENCRYPTION_LABEL, ENC_SUBKEY_LEN, IV_LEN, MAC_LEN,
};
use crate::error::{CoreError, Result};
use crate::kdf::derive_subkey;
use crate::keys::MasterKey;
use crate::primitives::{cipher_decrypt, hmac_sha256};

/// Decrypt `MAC || IV || raw ciphertext` → plaintext (in-memory)
///
/// Wrong key, tampering and malformed input all surface as the same
/// [`CoreError::InvalidCiphertext`].
pub(crate) fn decrypt_to_vec(ciphertext: &[u8], key: &MasterKey) -> Result<Vec<u8>> {
    // Too short to even contain a MAC — rejected before any key derivation
    if ciphertext.len() <= MAC_LEN {
        return Err(CoreError::InvalidCiphertext);
    }
    let (mac, body) = ciphertext.split_at(MAC_LEN);

    // Verify before any decryption attempt. The cipher never runs on
    // unauthenticated input.
    let auth_key = derive_subkey(key, AUTHENTICATION_LABEL, AUTH_SUBKEY_LEN)?;
    let computed = hmac_sha256(body, auth_key.as_bytes())?;
    if !verify_mac(mac, &computed) {
        return Err(CoreError::InvalidCiphertext);
    }

    if body.len() <= IV_LEN {
        return Err(CoreError::InvalidCiphertext);
    }
    let (iv, raw) = body.split_at(IV_LEN);
    let enc_key = derive_subkey(key, ENCRYPTION_LABEL, ENC_SUBKEY_LEN)?;
    cipher_decrypt(raw, enc_key.as_bytes(), iv)
}
