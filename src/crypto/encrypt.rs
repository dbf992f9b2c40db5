// src/crypto/encrypt.rs
use crate::consts::{
    AUTHENTICATION_LABEL, AUTH_SUBKEY_LEN, ENCRYPTION_LABEL, ENC_SUBKEY_LEN, IV_LEN, MAC_LEN,
};
use crate::error::Result;
use crate::kdf::derive_subkey;
use crate::keys::MasterKey;
use crate::primitives::{cipher_encrypt, hmac_sha256, random_bytes};

/// Encrypt plaintext → `MAC || IV || raw ciphertext` (in-memory)
///
/// Both sub-keys are derived fresh for this call and zeroized on drop.
pub(crate) fn encrypt_to_vec(plaintext: &[u8], key: &MasterKey) -> Result<Vec<u8>> {
    let enc_key = derive_subkey(key, ENCRYPTION_LABEL, ENC_SUBKEY_LEN)?;
    let iv = random_bytes(IV_LEN)?;
    let raw = cipher_encrypt(plaintext, enc_key.as_bytes(), &iv)?;

    let mut body = Vec::with_capacity(IV_LEN + raw.len());
    body.extend_from_slice(&iv);
    body.extend_from_slice(&raw);

    let auth_key = derive_subkey(key, AUTHENTICATION_LABEL, AUTH_SUBKEY_LEN)?;
    let mac = hmac_sha256(&body, auth_key.as_bytes())?;

    let mut envelope = Vec::with_capacity(MAC_LEN + body.len());
    envelope.extend_from_slice(&mac);
    envelope.extend_from_slice(&body);
    Ok(envelope)
}
