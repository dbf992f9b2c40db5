// src/kdf.rs
//! HKDF (RFC 5869) — key separation for the two sub-keys
//!
//! Extract-then-Expand over a pluggable HMAC instance. Production code
//! only ever uses HMAC-SHA-256; the generic parameter exists so the
//! self-test harness can run the RFC's SHA-1 vectors through the same
//! code path it is validating.

use hmac::digest::{KeyInit, OutputSizeUser};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::consts::HKDF_MAX_BLOCKS;
use crate::error::{CoreError, Result};
use crate::keys::{MasterKey, SubKey};

/// HKDF-Extract then HKDF-Expand.
///
/// `salt` defaults to a hash-length all-zero string when absent, per
/// RFC 5869 §2.2. Output length is capped at 255 × hash length; asking
/// for more is a programmer error and fails before producing anything.
pub(crate) fn hkdf<M>(ikm: &[u8], salt: Option<&[u8]>, info: &[u8], length: usize) -> Result<Vec<u8>>
where
    M: Mac + KeyInit,
{
    let hash_len = <M as OutputSizeUser>::output_size();
    if length > HKDF_MAX_BLOCKS * hash_len {
        return Err(CoreError::CannotPerform("HKDF output length out of range"));
    }

    // Extract: PRK = HMAC(salt, IKM)
    let zero_salt = vec![0u8; hash_len];
    let salt = salt.unwrap_or(&zero_salt);
    let mut extract = <M as Mac>::new_from_slice(salt)
        .map_err(|_| CoreError::CannotPerform("bad HKDF salt"))?;
    extract.update(ikm);
    let mut prk = extract.finalize().into_bytes().to_vec();

    // Expand: T(i) = HMAC(PRK, T(i-1) || info || byte(i))
    let mut okm = Vec::with_capacity(length);
    let mut block: Vec<u8> = Vec::new();
    let mut counter: u8 = 1;
    while okm.len() < length {
        let mut expand = <M as Mac>::new_from_slice(&prk)
            .map_err(|_| CoreError::CannotPerform("bad HKDF pseudorandom key"))?;
        expand.update(&block);
        expand.update(info);
        expand.update(&[counter]);
        block.zeroize();
        block = expand.finalize().into_bytes().to_vec();
        okm.extend_from_slice(&block);
        counter = counter.wrapping_add(1);
    }
    prk.zeroize();
    block.zeroize();

    okm.truncate(length);
    Ok(okm)
}

/// Derive one sub-key from the master key under a fixed info label.
///
/// Called twice per encrypt/decrypt — once with each of the two labels
/// in [`crate::consts`] — so the encryption and authentication sub-keys
/// are independent even though both come from the same master key.
pub(crate) fn derive_subkey(master: &MasterKey, label: &[u8], length: usize) -> Result<SubKey> {
    let okm = hkdf::<Hmac<Sha256>>(master.as_bytes(), None, label, length)?;
    Ok(SubKey::new(okm))
}
