// src/consts.rs
//! Shared constants — fixed scheme parameters
//!
//! None of these are configurable per call. Changing any of them changes
//! the wire format and invalidates the self-test vectors, so they are
//! compile-time constants rather than config entries.

/// Master key length in bytes (AES-128)
pub const KEY_LEN: usize = 16;

/// IV length in bytes — one AES block, as required by CBC mode
pub const IV_LEN: usize = 16;

/// AES block length in bytes
pub const BLOCK_LEN: usize = 16;

/// MAC length in bytes (HMAC-SHA-256 output)
pub const MAC_LEN: usize = 32;

/// Derived encryption sub-key length in bytes (AES-128 key)
pub const ENC_SUBKEY_LEN: usize = 16;

/// Derived authentication sub-key length in bytes
// SHA-256 block-friendly key size; also the digest length
pub const AUTH_SUBKEY_LEN: usize = 32;

/// HKDF output cap: at most 255 blocks of the hash length (RFC 5869)
pub const HKDF_MAX_BLOCKS: usize = 255;

/// HKDF info label for the encryption sub-key
pub const ENCRYPTION_LABEL: &[u8] = b"envelope-crypt|key-for-encryption";

/// HKDF info label for the authentication sub-key
///
/// Distinct from [`ENCRYPTION_LABEL`] so both sub-keys derived from the
/// same master key are cryptographically independent.
pub const AUTHENTICATION_LABEL: &[u8] = b"envelope-crypt|key-for-authentication";
