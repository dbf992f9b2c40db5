// src/compare.rs
//! Constant-time MAC comparison
//!
//! A naive `==` on byte slices can short-circuit at the first differing
//! byte and leak, through timing, how much of a forged MAC was correct.
//! `subtle` examines every byte regardless of content.

use subtle::ConstantTimeEq;

/// Fixed-time equality of two MAC values.
///
/// The length check returns early, which is safe only because both
/// lengths are constants of the scheme ([`crate::consts::MAC_LEN`]),
/// never attacker-influenced.
pub(crate) fn verify_mac(expected: &[u8], computed: &[u8]) -> bool {
    if expected.len() != computed.len() {
        return false;
    }
    expected.ct_eq(computed).into()
}
