//! Solana address codec.
//!
//! An address is the Base58 encoding of a raw 32-byte public key. Program
//! derived addresses use the same encoding even though they are not curve
//! points.

use crate::error::SolError;

/// Decode a Solana address string to its 32-byte representation.
///
/// Surrounding whitespace is not trimmed: a registry entry with stray
/// whitespace is malformed data and must be rejected, not repaired.
pub fn address_to_bytes(address: &str) -> Result<[u8; 32], SolError> {
    if address.is_empty() {
        return Err(SolError::InvalidAddress("address is empty".into()));
    }

    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| SolError::InvalidAddress(format!("base58 decode failed: {e}")))?;

    let arr: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
        SolError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
    })?;

    Ok(arr)
}

/// Encode 32 bytes as a Solana address (Base58 string).
pub fn bytes_to_address(bytes: &[u8; 32]) -> String {
    bs58::encode(bytes).into_string()
}

/// Check that `address` decodes to exactly 32 bytes.
pub fn validate_address(address: &str) -> Result<(), SolError> {
    address_to_bytes(address).map(|_| ())
}
