//! Identifier-to-leaf hashing.
//!
//! An identifier is an unsigned integer of up to 256 bits. Its leaf is
//! `keccak256` of the big-endian value left-padded with zeros to 32 bytes,
//! which matches `keccak256(abi.encode(uint256 id))` on the EVM.

use sorted_merkle_tree::{NODE_SIZE, Node, keccak256};

use crate::AllowlistError;

/// Left-pad a big-endian integer to 32 bytes.
///
/// Leading zero bytes are not significant; more than 32 significant bytes
/// is an error.
pub fn pad_identifier(be_bytes: &[u8]) -> Result<[u8; NODE_SIZE], AllowlistError> {
    let first_significant = be_bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(be_bytes.len());
    let significant = &be_bytes[first_significant..];
    if significant.len() > NODE_SIZE {
        return Err(AllowlistError::IdentifierTooLarge {
            len: significant.len(),
        });
    }
    let mut padded = [0u8; NODE_SIZE];
    padded[NODE_SIZE - significant.len()..].copy_from_slice(significant);
    Ok(padded)
}

/// Leaf of a big-endian identifier.
pub fn hash_identifier(be_bytes: &[u8]) -> Result<Node, AllowlistError> {
    Ok(keccak256(&pad_identifier(be_bytes)?))
}

/// Leaf of a `u64` identifier.
pub fn hash_u64(id: u64) -> Node {
    hash_u128(id as u128)
}

/// Leaf of a `u128` identifier.
pub fn hash_u128(id: u128) -> Node {
    let mut padded = [0u8; NODE_SIZE];
    padded[NODE_SIZE - 16..].copy_from_slice(&id.to_be_bytes());
    keccak256(&padded)
}
