//! The 32-byte node value and its canonical textual form.
//!
//! Every leaf, internal node and proof element is a [`Node`]. Arbitrary byte
//! input only becomes a `Node` through a fallible conversion that checks the
//! length, so the rest of the crate never has to re-check it.
//!
//! The canonical text encoding is lowercase hex with a `0x` prefix.

use std::{fmt, str::FromStr};

use bincode::{Decode, Encode};

use crate::{MerkleError, Result};

/// Size in bytes of every node.
pub const NODE_SIZE: usize = 32;

/// A 32-byte tree node, ordered byte-lexicographically.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Encode, Decode)]
pub struct Node([u8; NODE_SIZE]);

impl Node {
    /// Wrap an array that is already exactly 32 bytes.
    pub const fn new(bytes: [u8; NODE_SIZE]) -> Self {
        Node(bytes)
    }

    /// Check the length of `bytes` and copy them into a node.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; NODE_SIZE] = bytes.try_into().map_err(|_| {
            MerkleError::Validation(format!(
                "merkle tree nodes must be {} bytes, got {}",
                NODE_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Node(array))
    }

    /// Parse the canonical hex form. The `0x` prefix is optional.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != NODE_SIZE * 2 {
            return Err(MerkleError::Validation(format!(
                "expected {} hex digits for a node, got {}",
                NODE_SIZE * 2,
                digits.len()
            )));
        }
        let mut bytes = [0u8; NODE_SIZE];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| MerkleError::Validation(format!("invalid node hex {:?}: {}", s, e)))?;
        Ok(Node(bytes))
    }

    /// Canonical `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; NODE_SIZE] {
        &self.0
    }

    /// Consume the node, returning the raw bytes.
    pub fn to_bytes(self) -> [u8; NODE_SIZE] {
        self.0
    }
}

impl From<[u8; NODE_SIZE]> for Node {
    fn from(bytes: [u8; NODE_SIZE]) -> Self {
        Node(bytes)
    }
}

impl From<Node> for [u8; NODE_SIZE] {
    fn from(node: Node) -> Self {
        node.0
    }
}

impl TryFrom<&[u8]> for Node {
    type Error = MerkleError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Node::from_slice(bytes)
    }
}

impl TryFrom<Vec<u8>> for Node {
    type Error = MerkleError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Node::from_slice(&bytes)
    }
}

impl AsRef<[u8]> for Node {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Node {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        Node::from_hex(s)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node(0x{})", hex::encode(self.0))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Node {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Node {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> core::result::Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        Node::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
