//! Allowlists of integer identifiers (up to 256 bits) backed by a sorted-pair Merkle tree.
//!
//! Each identifier becomes a leaf through [`hash_identifier`]; the tree root
//! is the published commitment, and members prove inclusion with a sibling
//! path or, for several members at once, a [`MultiProof`].
//!
//! Tree generation and proof lookups emit `tracing` events; install a
//! subscriber to see them.

mod allowlist;
mod error;
mod leaf;

#[cfg(feature = "serde")]
pub use allowlist::AllowlistDump;
pub use allowlist::{
    Allowlist, generate_merkle_proof, generate_merkle_proof_be, generate_merkle_tree,
    generate_merkle_tree_from_be,
};
pub use error::AllowlistError;
pub use leaf::{hash_identifier, hash_u64, hash_u128, pad_identifier};
pub use sorted_merkle_tree::{MultiProof, Node};
