//! Sorted-pair Merkle tree with single-leaf and multi-leaf proofs.
//!
//! The tree is stored as a flat array of `2N - 1` [`Node`]s in level order:
//! root at 0, children of `i` at `2i+1` and `2i+2`, leaves in the trailing
//! `N` slots. Parents are computed as
//!
//! `keccak256(min(left, right) || max(left, right))`
//!
//! so the hash of a pair does not depend on which side each child sits, and
//! a proof is just the list of siblings on the way up.
//!
//! Leaves are sorted before building, which makes the root a function of the
//! leaf *set*. Turning application values into leaves is left to the
//! caller.

#![warn(missing_docs)]

mod error;
pub(crate) mod hash;
pub mod index;
pub(crate) mod multiproof;
mod node;
pub(crate) mod proof;
pub(crate) mod tree;
mod validate;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{MerkleError, Result};
pub use hash::{hash_pair, keccak256};
pub use multiproof::{
    MAX_ENCODED_PROOF_BYTES, MAX_PROOF_ELEMENTS, MultiProof, get_multi_proof, process_multi_proof,
};
pub use node::{NODE_SIZE, Node};
pub use proof::{get_proof, process_proof, process_proof_bytes, verify_proof};
pub use tree::{MerkleTree, make_merkle_tree, render_tree};
pub use validate::{is_valid_tree, validate_tree};
