//! Compacted proofs for several leaves at once.
//!
//! A [`MultiProof`] carries the proven leaves, the sibling nodes a verifier
//! cannot derive on its own, and one flag per internal hash telling the
//! verifier where the second operand comes from:
//!
//! - `true`: the next value of the leaf/result queue
//! - `false`: the next extra proof node
//!
//! Shape invariant: `leaves + proof == flags + 1`.

use std::collections::{BTreeSet, VecDeque};

use bincode::{Decode, Encode};

use crate::{
    MerkleError, Node, Result,
    hash::hash_pair,
    index::{check_leaf_node, parent_index, sibling_index},
};


/// Upper bound on leaves, proof nodes and flags accepted by a verifier.
pub const MAX_PROOF_ELEMENTS: usize = 1 << 20;

/// Byte limit applied when decoding an encoded multiproof.
pub const MAX_ENCODED_PROOF_BYTES: usize = 64 * 1024 * 1024;

/// A proof that several leaves belong to one tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MultiProof {
    leaves: Vec<Node>,
    proof: Vec<Node>,
    proof_flags: Vec<bool>,
}

impl MultiProof {
    /// Assemble a multiproof from already validated parts.
    ///
    /// The shape is not checked here; [`process`](Self::process) does that.
    pub fn new(leaves: Vec<Node>, proof: Vec<Node>, proof_flags: Vec<bool>) -> Self {
        Self {
            leaves,
            proof,
            proof_flags,
        }
    }

    /// Assemble a multiproof from raw bytes, e.g. as received over the
    /// network. Every leaf and proof element must be 32 bytes.
    pub fn from_raw_parts<B: AsRef<[u8]>>(
        leaves: &[B],
        proof: &[B],
        proof_flags: Vec<bool>,
    ) -> Result<Self> {
        let to_nodes = |items: &[B]| {
            items
                .iter()
                .map(|item| Node::from_slice(item.as_ref()))
                .collect::<Result<Vec<_>>>()
        };
        Ok(Self {
            leaves: to_nodes(leaves)?,
            proof: to_nodes(proof)?,
            proof_flags,
        })
    }

    /// The proven leaves, in descending index order.
    pub fn leaves(&self) -> &[Node] {
        &self.leaves
    }

    /// Sibling nodes not derivable from the leaves.
    pub fn proof(&self) -> &[Node] {
        &self.proof
    }

    /// One flag per internal hash of the replay.
    pub fn proof_flags(&self) -> &[bool] {
        &self.proof_flags
    }

    /// Split into `(leaves, proof, proof_flags)`.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Node>, Vec<bool>) {
        (self.leaves, self.proof, self.proof_flags)
    }

    /// Generate a multiproof for the leaves at `indices` of `tree`.
    ///
    /// Every index must name a leaf and appear once. The indices are sorted
    /// descending, so the returned leaves follow that order rather than the
    /// caller's.
    ///
    /// Requesting no leaves yields a proof consisting of the root alone.
    pub fn generate(tree: &[Node], indices: &[usize]) -> Result<Self> {
        for &index in indices {
            check_leaf_node(tree.len(), index)?;
        }

        let mut seen = BTreeSet::new();
        for &index in indices {
            if !seen.insert(index) {
                return Err(MerkleError::Validation(format!(
                    "cannot prove duplicated index {}",
                    index
                )));
            }
        }
        // BTreeSet iterates ascending
        let sorted: Vec<usize> = seen.into_iter().rev().collect();

        let mut queue: VecDeque<usize> = sorted.iter().copied().collect();
        let mut proof = Vec::new();
        let mut proof_flags = Vec::new();

        while let Some(&j) = queue.front() {
            if j == 0 {
                break;
            }
            queue.pop_front();
            let s = sibling_index(j)?;
            let p = parent_index(j)?;

            if queue.front() == Some(&s) {
                proof_flags.push(true);
                queue.pop_front();
            } else {
                proof_flags.push(false);
                proof.push(tree[s]);
            }
            queue.push_back(p);
        }

        if sorted.is_empty() {
            let root = tree.first().ok_or_else(|| {
                MerkleError::Validation("cannot prove against an empty tree".into())
            })?;
            proof.push(*root);
        }

        Ok(Self {
            leaves: sorted.iter().map(|&i| tree[i]).collect(),
            proof,
            proof_flags,
        })
    }

    /// Replay the flags and return the candidate root.
    ///
    /// Fails with [`MerkleError::ProofShape`] when the counts do not fit
    /// together; the caller compares a successful result with a trusted root.
    pub fn process(&self) -> Result<Node> {
        self.check_shape()?;

        let mut queue: VecDeque<Node> = self.leaves.iter().copied().collect();
        let mut proof = self.proof.iter();

        for &flag in &self.proof_flags {
            let a = queue.pop_front().ok_or_else(|| {
                MerkleError::ProofShape("ran out of leaves and intermediate hashes".into())
            })?;
            let b = if flag {
                queue.pop_front().ok_or_else(|| {
                    MerkleError::ProofShape("ran out of leaves and intermediate hashes".into())
                })?
            } else {
                *proof
                    .next()
                    .ok_or_else(|| MerkleError::ProofShape("ran out of proof nodes".into()))?
            };
            queue.push_back(hash_pair(&a, &b));
        }

        match (queue.pop_front(), proof.next()) {
            (Some(root), None) if queue.is_empty() => Ok(root),
            (None, Some(root)) if self.proof_flags.is_empty() => Ok(*root),
            _ => Err(MerkleError::ProofShape(
                "replay did not converge on a single root".into(),
            )),
        }
    }

    /// Whether this proof reproduces `root`.
    pub fn verify(&self, root: &Node) -> Result<bool> {
        Ok(self.process()? == *root)
    }

    fn check_shape(&self) -> Result<()> {
        if self.leaves.len() > MAX_PROOF_ELEMENTS
            || self.proof.len() > MAX_PROOF_ELEMENTS
            || self.proof_flags.len() > MAX_PROOF_ELEMENTS
        {
            return Err(MerkleError::ProofShape(format!(
                "multiproof has too many elements (max {} per field)",
                MAX_PROOF_ELEMENTS
            )));
        }

        let false_flags = self.proof_flags.iter().filter(|flag| !**flag).count();
        if self.proof.len() < false_flags {
            return Err(MerkleError::ProofShape(format!(
                "{} proof nodes cannot satisfy {} false flags",
                self.proof.len(),
                false_flags
            )));
        }

        if self.leaves.len() + self.proof.len() != self.proof_flags.len() + 1 {
            return Err(MerkleError::ProofShape(format!(
                "{} leaves and {} proof nodes do not match {} flags",
                self.leaves.len(),
                self.proof.len(),
                self.proof_flags.len()
            )));
        }

        Ok(())
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleError::Encoding(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// The shape of the decoded proof is only checked when it is processed.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ MAX_ENCODED_PROOF_BYTES }>();
        let (proof, _): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleError::Encoding(format!("decode error: {}", e)))?;
        Ok(proof)
    }
}

/// Free-function form of [`MultiProof::generate`].
pub fn get_multi_proof(tree: &[Node], indices: &[usize]) -> Result<MultiProof> {
    MultiProof::generate(tree, indices)
}

/// Free-function form of [`MultiProof::process`].
pub fn process_multi_proof(multiproof: &MultiProof) -> Result<Node> {
    multiproof.process()
}
