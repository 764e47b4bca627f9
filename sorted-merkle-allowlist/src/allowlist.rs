use std::fmt::Display;

use sorted_merkle_tree::{MerkleTree, MultiProof, Node, verify_proof};
use tracing::{debug, trace, warn};

use crate::{AllowlistError, hash_identifier, hash_u128, pad_identifier};

/// Build the tree committing to `ids`.
pub fn generate_merkle_tree(ids: &[u128]) -> Result<MerkleTree, AllowlistError> {
    tree_from_leaves(ids.iter().map(|id| hash_u128(*id)).collect())
}

/// Build the tree committing to big-endian identifiers of up to 256 bits.
pub fn generate_merkle_tree_from_be<B: AsRef<[u8]>>(
    ids: &[B],
) -> Result<MerkleTree, AllowlistError> {
    let leaves = ids
        .iter()
        .map(|id| hash_identifier(id.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    tree_from_leaves(leaves)
}

fn tree_from_leaves(leaves: Vec<Node>) -> Result<MerkleTree, AllowlistError> {
    if leaves.is_empty() {
        return Err(AllowlistError::EmptyIdentifiers);
    }
    let tree = MerkleTree::new(leaves)?;
    debug!(
        leaves = tree.leaf_count(),
        root = %tree.root(),
        "generated allowlist merkle tree"
    );
    Ok(tree)
}

/// Sibling-path proof for `id` in `tree`.
pub fn generate_merkle_proof(tree: &MerkleTree, id: u128) -> Result<Vec<Node>, AllowlistError> {
    proof_for_leaf(tree, hash_u128(id), &id)
}

/// Sibling-path proof for the big-endian identifier `id` in `tree`.
pub fn generate_merkle_proof_be(
    tree: &MerkleTree,
    id: &[u8],
) -> Result<Vec<Node>, AllowlistError> {
    proof_for_leaf(tree, hash_identifier(id)?, &be_label(id)?)
}

fn proof_for_leaf(
    tree: &MerkleTree,
    leaf: Node,
    id: &dyn Display,
) -> Result<Vec<Node>, AllowlistError> {
    let Some(index) = tree.leaf_index(&leaf) else {
        warn!(id = %id, "identifier is not in the allowlist");
        return Err(AllowlistError::UnknownIdentifier(id.to_string()));
    };
    trace!(id = %id, index, "generating allowlist proof");
    Ok(tree.proof(index)?)
}

/// `0x` hex of the identifier padded to 32 bytes.
fn be_label(id: &[u8]) -> Result<String, AllowlistError> {
    Ok(Node::new(pad_identifier(id)?).to_hex())
}

/// A set of integer identifiers committed to by one Merkle root.
#[derive(Debug, Clone)]
pub struct Allowlist {
    tree: MerkleTree,
}

impl Allowlist {
    /// Commit to `ids`.
    pub fn new(ids: &[u128]) -> Result<Self, AllowlistError> {
        Ok(Self {
            tree: generate_merkle_tree(ids)?,
        })
    }

    /// Commit to big-endian identifiers of up to 256 bits.
    pub fn from_be_ids<B: AsRef<[u8]>>(ids: &[B]) -> Result<Self, AllowlistError> {
        Ok(Self {
            tree: generate_merkle_tree_from_be(ids)?,
        })
    }

    /// The public commitment.
    pub fn root(&self) -> Node {
        self.tree.root()
    }

    /// The underlying tree.
    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    /// Whether `id` is committed to.
    pub fn contains(&self, id: u128) -> bool {
        self.tree.leaf_index(&hash_u128(id)).is_some()
    }

    /// Whether the big-endian identifier `id` is committed to.
    ///
    /// An identifier wider than 256 bits is never a member.
    pub fn contains_be(&self, id: &[u8]) -> bool {
        hash_identifier(id).is_ok_and(|leaf| self.tree.leaf_index(&leaf).is_some())
    }

    /// Proof that `id` is in the allowlist.
    pub fn proof(&self, id: u128) -> Result<Vec<Node>, AllowlistError> {
        generate_merkle_proof(&self.tree, id)
    }

    /// Proof that the big-endian identifier `id` is in the allowlist.
    pub fn proof_be(&self, id: &[u8]) -> Result<Vec<Node>, AllowlistError> {
        generate_merkle_proof_be(&self.tree, id)
    }

    /// One compacted proof for several identifiers.
    ///
    /// The proof's leaves come back in tree order, not in the order of `ids`.
    pub fn multi_proof(&self, ids: &[u128]) -> Result<MultiProof, AllowlistError> {
        let leaves = ids
            .iter()
            .map(|id| self.member_leaf(hash_u128(*id), id))
            .collect::<Result<Vec<_>, _>>()?;
        self.multi_proof_for(&leaves)
    }

    /// [`Allowlist::multi_proof`] for big-endian identifiers.
    pub fn multi_proof_be<B: AsRef<[u8]>>(
        &self,
        ids: &[B],
    ) -> Result<MultiProof, AllowlistError> {
        let leaves = ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                self.member_leaf(hash_identifier(id)?, &be_label(id)?)
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.multi_proof_for(&leaves)
    }

    fn member_leaf(&self, leaf: Node, id: &dyn Display) -> Result<Node, AllowlistError> {
        if self.tree.leaf_index(&leaf).is_none() {
            warn!(id = %id, "identifier is not in the allowlist");
            return Err(AllowlistError::UnknownIdentifier(id.to_string()));
        }
        Ok(leaf)
    }

    fn multi_proof_for(&self, leaves: &[Node]) -> Result<MultiProof, AllowlistError> {
        trace!(count = leaves.len(), "generating allowlist multiproof");
        Ok(self.tree.multi_proof_for_leaves(leaves)?)
    }

    /// Whether `proof` shows `id` is a member under `root`.
    ///
    /// Needs no tree, only the published root.
    pub fn verify(root: &Node, id: u128, proof: &[Node]) -> bool {
        verify_proof(root, &hash_u128(id), proof)
    }

    /// [`Allowlist::verify`] for a big-endian identifier. An identifier wider
    /// than 256 bits never verifies.
    pub fn verify_be(root: &Node, id: &[u8], proof: &[Node]) -> bool {
        hash_identifier(id).is_ok_and(|leaf| verify_proof(root, &leaf, proof))
    }

    /// Whether `proof` shows every id in `ids` is a member under `root`.
    ///
    /// A malformed proof is reported as an error, a well-formed one for other
    /// identifiers or another root as `Ok(false)`.
    pub fn verify_multi(
        root: &Node,
        ids: &[u128],
        proof: &MultiProof,
    ) -> Result<bool, AllowlistError> {
        let expected = ids.iter().map(|id| hash_u128(*id)).collect();
        verify_multi_leaves(root, expected, proof)
    }

    /// [`Allowlist::verify_multi`] for big-endian identifiers.
    pub fn verify_multi_be<B: AsRef<[u8]>>(
        root: &Node,
        ids: &[B],
        proof: &MultiProof,
    ) -> Result<bool, AllowlistError> {
        let expected = ids
            .iter()
            .map(|id| hash_identifier(id.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        verify_multi_leaves(root, expected, proof)
    }

    /// A serializable snapshot of the root and the flat tree.
    #[cfg(feature = "serde")]
    pub fn dump(&self) -> AllowlistDump {
        AllowlistDump {
            root: self.root(),
            tree: self.tree.nodes().to_vec(),
        }
    }

    /// Rebuild from a snapshot, rejecting it if the tree is inconsistent or
    /// the root does not match.
    #[cfg(feature = "serde")]
    pub fn from_dump(dump: AllowlistDump) -> Result<Self, AllowlistError> {
        let tree = MerkleTree::from_nodes(dump.tree)?;
        if tree.root() != dump.root {
            return Err(sorted_merkle_tree::MerkleError::Validation(format!(
                "dump root {} does not match tree root {}",
                dump.root,
                tree.root()
            ))
            .into());
        }
        Ok(Self { tree })
    }
}

fn verify_multi_leaves(
    root: &Node,
    mut expected: Vec<Node>,
    proof: &MultiProof,
) -> Result<bool, AllowlistError> {
    let mut proven = proof.leaves().to_vec();
    expected.sort_unstable();
    proven.sort_unstable();
    if expected != proven {
        return Ok(false);
    }
    Ok(proof.verify(root)?)
}

/// JSON-ready form of an [`Allowlist`]; nodes are `0x`-prefixed hex.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllowlistDump {
    /// The public commitment.
    pub root: Node,
    /// The flat tree, root first.
    pub tree: Vec<Node>,
}
