//! Consistency checks for flat node arrays of unknown origin.

use crate::{
    MerkleError, Node, Result,
    hash::hash_pair,
    index::{is_tree_node, left_child_index, right_child_index},
};

/// Check that `tree` is a well-formed sorted-pair Merkle tree.
///
/// Every element must be 32 bytes and every node with children must equal
/// the pair hash of both of them. A node with exactly one child, or an empty
/// array, is rejected.
pub fn validate_tree<B: AsRef<[u8]>>(tree: &[B]) -> Result<()> {
    if tree.is_empty() {
        return Err(MerkleError::Validation("tree has no nodes".into()));
    }

    let nodes = tree
        .iter()
        .map(|node| Node::from_slice(node.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    let len = nodes.len();

    for (i, node) in nodes.iter().enumerate() {
        let left = left_child_index(i);
        let right = right_child_index(i);
        match (is_tree_node(len, left), is_tree_node(len, right)) {
            (true, true) => {
                let expected = hash_pair(&nodes[left], &nodes[right]);
                if *node != expected {
                    return Err(MerkleError::Validation(format!(
                        "node {} does not match the hash of its children",
                        i
                    )));
                }
            }
            (true, false) => {
                return Err(MerkleError::Validation(format!(
                    "node {} has a left child but no right child",
                    i
                )));
            }
            // Children come in pairs, so the first leaf ends the internal
            // range.
            _ => break,
        }
    }

    Ok(())
}

/// Boolean form of [`validate_tree`].
pub fn is_valid_tree<B: AsRef<[u8]>>(tree: &[B]) -> bool {
    validate_tree(tree).is_ok()
}
