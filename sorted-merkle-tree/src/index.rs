//! Index arithmetic over a flattened complete binary tree.
//!
//! Nodes are laid out level-order: root=0, left child=2i+1, right
//! child=2i+2. For a tree of `len` nodes the leaves occupy the trailing
//! positions; everything before them is internal.
//!
//! ```text
//!          0
//!        /   \
//!       1     2
//!      / \
//!     3   4
//! ```

use crate::{MerkleError, Result};

/// Left child of `i`.
pub fn left_child_index(i: usize) -> usize {
    2 * i + 1
}

/// Right child of `i`.
pub fn right_child_index(i: usize) -> usize {
    2 * i + 2
}

/// Parent of `i`. The root has none.
pub fn parent_index(i: usize) -> Result<usize> {
    if i == 0 {
        return Err(MerkleError::Index("root has no parent".into()));
    }
    Ok((i - 1) / 2)
}

/// Sibling of `i`: odd positions are left children, even ones right
/// children. The root has none.
pub fn sibling_index(i: usize) -> Result<usize> {
    if i == 0 {
        return Err(MerkleError::Index("root has no sibling".into()));
    }
    Ok(if i % 2 == 1 { i + 1 } else { i - 1 })
}

/// Whether `i` is a position of a tree with `len` nodes.
pub fn is_tree_node(len: usize, i: usize) -> bool {
    i < len
}

/// Whether `i` has children in a tree with `len` nodes.
pub fn is_internal_node(len: usize, i: usize) -> bool {
    // 2i+1 cannot overflow for any i that indexes a real allocation, but an
    // arbitrary caller-supplied index can.
    i.checked_mul(2)
        .and_then(|d| d.checked_add(1))
        .is_some_and(|left| is_tree_node(len, left))
}

/// Whether `i` is a position without children in a tree with `len` nodes.
pub fn is_leaf_node(len: usize, i: usize) -> bool {
    is_tree_node(len, i) && !is_internal_node(len, i)
}

pub(crate) fn check_leaf_node(len: usize, i: usize) -> Result<()> {
    if !is_leaf_node(len, i) {
        return Err(MerkleError::Validation(format!(
            "index {} is not a leaf (tree length {})",
            i, len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_children_and_parent_are_inverse() {
        for i in 0..64 {
            assert_eq!(parent_index(left_child_index(i)).unwrap(), i);
            assert_eq!(parent_index(right_child_index(i)).unwrap(), i);
        }
    }

    #[test]
    fn test_sibling_pairs() {
        assert_eq!(sibling_index(1).unwrap(), 2);
        assert_eq!(sibling_index(2).unwrap(), 1);
        assert_eq!(sibling_index(7).unwrap(), 8);
        assert_eq!(sibling_index(8).unwrap(), 7);
        for i in 1..64 {
            let s = sibling_index(i).unwrap();
            assert_eq!(sibling_index(s).unwrap(), i);
            assert_eq!(parent_index(s).unwrap(), parent_index(i).unwrap());
        }
    }

    #[test]
    fn test_root_has_no_parent_or_sibling() {
        assert_matches!(parent_index(0), Err(MerkleError::Index(_)));
        assert_matches!(sibling_index(0), Err(MerkleError::Index(_)));
    }

    #[test]
    fn test_node_kinds_for_five_node_tree() {
        // 3 leaves -> 5 nodes, leaves at 2, 3, 4
        let len = 5;
        assert!(is_internal_node(len, 0));
        assert!(is_internal_node(len, 1));
        assert!(is_leaf_node(len, 2));
        assert!(is_leaf_node(len, 3));
        assert!(is_leaf_node(len, 4));
        assert!(!is_tree_node(len, 5));
        assert!(!is_leaf_node(len, 5));
        assert!(!is_internal_node(len, usize::MAX));
    }

    #[test]
    fn test_single_node_tree_root_is_a_leaf() {
        assert!(is_leaf_node(1, 0));
        assert!(check_leaf_node(1, 0).is_ok());
        assert_matches!(check_leaf_node(0, 0), Err(MerkleError::Validation(_)));
    }
}
