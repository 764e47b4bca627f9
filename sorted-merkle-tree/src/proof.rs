//! Single-leaf sibling-path proofs.

use crate::{
    Node, Result,
    hash::hash_pair,
    index::{check_leaf_node, parent_index, sibling_index},
};

/// Collect the sibling of every node on the path from leaf `index` up to,
/// but excluding, the root. The proof is ordered leaf-to-root.
pub fn get_proof(tree: &[Node], mut index: usize) -> Result<Vec<Node>> {
    check_leaf_node(tree.len(), index)?;

    let mut proof = Vec::new();
    while index > 0 {
        proof.push(tree[sibling_index(index)?]);
        index = parent_index(index)?;
    }
    Ok(proof)
}

/// Fold `proof` onto `leaf` and return the candidate root.
///
/// The caller compares the result with a trusted root.
pub fn process_proof(leaf: &Node, proof: &[Node]) -> Node {
    proof
        .iter()
        .fold(*leaf, |acc, sibling| hash_pair(&acc, sibling))
}

/// [`process_proof`] for raw bytes; every element must be 32 bytes.
pub fn process_proof_bytes<L, P>(leaf: L, proof: &[P]) -> Result<Node>
where
    L: AsRef<[u8]>,
    P: AsRef<[u8]>,
{
    let leaf = Node::from_slice(leaf.as_ref())?;
    let proof = proof
        .iter()
        .map(|p| Node::from_slice(p.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(process_proof(&leaf, &proof))
}

/// Whether `proof` links `leaf` to `root`.
pub fn verify_proof(root: &Node, leaf: &Node, proof: &[Node]) -> bool {
    process_proof(leaf, proof) == *root
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{MerkleError, make_merkle_tree};

    fn tree_of(n: u8) -> Vec<Node> {
        make_merkle_tree((0..n).map(|i| Node::new([i.wrapping_mul(37); 32])).collect()).unwrap()
    }

    #[test]
    fn test_every_leaf_proves_to_root() {
        for n in 1..=12 {
            let tree = tree_of(n);
            for index in tree.len() - n as usize..tree.len() {
                let proof = get_proof(&tree, index).unwrap();
                assert_eq!(process_proof(&tree[index], &proof), tree[0]);
                assert!(verify_proof(&tree[0], &tree[index], &proof));
            }
        }
    }

    #[test]
    fn test_proof_length_is_depth() {
        let tree = tree_of(4);
        // leaves at 3..=6, all at depth 2
        for index in 3..7 {
            assert_eq!(get_proof(&tree, index).unwrap().len(), 2);
        }
        let tree = tree_of(3);
        assert_eq!(get_proof(&tree, 2).unwrap().len(), 1);
        assert_eq!(get_proof(&tree, 3).unwrap().len(), 2);
    }

    #[test]
    fn test_single_leaf_proof_is_empty() {
        let tree = tree_of(1);
        let proof = get_proof(&tree, 0).unwrap();
        assert!(proof.is_empty());
        assert_eq!(process_proof(&tree[0], &proof), tree[0]);
    }

    #[test]
    fn test_internal_or_missing_index_is_rejected() {
        let tree = tree_of(3);
        assert_matches!(get_proof(&tree, 0), Err(MerkleError::Validation(_)));
        assert_matches!(get_proof(&tree, 1), Err(MerkleError::Validation(_)));
        assert_matches!(get_proof(&tree, 5), Err(MerkleError::Validation(_)));
    }

    #[test]
    fn test_wrong_leaf_does_not_verify() {
        let tree = tree_of(5);
        let proof = get_proof(&tree, 6).unwrap();
        assert!(!verify_proof(&tree[0], &Node::new([0xfe; 32]), &proof));
    }

    #[test]
    fn test_bytes_form_checks_lengths() {
        let tree = tree_of(3);
        let proof: Vec<Vec<u8>> = get_proof(&tree, 4)
            .unwrap()
            .iter()
            .map(|p| p.as_bytes().to_vec())
            .collect();
        assert_eq!(
            process_proof_bytes(tree[4].as_bytes(), &proof).unwrap(),
            tree[0]
        );

        assert_matches!(
            process_proof_bytes([0u8; 31], &proof),
            Err(MerkleError::Validation(_))
        );
        let mut short = proof.clone();
        short[0].pop();
        assert_matches!(
            process_proof_bytes(tree[4].as_bytes(), &short),
            Err(MerkleError::Validation(_))
        );
    }
}
