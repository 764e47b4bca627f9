use assert_matches::assert_matches;
use sorted_merkle_tree::{
    MerkleError, MerkleTree, MultiProof, Node, get_multi_proof, process_multi_proof,
    process_proof_bytes, validate_tree,
};

fn contiguous(start: u8) -> Vec<u8> {
    (start..start + 32).collect()
}

#[test]
fn reference_tree_end_to_end() {
    let leaves = vec![contiguous(0x01), contiguous(0x21), contiguous(0x41)];
    let tree = MerkleTree::from_leaf_bytes(&leaves).expect("valid leaves");
    assert_eq!(
        tree.root(),
        "bf7ba5aed55146169080251077c6b40043140706ee4a0e7365595803490104df"
            .parse::<Node>()
            .unwrap()
    );

    let proof = tree.proof(2).expect("index 2 is a leaf");
    let proof_bytes: Vec<[u8; 32]> = proof.iter().map(|p| p.to_bytes()).collect();
    assert_eq!(
        process_proof_bytes(&leaves[2], &proof_bytes).unwrap(),
        tree.root()
    );

    let multi = get_multi_proof(tree.nodes(), &[3]).expect("index 3 is a leaf");
    assert_eq!(multi.leaves()[0].as_bytes().as_slice(), leaves[1].as_slice());
    assert_eq!(process_multi_proof(&multi).unwrap(), tree.root());

    assert!(validate_tree(tree.nodes()).is_ok());
}

#[test]
fn thirty_one_byte_values_are_rejected_everywhere() {
    let short = vec![0u8; 31];
    let good = vec![0u8; 32];

    assert_matches!(
        MerkleTree::from_leaf_bytes(&[good.clone(), short.clone()]),
        Err(MerkleError::Validation(_))
    );
    assert_matches!(
        process_proof_bytes(&short, &[good.clone()]),
        Err(MerkleError::Validation(_))
    );
    assert_matches!(
        process_proof_bytes(&good, &[short.clone()]),
        Err(MerkleError::Validation(_))
    );
    assert_matches!(
        MultiProof::from_raw_parts(&[short.clone()], &[], vec![]),
        Err(MerkleError::Validation(_))
    );
    assert_matches!(
        validate_tree(&[short]),
        Err(MerkleError::Validation(_))
    );
    assert_matches!(
        Node::try_from(&good[..31]),
        Err(MerkleError::Validation(_))
    );
}
