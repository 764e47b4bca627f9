use sha3::{Digest, Keccak256};

use crate::Node;

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> Node {
    Node::new(Keccak256::digest(data).into())
}

/// Hash two nodes into their parent: `keccak256(min(a, b) || max(a, b))`.
///
/// Sorting the pair first makes the combination commutative, so a verifier
/// never needs to know on which side a sibling sits.
pub fn hash_pair(a: &Node, b: &Node) -> Node {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(first.as_bytes());
    hasher.update(second.as_bytes());
    Node::new(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_empty_input() {
        assert_eq!(
            keccak256(&[]).to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_hash_pair_is_commutative() {
        let a = Node::new([0x11; 32]);
        let b = Node::new([0x22; 32]);
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn test_hash_pair_sorts_before_concatenating() {
        let a = Node::new([0x22; 32]);
        let b = Node::new([0x11; 32]);
        let mut input = [0u8; 64];
        input[..32].copy_from_slice(b.as_bytes());
        input[32..].copy_from_slice(a.as_bytes());
        assert_eq!(hash_pair(&a, &b), keccak256(&input));
    }
}
