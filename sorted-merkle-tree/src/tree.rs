use std::{collections::BTreeMap, fmt};

use crate::{
    MerkleError, MultiProof, Node, Result,
    hash::hash_pair,
    index::{left_child_index, right_child_index},
    proof::get_proof,
    validate::validate_tree,
};

/// Build the flat tree for `leaves`.
///
/// Leaves are sorted ascending and placed right-to-left into the trailing
/// `N` slots, so the first sorted leaf ends up at the last index. Internal
/// nodes are then filled from the highest index down to the root.
///
/// Returns `2N - 1` nodes. A single leaf yields a one-node tree whose only
/// entry is both leaf and root.
pub fn make_merkle_tree(mut leaves: Vec<Node>) -> Result<Vec<Node>> {
    if leaves.is_empty() {
        return Err(MerkleError::Construction(
            "expected non-zero number of leaves".into(),
        ));
    }
    leaves.sort_unstable();

    let leaf_count = leaves.len();
    let len = 2 * leaf_count - 1;
    let mut tree = vec![Node::default(); len];

    for (i, leaf) in leaves.into_iter().enumerate() {
        tree[len - 1 - i] = leaf;
    }
    for i in (0..len - leaf_count).rev() {
        tree[i] = hash_pair(&tree[left_child_index(i)], &tree[right_child_index(i)]);
    }

    Ok(tree)
}

/// Draw the flat tree one node per line, pre-order with the left subtree
/// first:
///
/// ```text
/// 0) 0xbf7b...
/// ├─ 1) 0xb74d...
/// │  ├─ 3) 0x2122...
/// │  └─ 4) 0x0102...
/// └─ 2) 0x4142...
/// ```
pub fn render_tree(tree: &[Node]) -> Result<String> {
    if tree.is_empty() {
        return Err(MerkleError::Validation(
            "expected non-zero number of nodes".into(),
        ));
    }

    // Each entry carries the branch flags of its ancestors: `true` while
    // more siblings follow at that depth.
    let mut stack: Vec<(usize, Vec<bool>)> = vec![(0, Vec::new())];
    let mut lines = Vec::with_capacity(tree.len());

    while let Some((i, path)) = stack.pop() {
        let mut line = String::new();
        if let Some((last, ancestors)) = path.split_last() {
            for &more in ancestors {
                line.push_str(if more { "│  " } else { "   " });
            }
            line.push_str(if *last { "├─ " } else { "└─ " });
        }
        line.push_str(&format!("{}) {}", i, tree[i]));
        lines.push(line);

        if right_child_index(i) < tree.len() {
            let mut right = path.clone();
            right.push(false);
            let mut left = path;
            left.push(true);
            stack.push((right_child_index(i), right));
            stack.push((left_child_index(i), left));
        }
    }

    Ok(lines.join("\n"))
}

/// An immutable sorted-pair Merkle tree.
///
/// Wraps the flat node array produced by [`make_merkle_tree`]. The array is
/// never mutated after construction, so a `&MerkleTree` can be shared across
/// threads for concurrent proof generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    nodes: Vec<Node>,
    leaf_count: usize,
}

impl MerkleTree {
    /// Build a tree from already validated leaves.
    pub fn new(leaves: Vec<Node>) -> Result<Self> {
        let leaf_count = leaves.len();
        let nodes = make_merkle_tree(leaves)?;
        Ok(Self { nodes, leaf_count })
    }

    /// Build a tree from raw leaf bytes, rejecting any leaf that is not 32
    /// bytes.
    pub fn from_leaf_bytes<B: AsRef<[u8]>>(leaves: &[B]) -> Result<Self> {
        let leaves = leaves
            .iter()
            .map(|leaf| Node::from_slice(leaf.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(leaves)
    }

    /// Reconstitute a tree from an untrusted flat array.
    ///
    /// The array is accepted only if every internal node is the pair hash
    /// of its children.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self> {
        validate_tree(&nodes)?;
        let leaf_count = nodes.len().div_ceil(2);
        Ok(Self { nodes, leaf_count })
    }

    /// The root node.
    pub fn root(&self) -> Node {
        self.nodes[0]
    }

    /// Total number of nodes (`2N - 1`).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a tree has at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// The flat node array.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Consume the tree, returning the flat node array.
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// `(index, leaf)` pairs in index order.
    pub fn leaves(&self) -> impl Iterator<Item = (usize, &Node)> {
        let first_leaf = self.nodes.len() - self.leaf_count;
        self.nodes[first_leaf..]
            .iter()
            .enumerate()
            .map(move |(offset, leaf)| (first_leaf + offset, leaf))
    }

    /// Index of the leaf holding `value`, if any.
    ///
    /// Leaves are stored in descending order, so this is a binary search.
    pub fn leaf_index(&self, value: &Node) -> Option<usize> {
        let first_leaf = self.nodes.len() - self.leaf_count;
        self.nodes[first_leaf..]
            .binary_search_by(|probe| value.cmp(probe))
            .ok()
            .map(|offset| first_leaf + offset)
    }

    /// Sibling-path proof for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Result<Vec<Node>> {
        get_proof(&self.nodes, index)
    }

    /// Sibling-path proof for the leaf holding `value`.
    pub fn proof_for_leaf(&self, value: &Node) -> Result<Vec<Node>> {
        let index = self.leaf_index(value).ok_or_else(|| {
            MerkleError::Validation(format!("leaf {} is not in the tree", value))
        })?;
        self.proof(index)
    }

    /// Compacted proof for the leaves at `indices`.
    pub fn multi_proof(&self, indices: &[usize]) -> Result<MultiProof> {
        MultiProof::generate(&self.nodes, indices)
    }

    /// Compacted proof for the leaves holding `values`.
    ///
    /// A value stored in several leaves may be requested up to that many
    /// times; each request takes the next unused leaf holding it.
    pub fn multi_proof_for_leaves(&self, values: &[Node]) -> Result<MultiProof> {
        let first_leaf = self.nodes.len() - self.leaf_count;
        let leaves = &self.nodes[first_leaf..];
        let mut taken: BTreeMap<Node, usize> = BTreeMap::new();
        let indices = values
            .iter()
            .map(|value| {
                // equal leaves form one run inside the descending slice
                let start = leaves.partition_point(|leaf| leaf > value);
                let end = leaves.partition_point(|leaf| leaf >= value);
                if start == end {
                    return Err(MerkleError::Validation(format!(
                        "leaf {} is not in the tree",
                        value
                    )));
                }
                let used = taken.entry(*value).or_default();
                if start + *used >= end {
                    return Err(MerkleError::Validation(format!(
                        "leaf {} requested more than the {} time(s) it occurs",
                        value,
                        end - start
                    )));
                }
                let index = first_leaf + start + *used;
                *used += 1;
                Ok(index)
            })
            .collect::<Result<Vec<_>>>()?;
        self.multi_proof(&indices)
    }
}

impl fmt::Display for MerkleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = render_tree(&self.nodes).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
