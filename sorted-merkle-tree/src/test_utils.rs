use crate::Node;

/// The three 32-byte leaves `0x01..0x20`, `0x21..0x40`, `0x41..0x60`.
pub(crate) fn reference_leaves() -> Vec<Node> {
    (0..3u8)
        .map(|leaf| Node::new(core::array::from_fn(|i| leaf * 32 + i as u8 + 1)))
        .collect()
}

/// Root of the tree built from [`reference_leaves`].
pub(crate) const REFERENCE_ROOT: &str =
    "0xbf7ba5aed55146169080251077c6b40043140706ee4a0e7365595803490104df";
