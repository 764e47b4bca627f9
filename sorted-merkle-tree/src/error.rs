use thiserror::Error;

/// Alias for `core::result::Result<T, MerkleError>`.
pub type Result<T> = core::result::Result<T, MerkleError>;

/// Errors from sorted Merkle tree operations.
///
/// Every failure on caller-supplied data is reported through one of these
/// variants; verification of a well-formed proof that simply does not match
/// the expected root is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    /// A value is not a usable node, an index does not name a leaf, or an
    /// index was requested twice.
    #[error("validation error: {0}")]
    Validation(String),
    /// The tree could not be built from the given leaves.
    #[error("construction error: {0}")]
    Construction(String),
    /// The multiproof's leaves, proof nodes and flags do not fit together.
    #[error("invalid multiproof: {0}")]
    ProofShape(String),
    /// Parent or sibling requested for the root.
    #[error("index error: {0}")]
    Index(String),
    /// Hex or bincode conversion failed.
    #[error("encoding error: {0}")]
    Encoding(String),
}
