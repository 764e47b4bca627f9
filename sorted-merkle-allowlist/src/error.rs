use sorted_merkle_tree::MerkleError;
use thiserror::Error;

/// Errors from allowlist operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllowlistError {
    #[error("could not generate merkle tree: no identifiers")]
    EmptyIdentifiers,
    #[error("identifier needs {len} bytes, at most 32 are allowed")]
    IdentifierTooLarge { len: usize },
    #[error("identifier {0} is not in the allowlist")]
    UnknownIdentifier(String),
    #[error(transparent)]
    Merkle(#[from] MerkleError),
}
