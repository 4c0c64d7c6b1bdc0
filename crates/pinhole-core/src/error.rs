use thiserror::Error;

/// Errors from constructing core types.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid alias: {0}")]
    InvalidAlias(String),
}

/// Errors surfaced by [`Repository`](crate::repository::Repository) operations.
///
/// Every backend classifies its native failures onto these kinds, so callers
/// can branch on the kind without knowing which backend produced it.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The alias is already mapped. Recoverable by regenerating the alias
    /// and retrying the save.
    #[error("alias already exists: {0}")]
    Conflict(String),
    /// No mapping exists for the alias.
    #[error("alias not found: {0}")]
    NotFound(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}
