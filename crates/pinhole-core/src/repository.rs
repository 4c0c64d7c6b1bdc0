use crate::alias::Alias;
use crate::error::StorageError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A persisted alias -> URL mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlMapping {
    /// Store-assigned identity. Positive, unique, immutable after creation.
    pub id: i64,
    /// The alias. Unique across all mappings, immutable after creation.
    pub alias: String,
    /// The target URL the alias redirects to.
    pub url: String,
}

/// Storage contract for alias -> URL mappings.
///
/// Exactly one implementation is active per process, selected from
/// configuration at startup. Each operation is a single unit of work against
/// the store; none retry internally and none cache. Races between two
/// concurrent saves of the same alias are arbitrated by the store's unique
/// constraint: exactly one succeeds, the other observes [`StorageError::Conflict`].
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Inserts a new mapping and returns the store-assigned id.
    ///
    /// Fails with [`StorageError::Conflict`] when the alias is already taken.
    async fn save_url(&self, url: &str, alias: &Alias) -> Result<i64>;

    /// Looks up the target URL for an alias.
    ///
    /// Fails with [`StorageError::NotFound`] when no mapping exists.
    async fn get_url(&self, alias: &Alias) -> Result<String>;

    /// Deletes the mapping for an alias.
    ///
    /// Deleting an alias that has no mapping is not an error.
    async fn delete_url(&self, alias: &Alias) -> Result<()>;
}
