use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use pinhole_core::repository::{Repository, Result};
use pinhole_core::{Alias, StorageError, UrlMapping};
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory implementation of the repository contract, for tests.
///
/// DashMap's sharded locks let concurrent requests touch different aliases
/// without blocking each other, which is close enough to the SQL backends'
/// row-level concurrency for service-level tests. Not selectable in
/// production configuration.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: DashMap<String, UrlMapping>,
    next_id: AtomicI64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn save_url(&self, url: &str, alias: &Alias) -> Result<i64> {
        // Entry-based check-and-insert keeps two racing saves of the same
        // alias from both succeeding.
        match self.storage.entry(alias.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(alias.to_string())),
            Entry::Vacant(vacant) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                vacant.insert(UrlMapping {
                    id,
                    alias: alias.to_string(),
                    url: url.to_owned(),
                });
                Ok(id)
            }
        }
    }

    async fn get_url(&self, alias: &Alias) -> Result<String> {
        self.storage
            .get(alias.as_str())
            .map(|mapping| mapping.url.clone())
            .ok_or_else(|| StorageError::NotFound(alias.to_string()))
    }

    async fn delete_url(&self, alias: &Alias) -> Result<()> {
        self.storage.remove(alias.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(value: &str) -> Alias {
        Alias::new_unchecked(value)
    }

    #[tokio::test]
    async fn save_assigns_increasing_positive_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.save_url("https://example.com", &alias("one")).await.unwrap();
        let second = repo.save_url("https://example.com", &alias("two")).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn duplicate_alias_conflicts() {
        let repo = InMemoryRepository::new();
        let taken = alias("abc123");

        repo.save_url("https://example.com", &taken).await.unwrap();
        let err = repo.save_url("https://other.com", &taken).await.unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
        // The original mapping survives the failed save.
        assert_eq!(repo.get_url(&taken).await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn get_missing_alias_is_not_found() {
        let repo = InMemoryRepository::new();

        let err = repo.get_url(&alias("nope")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryRepository::new();
        let target = alias("abc123");

        repo.save_url("https://example.com", &target).await.unwrap();
        repo.delete_url(&target).await.unwrap();

        let err = repo.get_url(&target).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));

        // Deleting again must still succeed.
        repo.delete_url(&target).await.unwrap();
    }
}
