use crate::error::{Result, ShortenerError};
use pinhole_core::{Alias, Repository, StorageError};
use pinhole_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info};

/// How many generated aliases to try before giving up on a create.
const MAX_GENERATE_ATTEMPTS: usize = 3;

/// A concrete URL-shortening service over a repository and a generator.
///
/// Handles URL validation and alias assignment. Uniqueness is arbitrated by
/// the repository; a collision on a generated alias is retried with a fresh
/// draw a bounded number of times, while a collision on a caller-chosen
/// alias is surfaced to the caller.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
}

/// A freshly created mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedUrl {
    /// The store-assigned id.
    pub id: i64,
    /// The alias the mapping was created under.
    pub alias: Alias,
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new service.
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
        }
    }

    /// Creates a mapping for `url`, under `custom_alias` when given or a
    /// generated alias otherwise.
    pub async fn create(&self, url: &str, custom_alias: Option<Alias>) -> Result<CreatedUrl> {
        Self::validate_url(url)?;

        if let Some(alias) = custom_alias {
            let id = self
                .repository
                .save_url(url, &alias)
                .await
                .map_err(lower_storage_error)?;
            info!(alias = %alias, id, "created alias");
            return Ok(CreatedUrl { id, alias });
        }

        let mut last_conflict = None;
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let alias: Alias = self.generator.generate().into();
            match self.repository.save_url(url, &alias).await {
                Ok(id) => {
                    info!(alias = %alias, id, "created alias");
                    return Ok(CreatedUrl { id, alias });
                }
                Err(StorageError::Conflict(taken)) => {
                    debug!(alias = %taken, "generated alias collided, drawing again");
                    last_conflict = Some(taken);
                }
                Err(err) => return Err(lower_storage_error(err)),
            }
        }

        Err(ShortenerError::AliasConflict(
            last_conflict.unwrap_or_default(),
        ))
    }

    /// Resolves an alias to its target URL.
    pub async fn resolve(&self, alias: &Alias) -> Result<String> {
        self.repository
            .get_url(alias)
            .await
            .map_err(lower_storage_error)
    }

    /// Deletes an alias. Deleting an alias with no mapping succeeds.
    pub async fn delete(&self, alias: &Alias) -> Result<()> {
        self.repository
            .delete_url(alias)
            .await
            .map_err(lower_storage_error)
    }

    /// The URL must have an http or https scheme and a host.
    fn validate_url(url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        };

        if rest.is_empty() {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        }

        let scheme = scheme.to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL scheme must be http or https: {}",
                scheme
            )));
        }

        Ok(())
    }
}

fn lower_storage_error(err: StorageError) -> ShortenerError {
    match err {
        StorageError::Conflict(alias) => ShortenerError::AliasConflict(alias),
        StorageError::NotFound(alias) => ShortenerError::NotFound(alias),
        other => ShortenerError::Storage(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinhole_generator::SeqGenerator;
    use pinhole_storage::InMemoryRepository;

    fn test_service() -> ShortenerService<InMemoryRepository, SeqGenerator> {
        ShortenerService::new(InMemoryRepository::new(), SeqGenerator::with_prefix("pin"))
    }

    #[tokio::test]
    async fn create_with_generated_alias() {
        let service = test_service();

        let created = service.create("https://example.com", None).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.alias.as_str(), "pin000000");
        assert_eq!(
            service.resolve(&created.alias).await.unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn create_with_custom_alias() {
        let service = test_service();
        let alias = Alias::new("my-alias").unwrap();

        let created = service
            .create("https://example.com", Some(alias.clone()))
            .await
            .unwrap();

        assert_eq!(created.alias, alias);
        assert_eq!(
            service.resolve(&alias).await.unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn duplicate_custom_alias_fails() {
        let service = test_service();
        let alias = Alias::new("my-alias").unwrap();

        service
            .create("https://example1.com", Some(alias.clone()))
            .await
            .unwrap();
        let err = service
            .create("https://example2.com", Some(alias))
            .await
            .unwrap_err();

        assert!(matches!(err, ShortenerError::AliasConflict(_)));
    }

    #[tokio::test]
    async fn generated_alias_collision_draws_again() {
        let repo = InMemoryRepository::new();
        // Occupy the first code the generator will draw.
        repo.save_url("https://taken.example", &Alias::new_unchecked("pin000000"))
            .await
            .unwrap();
        let service = ShortenerService::new(repo, SeqGenerator::with_prefix("pin"));

        let created = service.create("https://example.com", None).await.unwrap();

        assert_eq!(created.alias.as_str(), "pin000001");
    }

    #[tokio::test]
    async fn generated_alias_retries_are_bounded() {
        let repo = InMemoryRepository::new();
        for code in ["pin000000", "pin000001", "pin000002"] {
            repo.save_url("https://taken.example", &Alias::new_unchecked(code))
                .await
                .unwrap();
        }
        let service = ShortenerService::new(repo, SeqGenerator::with_prefix("pin"));

        let err = service.create("https://example.com", None).await.unwrap_err();

        assert!(matches!(err, ShortenerError::AliasConflict(_)));
    }

    #[tokio::test]
    async fn invalid_urls_are_rejected() {
        let service = test_service();

        for url in ["", "not-a-valid-url", "ftp://example.com", "https://"] {
            let err = service.create(url, None).await.unwrap_err();
            assert!(
                matches!(err, ShortenerError::InvalidUrl(_)),
                "expected InvalidUrl for {url:?}"
            );
        }
    }

    #[tokio::test]
    async fn resolve_missing_alias_is_not_found() {
        let service = test_service();

        let err = service
            .resolve(&Alias::new("nonexistent").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, ShortenerError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_then_resolve_is_not_found() {
        let service = test_service();
        let alias = Alias::new("abc123").unwrap();

        service
            .create("https://example.com", Some(alias.clone()))
            .await
            .unwrap();
        service.delete(&alias).await.unwrap();

        let err = service.resolve(&alias).await.unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_alias_succeeds() {
        let service = test_service();

        service
            .delete(&Alias::new("nonexistent").unwrap())
            .await
            .unwrap();
    }
}
