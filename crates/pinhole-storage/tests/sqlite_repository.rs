use pinhole_core::{Alias, Repository, StorageError};
use pinhole_storage::SqliteRepository;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::time::Duration;

struct Fixture {
    repo: SqliteRepository,
}

impl Fixture {
    async fn start() -> Self {
        // A single long-lived connection keeps the in-memory database alive
        // for the whole test; every pooled connection would otherwise get
        // its own empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(SqliteConnectOptions::new().in_memory(true))
            .await
            .expect("open in-memory sqlite");

        let repo = SqliteRepository::new(pool);
        repo.ensure_schema().await.expect("bootstrap schema");

        Self { repo }
    }
}

fn alias(value: &str) -> Alias {
    Alias::new_unchecked(value)
}

#[tokio::test]
async fn schema_bootstrap_is_idempotent() {
    let fixture = Fixture::start().await;

    // A second bootstrap against the same database must be a no-op.
    fixture.repo.ensure_schema().await.unwrap();
    fixture.repo.ensure_schema().await.unwrap();
}

#[tokio::test]
async fn save_then_get_round_trips() {
    let fixture = Fixture::start().await;

    let id = fixture
        .repo
        .save_url("https://example.com", &alias("abc123"))
        .await
        .unwrap();

    assert!(id > 0);
    assert_eq!(
        fixture.repo.get_url(&alias("abc123")).await.unwrap(),
        "https://example.com"
    );
}

#[tokio::test]
async fn save_assigns_increasing_ids() {
    let fixture = Fixture::start().await;

    let first = fixture
        .repo
        .save_url("https://example.com", &alias("one"))
        .await
        .unwrap();
    let second = fixture
        .repo
        .save_url("https://example.com", &alias("two"))
        .await
        .unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[tokio::test]
async fn duplicate_alias_conflicts_and_keeps_original_row() {
    let fixture = Fixture::start().await;
    let taken = alias("abc123");

    fixture
        .repo
        .save_url("https://example.com", &taken)
        .await
        .unwrap();

    let err = fixture
        .repo
        .save_url("https://other.com", &taken)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));

    // The failed save must not have replaced or duplicated the row.
    assert_eq!(
        fixture.repo.get_url(&taken).await.unwrap(),
        "https://example.com"
    );
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM url WHERE alias = ?")
        .bind(taken.as_str())
        .fetch_one(fixture.repo.pool())
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[tokio::test]
async fn get_missing_alias_is_not_found() {
    let fixture = Fixture::start().await;

    let err = fixture.repo.get_url(&alias("missing")).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let fixture = Fixture::start().await;
    let target = alias("abc123");

    fixture
        .repo
        .save_url("https://example.com", &target)
        .await
        .unwrap();

    fixture.repo.delete_url(&target).await.unwrap();
    let err = fixture.repo.get_url(&target).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));

    // Deleting an alias with no mapping must still succeed.
    fixture.repo.delete_url(&target).await.unwrap();
    fixture.repo.delete_url(&alias("never-existed")).await.unwrap();
}

#[tokio::test]
async fn full_scenario() {
    let fixture = Fixture::start().await;
    let target = alias("abc123");

    let id = fixture
        .repo
        .save_url("https://example.com", &target)
        .await
        .unwrap();
    assert_eq!(id, 1);

    assert_eq!(
        fixture.repo.get_url(&target).await.unwrap(),
        "https://example.com"
    );

    let err = fixture
        .repo
        .save_url("https://other.com", &target)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));

    fixture.repo.delete_url(&target).await.unwrap();

    let err = fixture.repo.get_url(&target).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));

    fixture.repo.delete_url(&target).await.unwrap();
}
