use async_trait::async_trait;
use pinhole_core::repository::{Repository, Result};
use pinhole_core::{Alias, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::convert::{is_unique_violation, map_sqlx_error};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS url (
    id INTEGER PRIMARY KEY,
    alias TEXT NOT NULL UNIQUE,
    url TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_alias ON url (alias);
"#;

/// Embedded single-file backend.
///
/// The schema is bootstrapped idempotently on connect, so pointing the
/// service at a fresh path is enough to provision it. SQLite's single-writer
/// locking is an accepted constraint here; the pool serializes writers.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    ///
    /// The caller is responsible for the schema; see [`Self::ensure_schema`].
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the database at `path`, creating the file if missing, and
    /// ensures the schema exists.
    pub async fn connect(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self::new(pool);
        repository.ensure_schema().await?;
        Ok(repository)
    }

    /// Idempotently creates the table and index. Safe to run on every
    /// startup; [`Self::connect`] runs it automatically.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn save_url(&self, url: &str, alias: &Alias) -> Result<i64> {
        let result = sqlx::query("INSERT INTO url (url, alias) VALUES (?, ?)")
            .bind(url)
            .bind(alias.as_str())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(alias.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn get_url(&self, alias: &Alias) -> Result<String> {
        let row: Option<(String,)> = sqlx::query_as("SELECT url FROM url WHERE alias = ?")
            .bind(alias.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some((url,)) => Ok(url),
            None => Err(StorageError::NotFound(alias.to_string())),
        }
    }

    async fn delete_url(&self, alias: &Alias) -> Result<()> {
        // Zero rows matched is fine; delete is idempotent.
        sqlx::query("DELETE FROM url WHERE alias = ?")
            .bind(alias.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
