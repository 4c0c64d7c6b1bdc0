use async_trait::async_trait;
use pinhole_core::repository::{Repository, Result};
use pinhole_core::{Alias, StorageError};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;
use typed_builder::TypedBuilder;

use crate::convert::{is_unique_violation, map_sqlx_error};

pub use sqlx::postgres::PgSslMode;

/// Statements are prepared once per connection and reused for the
/// connection's lifetime.
const STATEMENT_CACHE_CAPACITY: usize = 256;

/// Connection settings for the client/server backend.
///
/// Pool limits are configuration inputs, not computed adaptively.
#[derive(Debug, Clone, TypedBuilder)]
pub struct PostgresConfig {
    #[builder(setter(into))]
    pub host: String,
    #[builder(default = 5432)]
    pub port: u16,
    #[builder(setter(into))]
    pub user: String,
    #[builder(setter(into))]
    pub password: String,
    #[builder(setter(into))]
    pub database: String,
    #[builder(default = PgSslMode::Disable)]
    pub ssl_mode: PgSslMode,
    #[builder(default = 5)]
    pub pool_max_conns: u32,
    #[builder(default = Duration::from_secs(180))]
    pub pool_max_conn_lifetime: Duration,
    #[builder(default = Duration::from_secs(100))]
    pub pool_max_conn_idle_time: Duration,
}

/// Client/server backend over a shared connection pool.
///
/// The schema is owned by the operator (see `ddl/postgres/url.sql`); this
/// backend never creates it.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a repository from an existing PostgreSQL connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Establishes the connection pool. Failure here is fatal to backend
    /// construction; there is no lazy reconnect.
    pub async fn connect(config: &PostgresConfig) -> Result<Self> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database)
            .ssl_mode(config.ssl_mode)
            .statement_cache_capacity(STATEMENT_CACHE_CAPACITY);

        let pool = PgPoolOptions::new()
            .max_connections(config.pool_max_conns)
            .max_lifetime(config.pool_max_conn_lifetime)
            .idle_timeout(config.pool_max_conn_idle_time)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn save_url(&self, url: &str, alias: &Alias) -> Result<i64> {
        // Insert and fetch the generated identity in one round trip.
        let result: std::result::Result<(i64,), sqlx::Error> =
            sqlx::query_as("INSERT INTO url (url, alias) VALUES ($1, $2) RETURNING id")
                .bind(url)
                .bind(alias.as_str())
                .fetch_one(&self.pool)
                .await;

        match result {
            Ok((id,)) => Ok(id),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(alias.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn get_url(&self, alias: &Alias) -> Result<String> {
        let row: Option<(String,)> = sqlx::query_as("SELECT url FROM url WHERE alias = $1")
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
        sqlx::query("DELETE FROM url WHERE alias = $1")
            .bind(alias.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
