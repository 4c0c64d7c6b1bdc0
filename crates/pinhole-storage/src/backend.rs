use async_trait::async_trait;
use pinhole_core::repository::{Repository, Result};
use pinhole_core::Alias;

use crate::postgres::{PostgresConfig, PostgresRepository};
use crate::sqlite::SqliteRepository;

/// Location of the embedded single-file store.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub path: String,
}

/// Which backend to run, with its connection parameters.
///
/// Selected once at startup; the choice is immutable for the process
/// lifetime.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Sqlite(SqliteConfig),
    Postgres(PostgresConfig),
}

/// The closed set of production backends behind one repository value.
///
/// Enum dispatch keeps backend selection at the single construction point;
/// there is no trait-object indirection on the per-request path.
#[derive(Debug, Clone)]
pub enum AnyRepository {
    Sqlite(SqliteRepository),
    Postgres(PostgresRepository),
}

impl AnyRepository {
    /// Connects the backend named by `config`.
    pub async fn connect(config: &StorageConfig) -> Result<Self> {
        match config {
            StorageConfig::Sqlite(sqlite) => {
                Ok(Self::Sqlite(SqliteRepository::connect(&sqlite.path).await?))
            }
            StorageConfig::Postgres(postgres) => {
                Ok(Self::Postgres(PostgresRepository::connect(postgres).await?))
            }
        }
    }

    /// Human-readable backend name, for startup logging.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
        }
    }
}

#[async_trait]
impl Repository for AnyRepository {
    async fn save_url(&self, url: &str, alias: &Alias) -> Result<i64> {
        match self {
            Self::Sqlite(repo) => repo.save_url(url, alias).await,
            Self::Postgres(repo) => repo.save_url(url, alias).await,
        }
    }

    async fn get_url(&self, alias: &Alias) -> Result<String> {
        match self {
            Self::Sqlite(repo) => repo.get_url(alias).await,
            Self::Postgres(repo) => repo.get_url(alias).await,
        }
    }

    async fn delete_url(&self, alias: &Alias) -> Result<()> {
        match self {
            Self::Sqlite(repo) => repo.delete_url(alias).await,
            Self::Postgres(repo) => repo.delete_url(alias).await,
        }
    }
}
