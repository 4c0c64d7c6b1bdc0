use anyhow::Context;
use clap::{Parser, ValueEnum};
use pinhole_storage::{PgSslMode, PostgresConfig, SqliteConfig, StorageConfig};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

pub const LISTEN_ADDR_ENV: &str = "PINHOLE_LISTEN_ADDR";
pub const AUTH_TOKEN_ENV: &str = "PINHOLE_AUTH_TOKEN";
pub const ALIAS_LENGTH_ENV: &str = "PINHOLE_ALIAS_LENGTH";
pub const STORAGE_BACKEND_ENV: &str = "PINHOLE_STORAGE_BACKEND";
pub const SQLITE_PATH_ENV: &str = "PINHOLE_SQLITE_PATH";
pub const POSTGRES_HOST_ENV: &str = "PINHOLE_POSTGRES_HOST";
pub const POSTGRES_PORT_ENV: &str = "PINHOLE_POSTGRES_PORT";
pub const POSTGRES_USER_ENV: &str = "PINHOLE_POSTGRES_USER";
pub const POSTGRES_PASSWORD_ENV: &str = "PINHOLE_POSTGRES_PASSWORD";
pub const POSTGRES_DATABASE_ENV: &str = "PINHOLE_POSTGRES_DATABASE";
pub const POSTGRES_SSL_MODE_ENV: &str = "PINHOLE_POSTGRES_SSL_MODE";
pub const POSTGRES_POOL_MAX_CONNS_ENV: &str = "PINHOLE_POSTGRES_POOL_MAX_CONNS";
pub const POSTGRES_POOL_MAX_CONN_LIFETIME_ENV: &str =
    "PINHOLE_POSTGRES_POOL_MAX_CONN_LIFETIME_SECS";
pub const POSTGRES_POOL_MAX_CONN_IDLE_ENV: &str = "PINHOLE_POSTGRES_POOL_MAX_CONN_IDLE_SECS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "postgres")]
    Postgres,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
            StorageBackendArg::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pinhole-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Bearer token required on the mutating endpoints.
    #[arg(long, env = AUTH_TOKEN_ENV)]
    pub auth_token: String,

    /// Length of generated aliases.
    #[arg(long, env = ALIAS_LENGTH_ENV, default_value_t = 6)]
    pub alias_length: usize,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = SQLITE_PATH_ENV, default_value = "pinhole.db")]
    pub sqlite_path: String,

    #[arg(long, env = POSTGRES_HOST_ENV, required_if_eq("storage", "postgres"))]
    pub postgres_host: Option<String>,

    #[arg(long, env = POSTGRES_PORT_ENV, default_value_t = 5432)]
    pub postgres_port: u16,

    #[arg(long, env = POSTGRES_USER_ENV, required_if_eq("storage", "postgres"))]
    pub postgres_user: Option<String>,

    #[arg(long, env = POSTGRES_PASSWORD_ENV, required_if_eq("storage", "postgres"))]
    pub postgres_password: Option<String>,

    #[arg(long, env = POSTGRES_DATABASE_ENV, required_if_eq("storage", "postgres"))]
    pub postgres_database: Option<String>,

    #[arg(long, env = POSTGRES_SSL_MODE_ENV, default_value = "disable")]
    pub postgres_ssl_mode: PgSslMode,

    #[arg(long, env = POSTGRES_POOL_MAX_CONNS_ENV, default_value_t = 5)]
    pub postgres_pool_max_conns: u32,

    #[arg(long, env = POSTGRES_POOL_MAX_CONN_LIFETIME_ENV, default_value_t = 180)]
    pub postgres_pool_max_conn_lifetime_secs: u64,

    #[arg(long, env = POSTGRES_POOL_MAX_CONN_IDLE_ENV, default_value_t = 100)]
    pub postgres_pool_max_conn_idle_secs: u64,
}

impl Cli {
    /// Assembles the storage selection from the backend-specific flags.
    pub fn storage_config(&self) -> anyhow::Result<StorageConfig> {
        match self.storage {
            StorageBackendArg::Sqlite => Ok(StorageConfig::Sqlite(SqliteConfig {
                path: self.sqlite_path.clone(),
            })),
            StorageBackendArg::Postgres => {
                let host = self
                    .postgres_host
                    .clone()
                    .context("postgres host is required")?;
                let user = self
                    .postgres_user
                    .clone()
                    .context("postgres user is required")?;
                let password = self
                    .postgres_password
                    .clone()
                    .context("postgres password is required")?;
                let database = self
                    .postgres_database
                    .clone()
                    .context("postgres database is required")?;

                Ok(StorageConfig::Postgres(
                    PostgresConfig::builder()
                        .host(host)
                        .port(self.postgres_port)
                        .user(user)
                        .password(password)
                        .database(database)
                        .ssl_mode(self.postgres_ssl_mode)
                        .pool_max_conns(self.postgres_pool_max_conns)
                        .pool_max_conn_lifetime(Duration::from_secs(
                            self.postgres_pool_max_conn_lifetime_secs,
                        ))
                        .pool_max_conn_idle_time(Duration::from_secs(
                            self.postgres_pool_max_conn_idle_secs,
                        ))
                        .build(),
                ))
            }
        }
    }
}
