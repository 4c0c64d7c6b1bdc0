//! Storage backends for the Pinhole URL shortener.
//!
//! Two interchangeable SQL backends implement the repository contract from
//! `pinhole_core`, plus an in-memory backend for tests. The active backend
//! is selected once at startup from [`StorageConfig`] and is immutable for
//! the process lifetime.

pub mod backend;
mod convert;
pub mod memory;
pub mod postgres;
pub mod sqlite;

pub use backend::{AnyRepository, SqliteConfig, StorageConfig};
pub use memory::InMemoryRepository;
pub use postgres::{PgSslMode, PostgresConfig, PostgresRepository};
pub use sqlite::SqliteRepository;
