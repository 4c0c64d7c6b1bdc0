//! Core types and traits for the Pinhole URL shortener.
//!
//! This crate provides the shared vocabulary used by the storage backends,
//! the shortener service, and the HTTP gateway.

pub mod alias;
pub mod error;
pub mod repository;

pub use alias::Alias;
pub use error::{CoreError, StorageError};
pub use repository::{Repository, UrlMapping};
