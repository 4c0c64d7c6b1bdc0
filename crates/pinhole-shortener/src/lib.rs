//! Shortening service for Pinhole.
//!
//! Ties a repository and an alias generator together behind the operations
//! the HTTP layer consumes.

pub mod error;
pub mod service;

pub use error::ShortenerError;
pub use service::{CreatedUrl, ShortenerService};
