//! Alias generation for the Pinhole URL shortener.

pub mod random;
pub mod seq;

use pinhole_core::Alias;

pub use random::{RandomGenerator, DEFAULT_ALIAS_LENGTH};
pub use seq::SeqGenerator;

/// Trait for generating aliases.
///
/// Implementations are pure generators that don't interact with storage.
/// No uniqueness guarantee is made here; collisions are arbitrated
/// downstream by the store's unique constraint on the alias column.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<Alias>;

    /// Generates a value that can be converted into an alias.
    fn generate(&self) -> Self::Output;
}
