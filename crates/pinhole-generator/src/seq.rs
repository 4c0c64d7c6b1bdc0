use crate::Generator;
use pinhole_core::Alias;
use std::sync::atomic::{AtomicU64, Ordering};

/// A sequential alias generator for deterministic tests and tooling.
///
/// Produces codes like "pin000000", "pin000001", etc. Uniqueness holds
/// within a single instance; it makes no claim across instances.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    /// Creates a new sequential generator with the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            counter: AtomicU64::new(0),
            prefix: prefix.into(),
        }
    }

    /// Creates a new sequential generator starting from a specific counter
    /// value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = Alias;

    fn generate(&self) -> Alias {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        Alias::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}
