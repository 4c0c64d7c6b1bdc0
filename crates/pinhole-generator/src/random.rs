use crate::Generator;
use pinhole_core::Alias;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Alias length used by the service when the caller does not configure one.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Generates fixed-length aliases drawn uniformly from `[A-Za-z0-9]`.
///
/// Each character is sampled independently, so two calls can collide; the
/// caller is expected to treat a storage conflict as "draw again".
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing aliases of exactly `length` characters.
    ///
    /// A zero length yields an empty alias on every call.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ALIAS_LENGTH)
    }
}

impl Generator for RandomGenerator {
    type Output = Alias;

    fn generate(&self) -> Alias {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();
        Alias::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    #[test]
    fn output_has_requested_length() {
        for size in [1, 5, 6, 10, 20, 30] {
            let generator = RandomGenerator::new(size);
            assert_eq!(generator.generate().as_str().len(), size);
        }
    }

    #[test]
    fn output_stays_within_alphabet() {
        let generator = RandomGenerator::new(30);
        for _ in 0..100 {
            let alias = generator.generate();
            for c in alias.as_str().chars() {
                assert!(ALPHABET.contains(c), "character {c:?} outside the alphabet");
            }
        }
    }

    #[test]
    fn zero_length_yields_empty_alias() {
        let generator = RandomGenerator::new(0);
        assert_eq!(generator.generate().as_str(), "");
    }

    #[test]
    fn consecutive_aliases_differ() {
        // 62^20 outcomes; a collision here means a broken RNG.
        let generator = RandomGenerator::new(20);
        assert_ne!(generator.generate().as_str(), generator.generate().as_str());
    }

    #[test]
    fn default_length_is_six() {
        let generator = RandomGenerator::default();
        assert_eq!(generator.generate().as_str().len(), 6);
    }
}
