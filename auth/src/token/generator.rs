use rand::rngs::OsRng;
use rand::RngCore;

use crate::digest::Sha256Hasher;

/// Opaque bearer token generator.
///
/// Draws a 63-bit value from the operating system CSPRNG and digests its
/// decimal rendering, so every token is 64 hex characters regardless of the
/// drawn value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenGenerator {
    hasher: Sha256Hasher,
}

impl TokenGenerator {
    /// Create a new token generator.
    ///
    /// # Returns
    /// TokenGenerator backed by `OsRng`
    pub fn new() -> Self {
        Self {
            hasher: Sha256Hasher::new(),
        }
    }

    /// Generate a fresh opaque token.
    ///
    /// # Returns
    /// Hex-encoded SHA-256 digest of a random non-negative 63-bit integer
    pub fn generate(&self) -> String {
        let seed = OsRng.next_u64() >> 1;
        self.hasher.digest_hex(seed.to_string().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DIGEST_HEX_LEN;

    #[test]
    fn test_generate_shape() {
        let generator = TokenGenerator::new();
        let token = generator.generate();

        assert_eq!(token.len(), DIGEST_HEX_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(token, token.to_lowercase());
    }

    #[test]
    fn test_generate_is_unpredictable() {
        let generator = TokenGenerator::new();

        let first = generator.generate();
        let second = generator.generate();
        assert_ne!(first, second);
    }
}
