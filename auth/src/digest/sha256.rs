use sha2::Digest;
use sha2::Sha256;

/// Length of a raw SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// One-way digest for credential secrets.
///
/// Deterministic SHA-256 over the raw bytes. Used for emails, passwords
/// and for reducing random token material to a fixed width.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    /// Create a new hasher instance.
    ///
    /// # Returns
    /// Sha256Hasher instance
    pub fn new() -> Self {
        Self
    }

    /// Digest a secret.
    ///
    /// # Arguments
    /// * `secret` - Raw bytes to digest
    ///
    /// # Returns
    /// 32-byte SHA-256 digest
    pub fn digest(&self, secret: &[u8]) -> [u8; DIGEST_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(secret);
        hasher.finalize().into()
    }

    /// Digest a secret and render it as lowercase hex.
    ///
    /// # Arguments
    /// * `secret` - Raw bytes to digest
    ///
    /// # Returns
    /// 64-character hex string
    pub fn digest_hex(&self, secret: &[u8]) -> String {
        hex::encode(self.digest(secret))
    }
}

/// Compare two byte strings without short-circuiting on the first difference.
///
/// Inputs of different lengths compare unequal immediately; the length of a
/// hex digest is not secret.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let hasher = Sha256Hasher::new();

        assert_eq!(hasher.digest(b"root"), hasher.digest(b"root"));
        assert_ne!(hasher.digest(b"root"), hasher.digest(b"dev"));
    }

    #[test]
    fn test_digest_hex_known_vector() {
        let hasher = Sha256Hasher::new();

        assert_eq!(
            hasher.digest_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hasher.digest_hex(b"").len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"short", b"longer"));
        assert!(constant_time_eq(b"", b""));
    }
}
