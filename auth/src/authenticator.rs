use crate::digest::constant_time_eq;
use crate::digest::Sha256Hasher;
use crate::token::TokenGenerator;

/// Authentication coordinator combining credential digests and token minting.
///
/// Provides the high-level primitives a credential store and a token issuer
/// need, without touching storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Authenticator {
    hasher: Sha256Hasher,
    token_generator: TokenGenerator,
}

/// Hex digests of a submitted email/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialDigests {
    pub email_hash: String,
    pub password_hash: String,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new() -> Self {
        Self {
            hasher: Sha256Hasher::new(),
            token_generator: TokenGenerator::new(),
        }
    }

    /// Digest an email address for lookup.
    ///
    /// # Arguments
    /// * `email` - Plaintext email as submitted
    ///
    /// # Returns
    /// Hex-encoded digest
    pub fn email_digest(&self, email: &str) -> String {
        self.hasher.digest_hex(email.as_bytes())
    }

    /// Digest a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Hex-encoded digest
    pub fn password_digest(&self, password: &str) -> String {
        self.hasher.digest_hex(password.as_bytes())
    }

    /// Digest both halves of a credential pair.
    ///
    /// # Arguments
    /// * `email` - Plaintext email
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// CredentialDigests with both hex digests
    pub fn credential_digests(&self, email: &str, password: &str) -> CredentialDigests {
        CredentialDigests {
            email_hash: self.email_digest(email),
            password_hash: self.password_digest(password),
        }
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// The comparison does not exit early on the first differing byte.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored hex digest
    ///
    /// # Returns
    /// True if the password digests to `stored_hash`
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        let attempt = self.password_digest(password);
        constant_time_eq(attempt.as_bytes(), stored_hash.as_bytes())
    }

    /// Mint a new opaque session token.
    ///
    /// # Returns
    /// 64-character hex token
    pub fn mint_token(&self) -> String {
        self.token_generator.generate()
    }
}
