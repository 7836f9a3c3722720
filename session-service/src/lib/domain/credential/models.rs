use std::fmt;

use auth::digest::DIGEST_HEX_LEN;

use crate::domain::credential::errors::DigestError;

/// Number of digest characters that may appear in logs.
pub const DIGEST_LOG_PREFIX: usize = 6;

/// Stored credential record.
///
/// Identity is the email digest; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: UserId,
    pub email_hash: Digest,
    pub password_hash: Digest,
}

/// Store-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// Smallest id the store hands out.
    pub const FIRST: UserId = UserId(1);

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Hex-encoded SHA-256 digest value type
///
/// Ensures the value is exactly 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    /// Create a validated digest.
    ///
    /// # Arguments
    /// * `hex` - Hex string as produced by the hasher or read from storage
    ///
    /// # Returns
    /// Validated Digest value object
    ///
    /// # Errors
    /// * `InvalidLength` - Not 64 characters
    /// * `InvalidCharacters` - Contains characters other than lowercase hex
    pub fn new(hex: String) -> Result<Self, DigestError> {
        if hex.len() != DIGEST_HEX_LEN {
            return Err(DigestError::InvalidLength {
                expected: DIGEST_HEX_LEN,
                actual: hex.len(),
            });
        }
        if !hex
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(DigestError::InvalidCharacters);
        }
        Ok(Self(hex))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix safe to put in logs.
    pub fn log_prefix(&self) -> &str {
        &self.0[..DIGEST_LOG_PREFIX]
    }
}

/// Credential pair to persist, already digested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCredential {
    pub email_hash: Digest,
    pub password_hash: Digest,
}

/// Command to register a new user with plaintext secrets
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("email", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Command to check a submitted email/password pair
pub struct VerifyCommand {
    pub email: String,
    pub password: String,
}

impl VerifyCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for VerifyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyCommand")
            .field("email", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_accepts_hasher_output() {
        let hex = auth::Sha256Hasher::new().digest_hex(b"root");
        let digest = Digest::new(hex.clone()).unwrap();

        assert_eq!(digest.as_str(), hex);
        assert_eq!(digest.log_prefix().len(), DIGEST_LOG_PREFIX);
    }

    #[test]
    fn test_digest_rejects_bad_input() {
        assert_eq!(
            Digest::new("abc".to_string()),
            Err(DigestError::InvalidLength {
                expected: 64,
                actual: 3
            })
        );
        assert_eq!(
            Digest::new("Z".repeat(64)),
            Err(DigestError::InvalidCharacters)
        );
        assert_eq!(
            Digest::new("A".repeat(64)),
            Err(DigestError::InvalidCharacters)
        );
    }

    #[test]
    fn test_commands_redact_secrets() {
        let command = RegisterCommand::new("root".to_string(), "dev".to_string());
        let rendered = format!("{:?}", command);

        assert!(!rendered.contains("dev"));
        assert!(rendered.contains("<redacted>"));
    }
}
