use thiserror::Error;

/// Error for Digest parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DigestError {
    #[error("Invalid digest length: expected {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Digest contains non-hex characters")]
    InvalidCharacters,
}

/// Top-level error for all credential-related operations
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("Invalid digest: {0}")]
    InvalidDigest(#[from] DigestError),

    // Domain-level errors
    #[error("Email already registered (digest {0}...)")]
    AlreadyRegistered(String),

    #[error("No credential for email (digest {0}...)")]
    NotFound(String),

    #[error("Password mismatch for user {0}")]
    Mismatch(String),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),
}
