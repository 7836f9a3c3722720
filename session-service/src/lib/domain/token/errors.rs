use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

/// Top-level error for all token-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token not found (prefix {0})")]
    NotFound(String),

    #[error("Token expired at {expired_at}")]
    Expired { expired_at: DateTime<Utc> },

    #[error("Invalid time-to-live: {0} seconds")]
    InvalidTtl(i64),

    #[error("Invalid expiry timestamp: {0}")]
    InvalidExpiry(i64),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),
}
