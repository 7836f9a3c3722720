use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::credential::models::UserId;
use crate::domain::token::errors::TokenError;

/// Number of token characters that may appear in logs.
pub const TOKEN_LOG_PREFIX: usize = 8;

/// Opaque bearer token value
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix safe to put in logs.
    pub fn log_prefix(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(TOKEN_LOG_PREFIX)
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({}...)", self.log_prefix())
    }
}

/// Persisted session token record.
///
/// Expiry has whole-second precision, matching its storage as a Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub token: AccessToken,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// Build a record expiring `ttl` after `now`, truncated to the second.
    ///
    /// # Errors
    /// * `InvalidExpiry` - Resulting timestamp is out of range
    pub fn new(
        token: AccessToken,
        user_id: UserId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expiry_epoch = now.timestamp().saturating_add(ttl.num_seconds());
        Ok(Self {
            token,
            user_id,
            expires_at: from_epoch(expiry_epoch)?,
        })
    }

    /// Rebuild a record from its stored columns.
    ///
    /// # Errors
    /// * `InvalidExpiry` - Stored epoch is out of range
    pub fn from_parts(
        token: String,
        user_id: i64,
        expiry_epoch: i64,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            token: AccessToken::new(token),
            user_id: UserId(user_id),
            expires_at: from_epoch(expiry_epoch)?,
        })
    }

    pub fn expiry_epoch(&self) -> i64 {
        self.expires_at.timestamp()
    }

    /// A token is honored while `now <= expiry`, compared in whole seconds.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() <= self.expiry_epoch()
    }
}

fn from_epoch(epoch: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(epoch, 0).ok_or(TokenError::InvalidExpiry(epoch))
}

/// Outcome of an introspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Active,
    Inactive,
}

impl TokenStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, TokenStatus::Active)
    }
}

/// Freshly issued token handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: AccessToken,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub expires_in: Duration,
}

impl From<(SessionToken, Duration)> for IssuedToken {
    fn from((session, ttl): (SessionToken, Duration)) -> Self {
        Self {
            token: session.token,
            user_id: session.user_id,
            expires_at: session.expires_at,
            expires_in: ttl,
        }
    }
}
