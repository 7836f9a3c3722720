use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::credential::models::UserId;
use crate::domain::token::errors::TokenError;
use crate::domain::token::models::AccessToken;
use crate::domain::token::models::IssuedToken;
use crate::domain::token::models::SessionToken;
use crate::domain::token::models::TokenStatus;

/// Port for token issuing and introspection.
#[async_trait]
pub trait TokenServicePort: Send + Sync + 'static {
    /// Issue a token with the configured time-to-live.
    ///
    /// # Arguments
    /// * `user_id` - Owner of the new token
    ///
    /// # Returns
    /// Issued token with its expiry
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn issue(&self, user_id: UserId) -> Result<IssuedToken, TokenError>;

    /// Issue a token with an explicit time-to-live.
    ///
    /// # Arguments
    /// * `user_id` - Owner of the new token
    /// * `ttl` - Lifetime of the token, must be positive
    ///
    /// # Returns
    /// Issued token with its expiry
    ///
    /// # Errors
    /// * `InvalidTtl` - Non-positive lifetime
    /// * `Storage` - Store operation failed
    async fn issue_with_ttl(
        &self,
        user_id: UserId,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError>;

    /// Resolve a token to its live record.
    ///
    /// # Arguments
    /// * `token` - Token as presented by the caller
    ///
    /// # Returns
    /// Live session token record
    ///
    /// # Errors
    /// * `NotFound` - Unknown token
    /// * `Expired` - Token past its expiry
    /// * `Storage` - Store operation failed
    async fn lookup(&self, token: &AccessToken) -> Result<SessionToken, TokenError>;

    /// Judge whether a token is currently active.
    ///
    /// Never mutates storage; expired records stay until purged.
    async fn validate(&self, token: &AccessToken) -> TokenStatus;

    /// Delete records whose expiry has passed.
    ///
    /// # Returns
    /// Number of records removed
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn purge_expired(&self) -> Result<u64, TokenError>;
}

/// Persistence operations for session tokens.
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// Persist a new token record.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed or timed out
    async fn create(&self, token: SessionToken) -> Result<SessionToken, TokenError>;

    /// Retrieve a token record; the latest expiry wins if the value repeats.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed or timed out
    async fn find(&self, token: &AccessToken) -> Result<Option<SessionToken>, TokenError>;

    /// Remove records with an expiry strictly before `now`.
    ///
    /// # Returns
    /// Number of records removed
    ///
    /// # Errors
    /// * `Storage` - Store operation failed or timed out
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, TokenError>;
}
