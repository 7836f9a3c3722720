use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;

use crate::domain::clock::Clock;
use crate::domain::credential::models::UserId;
use crate::domain::token::errors::TokenError;
use crate::domain::token::models::AccessToken;
use crate::domain::token::models::IssuedToken;
use crate::domain::token::models::SessionToken;
use crate::domain::token::models::TokenStatus;
use crate::domain::token::ports::TokenRepository;
use crate::domain::token::ports::TokenServicePort;

/// Lifetime of tokens issued on authentication.
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 300;

/// Domain service implementation for token operations.
///
/// Sole owner of the expiry computation and the liveness rule.
pub struct TokenService<TR, C>
where
    TR: TokenRepository,
    C: Clock,
{
    repository: Arc<TR>,
    clock: Arc<C>,
    authenticator: Authenticator,
    ttl: Duration,
}

impl<TR, C> TokenService<TR, C>
where
    TR: TokenRepository,
    C: Clock,
{
    /// Create a new token service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Token persistence implementation
    /// * `clock` - Time source for expiry and liveness
    /// * `ttl` - Lifetime of tokens issued by `issue`
    ///
    /// # Returns
    /// Configured token service instance
    pub fn new(repository: Arc<TR>, clock: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            clock,
            authenticator: Authenticator::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[async_trait]
impl<TR, C> TokenServicePort for TokenService<TR, C>
where
    TR: TokenRepository,
    C: Clock,
{
    async fn issue(&self, user_id: UserId) -> Result<IssuedToken, TokenError> {
        self.issue_with_ttl(user_id, self.ttl).await
    }

    async fn issue_with_ttl(
        &self,
        user_id: UserId,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        if ttl.num_seconds() <= 0 {
            return Err(TokenError::InvalidTtl(ttl.num_seconds()));
        }

        let token = AccessToken::new(self.authenticator.mint_token());
        let session = SessionToken::new(token, user_id, self.clock.now(), ttl)?;
        let session = self.repository.create(session).await?;

        tracing::info!(
            user_id = %session.user_id,
            token = session.token.log_prefix(),
            expiry_epoch = session.expiry_epoch(),
            "Issued session token"
        );

        Ok(IssuedToken::from((session, ttl)))
    }

    async fn lookup(&self, token: &AccessToken) -> Result<SessionToken, TokenError> {
        let session = self
            .repository
            .find(token)
            .await?
            .ok_or_else(|| TokenError::NotFound(token.log_prefix().to_string()))?;

        let now = self.clock.now();
        if !session.is_active_at(now) {
            return Err(TokenError::Expired {
                expired_at: session.expires_at,
            });
        }

        Ok(session)
    }

    async fn validate(&self, token: &AccessToken) -> TokenStatus {
        match self.lookup(token).await {
            Ok(session) => {
                tracing::debug!(
                    user_id = %session.user_id,
                    token = token.log_prefix(),
                    "Token active"
                );
                TokenStatus::Active
            }
            Err(e) => {
                tracing::info!(token = token.log_prefix(), error = %e, "Token inactive");
                TokenStatus::Inactive
            }
        }
    }

    async fn purge_expired(&self) -> Result<u64, TokenError> {
        let removed = self.repository.delete_expired(self.clock.now()).await?;
        if removed > 0 {
            tracing::debug!(removed, "Purged expired session tokens");
        }
        Ok(removed)
    }
}
