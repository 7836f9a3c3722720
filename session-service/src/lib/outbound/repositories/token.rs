use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Row;

use super::bounded;
use crate::domain::token::errors::TokenError;
use crate::domain::token::models::AccessToken;
use crate::domain::token::models::SessionToken;
use crate::domain::token::ports::TokenRepository;

pub struct PostgresTokenRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PostgresTokenRepository {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn create(&self, token: SessionToken) -> Result<SessionToken, TokenError> {
        bounded(
            "insert session token",
            self.statement_timeout,
            sqlx::query(
                r#"
                INSERT INTO session_tokens (token, user_id, expiry_epoch)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(token.token.as_str())
            .bind(token.user_id.as_i64())
            .bind(token.expiry_epoch())
            .execute(&self.pool),
        )
        .await
        .map_err(|e| TokenError::Storage(e.to_string()))?;

        Ok(token)
    }

    async fn find(&self, token: &AccessToken) -> Result<Option<SessionToken>, TokenError> {
        let row = bounded(
            "select session token",
            self.statement_timeout,
            sqlx::query(
                r#"
                SELECT token, user_id, expiry_epoch
                FROM session_tokens
                WHERE token = $1
                ORDER BY expiry_epoch DESC
                LIMIT 1
                "#,
            )
            .bind(token.as_str())
            .fetch_optional(&self.pool),
        )
        .await
        .map_err(|e| TokenError::Storage(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(SessionToken::from_parts(
                r.get("token"),
                r.get("user_id"),
                r.get("expiry_epoch"),
            )?)),
            None => Ok(None),
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, TokenError> {
        let result = bounded(
            "delete expired session tokens",
            self.statement_timeout,
            sqlx::query(
                r#"
                DELETE FROM session_tokens
                WHERE expiry_epoch < $1
                "#,
            )
            .bind(now.timestamp())
            .execute(&self.pool),
        )
        .await
        .map_err(|e| TokenError::Storage(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
