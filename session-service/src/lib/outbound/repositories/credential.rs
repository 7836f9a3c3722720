use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use super::bounded;
use super::QueryError;
use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::Digest;
use crate::domain::credential::models::NewCredential;
use crate::domain::credential::models::UserId;
use crate::domain::credential::ports::CredentialRepository;

const EMAIL_HASH_CONSTRAINT: &str = "credentials_email_hash_key";

pub struct PostgresCredentialRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn create(&self, credential: NewCredential) -> Result<Credential, CredentialError> {
        let row = bounded(
            "insert credential",
            self.statement_timeout,
            sqlx::query(
                r#"
                INSERT INTO credentials (email_hash, password_hash)
                VALUES ($1, $2)
                RETURNING id
                "#,
            )
            .bind(credential.email_hash.as_str())
            .bind(credential.password_hash.as_str())
            .fetch_one(&self.pool),
        )
        .await
        .map_err(|e| {
            if let QueryError::Database(err) = &e {
                if let Some(db_err) = err.as_database_error() {
                    if db_err.is_unique_violation()
                        && db_err.constraint() == Some(EMAIL_HASH_CONSTRAINT)
                    {
                        return CredentialError::AlreadyRegistered(
                            credential.email_hash.log_prefix().to_string(),
                        );
                    }
                }
            }
            CredentialError::Storage(e.to_string())
        })?;

        Ok(Credential {
            id: UserId(row.get("id")),
            email_hash: credential.email_hash,
            password_hash: credential.password_hash,
        })
    }

    async fn find_by_email_hash(
        &self,
        email_hash: &Digest,
    ) -> Result<Option<Credential>, CredentialError> {
        let row = bounded(
            "select credential",
            self.statement_timeout,
            sqlx::query(
                r#"
                SELECT id, email_hash, password_hash
                FROM credentials
                WHERE email_hash = $1
                "#,
            )
            .bind(email_hash.as_str())
            .fetch_optional(&self.pool),
        )
        .await
        .map_err(|e| CredentialError::Storage(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Credential {
                id: UserId(r.get("id")),
                email_hash: Digest::new(r.get("email_hash"))?,
                password_hash: Digest::new(r.get("password_hash"))?,
            })),
            None => Ok(None),
        }
    }
}
