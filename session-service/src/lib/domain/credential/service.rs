use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::Digest;
use crate::domain::credential::models::NewCredential;
use crate::domain::credential::models::RegisterCommand;
use crate::domain::credential::models::UserId;
use crate::domain::credential::models::VerifyCommand;
use crate::domain::credential::ports::CredentialRepository;
use crate::domain::credential::ports::CredentialServicePort;

/// Compared against when no credential matches, so an unknown email costs the
/// same digest and comparison work as a wrong password.
pub(crate) const UNKNOWN_EMAIL_PASSWORD_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Domain service implementation for credential operations.
///
/// Owns the mapping from secret material to user id.
pub struct CredentialService<CR>
where
    CR: CredentialRepository,
{
    repository: Arc<CR>,
    authenticator: Authenticator,
}

impl<CR> CredentialService<CR>
where
    CR: CredentialRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    ///
    /// # Returns
    /// Configured credential service instance
    pub fn new(repository: Arc<CR>) -> Self {
        Self {
            repository,
            authenticator: Authenticator::new(),
        }
    }
}

#[async_trait]
impl<CR> CredentialServicePort for CredentialService<CR>
where
    CR: CredentialRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserId, CredentialError> {
        let digests = self
            .authenticator
            .credential_digests(&command.email, &command.password);
        let credential = NewCredential {
            email_hash: Digest::new(digests.email_hash)?,
            password_hash: Digest::new(digests.password_hash)?,
        };

        tracing::debug!(
            email_hash = credential.email_hash.log_prefix(),
            "Registering credential"
        );

        let created = self.repository.create(credential).await?;

        tracing::info!(user_id = %created.id, "Registered user");
        Ok(created.id)
    }

    async fn verify(&self, command: VerifyCommand) -> Result<Credential, CredentialError> {
        let email_hash = Digest::new(self.authenticator.email_digest(&command.email))?;

        let Some(credential) = self.repository.find_by_email_hash(&email_hash).await? else {
            self.authenticator.verify_password(&command.password, UNKNOWN_EMAIL_PASSWORD_HASH);
            return Err(CredentialError::NotFound(email_hash.log_prefix().to_string()));
        };

        if !self
            .authenticator
            .verify_password(&command.password, credential.password_hash.as_str())
        {
            return Err(CredentialError::Mismatch(credential.id.to_string()));
        }

        tracing::debug!(user_id = %credential.id, "Credential verified");
        Ok(credential)
    }
}
