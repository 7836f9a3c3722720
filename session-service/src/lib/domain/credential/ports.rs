use async_trait::async_trait;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::Digest;
use crate::domain::credential::models::NewCredential;
use crate::domain::credential::models::RegisterCommand;
use crate::domain::credential::models::UserId;
use crate::domain::credential::models::VerifyCommand;

/// Port for credential domain service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new user from plaintext secrets.
    ///
    /// # Arguments
    /// * `command` - Email and password as submitted
    ///
    /// # Returns
    /// Store-assigned user id
    ///
    /// # Errors
    /// * `AlreadyRegistered` - Email digest already present
    /// * `Storage` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<UserId, CredentialError>;

    /// Check a submitted email/password pair against the store.
    ///
    /// # Arguments
    /// * `command` - Email and password as submitted
    ///
    /// # Returns
    /// Matching credential record
    ///
    /// # Errors
    /// * `NotFound` - No record for the email digest
    /// * `Mismatch` - Record found but password digest differs
    /// * `Storage` - Store operation failed
    async fn verify(&self, command: VerifyCommand) -> Result<Credential, CredentialError>;
}

/// Persistence operations for credential records.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Persist a new credential.
    ///
    /// # Arguments
    /// * `credential` - Digested email and password
    ///
    /// # Returns
    /// Stored record including its assigned id
    ///
    /// # Errors
    /// * `AlreadyRegistered` - Unique constraint on the email digest violated
    /// * `Storage` - Store operation failed or timed out
    async fn create(&self, credential: NewCredential) -> Result<Credential, CredentialError>;

    /// Retrieve a credential by email digest.
    ///
    /// # Arguments
    /// * `email_hash` - Digest of the email
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed or timed out
    async fn find_by_email_hash(
        &self,
        email_hash: &Digest,
    ) -> Result<Option<Credential>, CredentialError>;
}
