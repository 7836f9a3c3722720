use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use session_service::domain::clock::Clock;
use session_service::domain::credential::errors::CredentialError;
use session_service::domain::credential::models::Credential;
use session_service::domain::credential::models::Digest;
use session_service::domain::credential::models::NewCredential;
use session_service::domain::credential::models::UserId;
use session_service::domain::credential::ports::CredentialRepository;
use session_service::domain::credential::service::CredentialService;
use session_service::domain::token::errors::TokenError;
use session_service::domain::token::models::AccessToken;
use session_service::domain::token::models::SessionToken;
use session_service::domain::token::ports::TokenRepository;
use session_service::domain::token::service::TokenService;
use session_service::domain::token::service::DEFAULT_TOKEN_TTL_SECONDS;
use session_service::inbound::http::router::create_router;

/// Fixed starting point of the test clock.
pub const START_EPOCH: i64 = 1_700_000_000;

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub clock: Arc<ManualClock>,
    pub tokens: Arc<InMemoryTokenRepository>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application with the default response contract
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    /// Spawn the application, optionally returning issued tokens from `/auth`
    pub async fn spawn_with(return_issued_token: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(ManualClock::at_epoch(START_EPOCH));
        let credentials = Arc::new(InMemoryCredentialRepository::default());
        let tokens = Arc::new(InMemoryTokenRepository::default());

        let credential_service = Arc::new(CredentialService::new(credentials));
        let token_service = Arc::new(TokenService::new(
            Arc::clone(&tokens),
            Arc::clone(&clock),
            Duration::seconds(DEFAULT_TOKEN_TTL_SECONDS),
        ));

        let router = create_router(credential_service, token_service, return_issued_token);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            clock,
            tokens,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}

/// Clock that only moves when told to
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at_epoch(epoch: i64) -> Self {
        Self {
            now: Mutex::new(DateTime::from_timestamp(epoch, 0).expect("valid epoch")),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Credential store with the same uniqueness rule as the Postgres schema
#[derive(Default)]
pub struct InMemoryCredentialRepository {
    records: Mutex<Vec<Credential>>,
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn create(&self, credential: NewCredential) -> Result<Credential, CredentialError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.email_hash == credential.email_hash) {
            return Err(CredentialError::AlreadyRegistered(
                credential.email_hash.log_prefix().to_string(),
            ));
        }

        let created = Credential {
            id: UserId(records.len() as i64 + 1),
            email_hash: credential.email_hash,
            password_hash: credential.password_hash,
        };
        records.push(created.clone());
        Ok(created)
    }

    async fn find_by_email_hash(
        &self,
        email_hash: &Digest,
    ) -> Result<Option<Credential>, CredentialError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| &r.email_hash == email_hash).cloned())
    }
}

/// Token store that keeps every record it is given
#[derive(Default)]
pub struct InMemoryTokenRepository {
    records: Mutex<Vec<SessionToken>>,
}

impl InMemoryTokenRepository {
    pub fn all(&self) -> Vec<SessionToken> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn create(&self, token: SessionToken) -> Result<SessionToken, TokenError> {
        self.records.lock().unwrap().push(token.clone());
        Ok(token)
    }

    async fn find(&self, token: &AccessToken) -> Result<Option<SessionToken>, TokenError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| &r.token == token)
            .max_by_key(|r| r.expires_at)
            .cloned())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, TokenError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.is_active_at(now));
        Ok((before - records.len()) as u64)
    }
}
