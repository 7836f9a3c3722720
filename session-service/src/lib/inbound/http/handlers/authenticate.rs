use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::BodyRejection;
use super::CredentialRequestBody;
use super::JsonBody;
use super::MessageBody;
use super::SUCCESS_MESSAGE;
use crate::domain::credential::models::VerifyCommand;
use crate::domain::token::models::IssuedToken;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    body: Result<JsonBody<CredentialRequestBody>, BodyRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let JsonBody(body) = body?;
    let (email, password) = body.into_parts();

    // Not-found and mismatch collapse into the same generic failure
    let credential = state
        .credential_service
        .verify(VerifyCommand::new(email, password))
        .await?;

    let issued = state.token_service.issue(credential.id).await?;

    let data = if state.return_issued_token {
        AuthenticateResponseData::Grant(TokenGrantBody::from(&issued))
    } else {
        AuthenticateResponseData::Message(MessageBody::success())
    };

    Ok(ApiSuccess::new(StatusCode::OK, data))
}

/// Body of a successful authentication.
///
/// The plain message is the default; the grant is only sent when the service
/// is configured to hand the issued token back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthenticateResponseData {
    Message(MessageBody),
    Grant(TokenGrantBody),
}

/// RFC 6749 section 5.1 style token response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenGrantBody {
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<&IssuedToken> for TokenGrantBody {
    fn from(issued: &IssuedToken) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            access_token: issued.token.as_str().to_string(),
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in.num_seconds(),
        }
    }
}
