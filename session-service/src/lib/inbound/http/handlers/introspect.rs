use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BodyRejection;
use super::IntrospectionBody;
use super::JsonBody;
use crate::domain::token::models::AccessToken;
use crate::domain::token::models::TokenStatus;
use crate::inbound::http::router::AppState;

pub async fn introspect(
    State(state): State<AppState>,
    body: Result<JsonBody<IntrospectRequestBody>, BodyRejection>,
) -> Result<ApiSuccess<IntrospectionBody>, ApiError> {
    let JsonBody(body) = body.map_err(|e| ApiError::Inactive(e.to_string()))?;
    let token = AccessToken::new(body.token);

    match state.token_service.validate(&token).await {
        TokenStatus::Active => Ok(ApiSuccess::new(
            StatusCode::OK,
            IntrospectionBody { active: true },
        )),
        TokenStatus::Inactive => Err(ApiError::Inactive(format!(
            "Token {}... is not active",
            token.log_prefix()
        ))),
    }
}

/// HTTP request body for introspection (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IntrospectRequestBody {
    token: String,
}
