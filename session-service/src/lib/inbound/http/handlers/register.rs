use std::str::FromStr;

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BodyRejection;
use super::CredentialRequestBody;
use super::JsonBody;
use super::MessageBody;
use crate::domain::credential::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    query: Result<Query<RegisterQuery>, QueryRejection>,
    body: Result<JsonBody<CredentialRequestBody>, BodyRejection>,
) -> Result<ApiSuccess<MessageBody>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::BadRequest(format!("Unknown query params: {}", e)))?;

    match query.registry_type()? {
        RegistryType::User => {}
        RegistryType::Service => {
            return Err(ApiError::BadRequest("Service registration is not supported".to_string()));
        }
    }

    let JsonBody(body) = body?;
    let (email, password) = body.into_parts();

    state
        .credential_service
        .register(RegisterCommand::new(email, password))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageBody::success()))
}

/// Query string of a registration request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterQuery {
    registry_type: Option<String>,
}

impl RegisterQuery {
    fn registry_type(&self) -> Result<RegistryType, ApiError> {
        let value = self
            .registry_type
            .as_deref()
            .ok_or_else(|| ApiError::BadRequest("Missing registry_type".to_string()))?;
        value.parse()
    }
}

/// Subject kind a registration creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryType {
    User,
    Service,
}

impl FromStr for RegistryType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(RegistryType::User),
            "service" => Ok(RegistryType::Service),
            other => Err(ApiError::BadRequest(format!(
                "Bad registry_type: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_type_parsing() {
        assert_eq!("user".parse::<RegistryType>(), Ok(RegistryType::User));
        assert_eq!("service".parse::<RegistryType>(), Ok(RegistryType::Service));
        assert!("User".parse::<RegistryType>().is_err());
        assert!("".parse::<RegistryType>().is_err());
    }

    #[test]
    fn test_missing_registry_type() {
        let query = RegisterQuery {
            registry_type: None,
        };
        assert!(query.registry_type().is_err());
    }
}
