use std::fmt;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::http::Method;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::credential::errors::CredentialError;
use crate::domain::token::errors::TokenError;

pub mod authenticate;
pub mod introspect;
pub mod register;

pub const SUCCESS_MESSAGE: &str = "Success!";
pub const FAILURE_MESSAGE: &str = "Failure";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Request failure.
///
/// The carried detail is logged and never sent to the caller; the response
/// body is the operation's generic failure shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Renders `{"message": "Failure"}`.
    BadRequest(String),
    /// Renders `{"active": false}`.
    Inactive(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(detail) => {
                tracing::warn!(detail = %detail, "Request failed");
                (StatusCode::BAD_REQUEST, Json(MessageBody::failure())).into_response()
            }
            ApiError::Inactive(detail) => {
                tracing::info!(detail = %detail, "Introspection inactive");
                (
                    StatusCode::BAD_REQUEST,
                    Json(IntrospectionBody { active: false }),
                )
                    .into_response()
            }
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<BodyRejection> for ApiError {
    fn from(rejection: BodyRejection) -> Self {
        ApiError::BadRequest(rejection.to_string())
    }
}

/// JSON request body decoded regardless of the request's `Content-Type`.
///
/// Only an unreadable or malformed body is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| BodyRejection(e.body_text()))?;
        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| BodyRejection(e.to_string()))
    }
}

/// Body that could not be read or decoded as the expected JSON shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRejection(String);

impl fmt::Display for BodyRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Undecodable body: {}", self.0)
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Fallback for methods a route does not accept.
pub async fn unsupported_method(method: Method) -> ApiError {
    ApiError::BadRequest(format!("Unsupported method {}", method))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn success() -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failure() -> Self {
        Self {
            message: FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntrospectionBody {
    pub active: bool,
}

/// HTTP request body carrying an email/password pair (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialRequestBody {
    email: String,
    password: String,
}

impl CredentialRequestBody {
    pub fn into_parts(self) -> (String, String) {
        (self.email, self.password)
    }
}

impl fmt::Debug for CredentialRequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRequestBody")
            .field("email", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}
