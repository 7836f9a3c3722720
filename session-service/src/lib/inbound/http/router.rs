use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::any;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::introspect::introspect;
use super::handlers::register::register;
use super::handlers::unsupported_method;
use crate::domain::credential::ports::CredentialServicePort;
use crate::domain::token::ports::TokenServicePort;

#[derive(Clone)]
pub struct AppState {
    pub credential_service: Arc<dyn CredentialServicePort>,
    pub token_service: Arc<dyn TokenServicePort>,
    pub return_issued_token: bool,
}

pub fn create_router(
    credential_service: Arc<dyn CredentialServicePort>,
    token_service: Arc<dyn TokenServicePort>,
    return_issued_token: bool,
) -> Router {
    let state = AppState {
        credential_service,
        token_service,
        return_issued_token,
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
            tracing::info!(
                status = response.status().as_u16(),
                latency_ms = latency.as_millis(),
                "Request completed"
            );
        });

    Router::new()
        .route("/register", post(register).fallback(unsupported_method))
        .route("/auth", post(authenticate).fallback(unsupported_method))
        .route("/introspect", any(introspect))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use chrono::Duration;
    use mockall::mock;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::credential::errors::CredentialError;
    use crate::domain::credential::models::Credential;
    use crate::domain::credential::models::RegisterCommand;
    use crate::domain::credential::models::UserId;
    use crate::domain::credential::models::VerifyCommand;
    use crate::domain::token::errors::TokenError;
    use crate::domain::token::models::AccessToken;
    use crate::domain::token::models::IssuedToken;
    use crate::domain::token::models::SessionToken;
    use crate::domain::token::models::TokenStatus;

    mock! {
        pub CredentialPort {}

        #[async_trait]
        impl CredentialServicePort for CredentialPort {
            async fn register(&self, command: RegisterCommand) -> Result<UserId, CredentialError>;
            async fn verify(&self, command: VerifyCommand) -> Result<Credential, CredentialError>;
        }
    }

    mock! {
        pub TokenPort {}

        #[async_trait]
        impl TokenServicePort for TokenPort {
            async fn issue(&self, user_id: UserId) -> Result<IssuedToken, TokenError>;
            async fn issue_with_ttl(&self, user_id: UserId, ttl: Duration) -> Result<IssuedToken, TokenError>;
            async fn lookup(&self, token: &AccessToken) -> Result<SessionToken, TokenError>;
            async fn validate(&self, token: &AccessToken) -> TokenStatus;
            async fn purge_expired(&self) -> Result<u64, TokenError>;
        }
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_non_post_is_rejected_without_touching_services() {
        let router = create_router(
            Arc::new(MockCredentialPort::new()),
            Arc::new(MockTokenPort::new()),
            false,
        );

        for (method, uri) in [("GET", "/register?registry_type=user"), ("PUT", "/auth")] {
            let response = router
                .clone()
                .oneshot(request(method, uri, "{}"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_introspect_routes_any_method_to_validation() {
        let mut tokens = MockTokenPort::new();
        tokens
            .expect_validate()
            .times(2)
            .returning(|_| TokenStatus::Active);

        let router = create_router(
            Arc::new(MockCredentialPort::new()),
            Arc::new(tokens),
            false,
        );

        for method in ["POST", "DELETE"] {
            let response = router
                .clone()
                .oneshot(request(method, "/introspect", r#"{"token":"abc"}"#))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
