use std::sync::Arc;

use session_service::config::Config;
use session_service::config::DemoConfig;
use session_service::domain::clock::SystemClock;
use session_service::domain::credential::errors::CredentialError;
use session_service::domain::credential::models::RegisterCommand;
use session_service::domain::credential::models::VerifyCommand;
use session_service::domain::credential::ports::CredentialServicePort;
use session_service::domain::credential::service::CredentialService;
use session_service::domain::token::ports::TokenServicePort;
use session_service::domain::token::service::TokenService;
use session_service::inbound::http::router::create_router;
use session_service::outbound::repositories::schema;
use session_service::outbound::repositories::PostgresCredentialRepository;
use session_service::outbound::repositories::PostgresTokenRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "session-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_seconds = config.token.ttl_seconds,
        sweep_interval_seconds = config.token.sweep_interval_seconds,
        demo = config.demo.enabled,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.statement_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    schema::create_tables(&pg_pool).await?;

    let statement_timeout = config.database.statement_timeout();
    let credential_repository = Arc::new(PostgresCredentialRepository::new(
        pg_pool.clone(),
        statement_timeout,
    ));
    let token_repository = Arc::new(PostgresTokenRepository::new(
        pg_pool.clone(),
        statement_timeout,
    ));

    let credential_service = Arc::new(CredentialService::new(credential_repository));
    let token_service = Arc::new(TokenService::new(
        token_repository,
        Arc::new(SystemClock),
        config.token.ttl(),
    ));

    if config.demo.enabled {
        seed_demo(&config.demo, credential_service.as_ref(), token_service.as_ref()).await?;
    }

    if let Some(interval) = config.token.sweep_interval() {
        let sweeper = Arc::clone(&token_service);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if let Err(e) = sweeper.purge_expired().await {
                    tracing::warn!(error = %e, "Expired token sweep failed");
                }
            }
        });
        tracing::info!(
            interval_seconds = interval.as_secs(),
            "Expired token sweep scheduled"
        );
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        credential_service,
        token_service,
        config.token.return_on_auth,
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Http server stopped");

    if config.database.drop_tables_on_shutdown {
        if let Err(e) = schema::drop_tables(&pg_pool).await {
            tracing::error!(error = %e, "Failed to drop tables on shutdown");
        }
    }

    pg_pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Register the demo credential and mint a long-lived token for it.
async fn seed_demo(
    demo: &DemoConfig,
    credentials: &dyn CredentialServicePort,
    tokens: &dyn TokenServicePort,
) -> Result<(), anyhow::Error> {
    tracing::info!("Starting in demo mode");

    match credentials
        .register(RegisterCommand::new(demo.email.clone(), demo.password.clone()))
        .await
    {
        Ok(user_id) => tracing::info!(user_id = %user_id, "Demo user registered"),
        Err(CredentialError::AlreadyRegistered(_)) => {
            tracing::info!("Demo user already registered")
        }
        Err(e) => return Err(e.into()),
    }

    let credential = credentials
        .verify(VerifyCommand::new(demo.email.clone(), demo.password.clone()))
        .await?;
    let issued = tokens
        .issue_with_ttl(credential.id, demo.token_ttl())
        .await?;

    tracing::info!(
        user_id = %issued.user_id,
        token = issued.token.as_str(),
        expires_at = %issued.expires_at,
        "Demo token issued"
    );

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for SIGINT");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::signal;
        use tokio::signal::unix::SignalKind;

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
