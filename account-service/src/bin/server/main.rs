use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::authentication::service::AuthService;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::HttpSettings;
use account_service::outbound::repositories::PostgresUserRepository;
use anyhow::Context;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use auth::TransportGate;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().context("Invalid configuration")?;

    tracing::info!(
        http_port = config.server.http_port,
        environment = ?config.server.environment,
        cors_origin = %config.server.cors_origin,
        password_cost = config.authentication.password_cost,
        "Configuration loaded"
    );

    let transport = Arc::new(
        TransportGate::load(&config.rsa.private_key_path, &config.rsa.public_key_path)
            .context("Failed to load RSA key pair")?,
    );
    tracing::info!(
        private_key = %config.rsa.private_key_path,
        public_key = %config.rsa.public_key_path,
        "RSA key pair loaded"
    );

    let password_hasher = PasswordHasher::with_cost(config.authentication.password_cost)
        .context("Invalid AUTHENTICATION__PASSWORD_COST")?;
    let tokens = TokenService::new(
        config.secrets.jwt_access_secret.as_bytes(),
        config.secrets.jwt_refresh_secret.as_bytes(),
    );
    let authenticator = Arc::new(Authenticator::new(password_hasher, tokens));

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));
    let user_service = Arc::new(UserService::new(user_repository));

    let http_application = create_router(
        auth_service,
        user_service,
        authenticator,
        transport,
        HttpSettings {
            production: config.is_production(),
            cors_origin: config.server.cors_origin.clone(),
        },
    )?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
