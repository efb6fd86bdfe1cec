use std::sync::Arc;
use std::time::Duration;

use account_service::account::ports::AccountServicePort;
use account_service::account::service::AccountService;
use account_service::account::service::AccountSettings;
use account_service::config::Config;
use account_service::inbound::http::router::create_router;
use account_service::outbound::mail::KafkaMailer;
use account_service::outbound::repositories::PostgresOrganisationRepository;
use account_service::outbound::repositories::PostgresRefreshTokenRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use auth::Authenticator;
use auth::TokenSettings;
use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        public_url = %config.server.public_url,
        client_url = %config.client.url,
        kafka_brokers = %config.kafka.brokers,
        mail_topic = %config.kafka.mail_topic,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        TokenSettings::new(
            config.access_token.secret.as_bytes(),
            chrono::Duration::minutes(config.access_token.expiry_minutes),
        ),
        TokenSettings::new(
            config.refresh_token.secret.as_bytes(),
            chrono::Duration::days(config.refresh_token.expiry_days),
        ),
    ));

    let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
        Arc::new(PostgresUserRepository::new(pg_pool.clone())),
        Arc::new(PostgresRefreshTokenRepository::new(pg_pool.clone())),
        Arc::new(PostgresOrganisationRepository::new(pg_pool)),
        Arc::new(KafkaMailer::new(&config)?),
        Arc::clone(&authenticator),
        AccountSettings {
            public_url: config.server.public_url.clone(),
            client_url: config.client.url.clone(),
            password_reset_ttl: chrono::Duration::minutes(config.password_reset.expiry_minutes),
        },
    ));

    spawn_refresh_token_purge(
        Arc::clone(&account_service),
        Duration::from_secs(config.refresh_token.purge_interval_secs),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        authenticator,
        HeaderValue::from_str(&config.client.url)?,
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn spawn_refresh_token_purge(account_service: Arc<dyn AccountServicePort>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match account_service
                .purge_expired_refresh_tokens(chrono::Utc::now())
                .await
            {
                Ok(purged) => tracing::debug!(purged, "Expired refresh tokens purged"),
                Err(e) => tracing::error!(error = %e, "Refresh token purge failed"),
            }
        }
    });
}
