use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use task_service::config::Config;
use task_service::domain::account::service::AccountService;
use task_service::domain::task::service::TaskService;
use task_service::inbound::http::router::create_router;
use task_service::outbound::repositories::PostgresAccountRepository;
use task_service::outbound::repositories::PostgresTaskRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "task-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // The database URL can embed credentials, so it is not logged.
    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes())?);

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

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let task_repository = Arc::new(PostgresTaskRepository::new(pg_pool));

    let account_service = Arc::new(AccountService::new(
        account_repository,
        Arc::clone(&authenticator),
        config.jwt.expiration_hours,
    )?);
    let task_service = Arc::new(TaskService::new(task_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, task_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
