use std::sync::Arc;

use auth::Authenticator;
use auth::AuthorizationGate;
use sqlx::postgres::PgPoolOptions;
use todo_service::config::Config;
use todo_service::domain::account::service::AccountService;
use todo_service::domain::task::service::TaskService;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::repositories::PostgresAccountRepository;
use todo_service::outbound::repositories::PostgresTaskRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let token_config = config.jwt.token_config()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt = ?config.jwt,
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

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let task_repository = Arc::new(PostgresTaskRepository::new(pg_pool));

    let account_service = Arc::new(AccountService::new(
        account_repository,
        Authenticator::new(&token_config),
    )?);
    let task_service = Arc::new(TaskService::new(task_repository));
    let gate = Arc::new(AuthorizationGate::new(&token_config));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, task_service, gate);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
