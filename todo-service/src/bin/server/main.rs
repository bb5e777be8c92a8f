use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use todo_service::config::Config;
use todo_service::config::StorageBackend;
use todo_service::identity::ports::IdentityServicePort;
use todo_service::identity::service::IdentityService;
use todo_service::inbound::http::router::cors_layer;
use todo_service::inbound::http::router::create_router;
use todo_service::repositories::InMemoryIdentityRepository;
use todo_service::repositories::InMemoryTodoRepository;
use todo_service::repositories::PostgresIdentityRepository;
use todo_service::repositories::PostgresTodoRepository;
use todo_service::todo::ports::TodoServicePort;
use todo_service::todo::service::TodoService;
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

    tracing::info!(
        http_port = config.server.http_port,
        storage_backend = ?config.storage.backend,
        jwt_expiration_hours = config.jwt.expiration_hours,
        cors_allowed_origin = %config.cors.allowed_origin,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_work_factor(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes(), config.jwt.expiration_hours)
            .with_password_hasher(password_hasher),
    );

    let (identity_service, todo_service): (
        Arc<dyn IdentityServicePort>,
        Arc<dyn TodoServicePort>,
    ) = match config.storage.backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database
                .url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("database.url is not set"))?;

            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(database_url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let identity_service: Arc<dyn IdentityServicePort> = Arc::new(IdentityService::new(
                Arc::new(PostgresIdentityRepository::new(pg_pool.clone())),
                authenticator,
            ));
            let todo_service: Arc<dyn TodoServicePort> = Arc::new(TodoService::new(Arc::new(
                PostgresTodoRepository::new(pg_pool),
            )));

            (identity_service, todo_service)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");

            let identity_service: Arc<dyn IdentityServicePort> = Arc::new(IdentityService::new(
                Arc::new(InMemoryIdentityRepository::new()),
                authenticator,
            ));
            let todo_service: Arc<dyn TodoServicePort> =
                Arc::new(TodoService::new(Arc::new(InMemoryTodoRepository::new())));

            (identity_service, todo_service)
        }
    };

    let http_application = create_router(
        identity_service,
        todo_service,
        cors_layer(&config.cors)?,
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    Ok(())
}
