use std::sync::Arc;

use article_service::config::Config;
use article_service::domain::article::service::ArticleService;
use article_service::domain::auth::service::AuthService;
use article_service::domain::user::service::UserService;
use article_service::inbound::http::router::create_router;
use article_service::outbound::repositories::PostgresArticleRepository;
use article_service::outbound::repositories::PostgresUserRepository;
use auth::PasswordHasher;
use auth::TokenService;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "article_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "article-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        access_token_expire_minutes = config.auth.access_token_expire_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(config.database.url.expose_secret())
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_cost(config.auth.hashing_cost())?;
    let token_service = Arc::new(TokenService::new(
        config.auth.jwt_secret.expose_secret().as_bytes(),
        config.auth.token_lifetime()?,
    )?);

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let article_repository = Arc::new(PostgresArticleRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        password_hasher.clone(),
    ));
    let article_service = Arc::new(ArticleService::new(
        article_repository,
        Arc::clone(&user_repository),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        password_hasher,
        token_service,
    )?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, article_service, auth_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
