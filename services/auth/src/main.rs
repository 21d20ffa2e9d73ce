use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod middleware;
mod models;
mod rate_limiter;
mod repositories;
mod routes;
mod validation;

use common::{
    database,
    token::{TokenConfig, TokenService},
};
use sqlx::PgPool;

use crate::repositories::{UserRepository, VerificationRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub token_service: TokenService,
    pub user_repository: UserRepository,
    pub verification_repository: VerificationRepository,
    pub rate_limiter: rate_limiter::RateLimiter,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    info!("Starting authentication service");

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize the session-token service
    let token_config = TokenConfig::from_env()?;
    let token_service = TokenService::new(token_config);

    let user_repository = UserRepository::new(pool.clone());
    let verification_repository = VerificationRepository::new(pool.clone());
    let rate_limiter =
        rate_limiter::RateLimiter::new(rate_limiter::RateLimiterConfig::default());

    let app_state = AppState {
        db_pool: pool,
        token_service,
        user_repository,
        verification_repository,
        rate_limiter,
    };

    info!("Authentication service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Authentication service listening on 0.0.0.0:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
