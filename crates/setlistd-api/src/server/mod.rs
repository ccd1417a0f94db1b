//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use setlistd_clients::{
    build_http_client, SeatGeekClient, SupabaseAuthClient, SupabaseStorageClient,
};
use setlistd_common::{AppConfig, AppError};
use setlistd_db::{
    create_pool, run_migrations, PgConcertListRepository, PgEventRepository, PgFollowRepository,
    PgPostRepository, PgReviewRepository, PgUserRepository,
};
use setlistd_service::{ServiceContextBuilder, StorageBuckets};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health and banner routes skip the rate limiter.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let router = api.merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());

    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = setlistd_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("Database migrations applied");
    }

    // One HTTP client shared by every outbound integration
    let http = build_http_client(&config.http_client)
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;

    let identity = Arc::new(SupabaseAuthClient::new(http.clone(), &config.supabase));
    let storage = Arc::new(SupabaseStorageClient::new(http.clone(), &config.supabase));
    let catalog = Arc::new(SeatGeekClient::new(http, &config.seatgeek));

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let follow_repo = Arc::new(PgFollowRepository::new(pool.clone()));
    let event_repo = Arc::new(PgEventRepository::new(pool.clone()));
    let review_repo = Arc::new(PgReviewRepository::new(pool.clone()));
    let concert_list_repo = Arc::new(PgConcertListRepository::new(pool.clone()));
    let post_repo = Arc::new(PgPostRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .follow_repo(follow_repo)
        .event_repo(event_repo)
        .review_repo(review_repo)
        .concert_list_repo(concert_list_repo)
        .post_repo(post_repo)
        .identity(identity)
        .storage(storage)
        .catalog(catalog)
        .buckets(StorageBuckets::from(&config.supabase))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, pool, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    // The rate limiter falls back to the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
