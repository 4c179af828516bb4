//! BeautyConnect Backend
//!
//! REST backend for a beauty-services marketplace: masters, clients and bookings kept in a
//! SQLite-backed document store.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod schema;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Gateway;
use schema::SchemaCatalogue;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub catalogue: Arc<SchemaCatalogue>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BeautyConnect Backend");
    tracing::info!("Database name: {}", config.database_name);
    tracing::info!("Bind address: {}", config.bind_addr);

    // One connection attempt; on failure the store stays unavailable.
    let gateway = Arc::new(Gateway::connect(&config).await);

    let state = AppState {
        gateway,
        catalogue: Arc::new(SchemaCatalogue::build()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        .route("/hello", get(api::hello))
        // Masters
        .route("/masters", get(api::list_masters).post(api::create_master))
        .route("/seed", post(api::seed_demo_masters))
        // Bookings
        .route("/bookings", get(api::list_bookings).post(api::create_booking));

    // Liveness, schema and diagnostics
    let system_routes = Router::new()
        .route("/", get(api::root))
        .route("/health", get(health_check))
        .route("/schema", get(api::get_schema))
        .route("/test", get(api::test_database));

    Router::new()
        .nest("/api", api_routes)
        .merge(system_routes)
        .layer(CatchPanicLayer::custom(errors::panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
