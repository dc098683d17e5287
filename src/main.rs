//! Contact Manager Backend
//!
//! REST backend for contact records with SQLite persistence and local photo storage.

mod api;
mod config;
mod cors;
mod db;
mod errors;
mod models;
mod photos;
mod service;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use db::ContactRepository;
use photos::PhotoStorage;
use service::ContactService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<ContactService>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting Contact Manager Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Allowed origins: {:?}", config.allowed_origins);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(ContactRepository::new(pool));

    let photos = PhotoStorage::new(&config.photo_dir);
    tracing::info!("Photos stored in {:?}", photos.dir());

    let contacts = Arc::new(ContactService::new(repo, photos));

    let state = AppState {
        contacts,
        config: Arc::new(config.clone()),
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
    let cors = cors::cors_layer(&state.config.allowed_origins);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    let contact_routes = Router::new()
        .route("/contacts", post(api::create_contact).get(api::list_contacts))
        .route("/contacts/photo", put(api::upload_photo))
        .route("/contacts/image/{filename}", get(api::get_photo))
        .route("/contacts/{id}", get(api::get_contact));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(contact_routes)
        .merge(health_routes)
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
