use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
    Router,
};
use nulo_auth::{SigningKey, TokenSigner};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

// Re-export shared types from nulo-types
pub use nulo_types::*;

pub mod auth;
pub mod config;
pub mod database;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod views;

use config::Config;
use database::{setup_database, token_ops};
use error::{AppError, Result};

/// Version reported by `/health`, `/` and the OpenAPI document
pub const API_VERSION: &str = "1.0.0";

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub tokens: Arc<TokenSigner>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Result<Self> {
        let key = SigningKey::new(&config.jwt_secret_key)
            .map_err(|e| AppError::ConfigError(format!("Invalid JWT_SECRET_KEY: {}", e)))?;
        let ttl = chrono::Duration::minutes(config.access_token_expire_minutes);

        Ok(Self {
            db,
            config,
            tokens: Arc::new(TokenSigner::new(key, ttl)),
        })
    }
}

pub async fn run_server() -> Result<()> {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Setup database
    let db = setup_database(&config.database_url).await?;

    let server_address = config.server_address();
    let cleanup_interval = Duration::from_secs(config.cleanup_interval_hours * 3600);

    tracing::info!("🚀 Nulo Africa API starting up...");
    tracing::info!("📍 Environment: {}", config.environment);
    tracing::info!("🌐 CORS Origins: {:?}", config.cors_origins());

    let state = AppState::new(db, config)?;

    spawn_revoked_token_cleanup(state.db.clone(), cleanup_interval);

    // Build the application router
    let app = create_app(state);

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(&server_address)
        .await
        .map_err(|e| {
            AppError::ServerError(format!("Failed to bind to {}: {}", server_address, e))
        })?;

    tracing::info!("🎧 Listening on {}, docs at /api/docs", server_address);

    // Start the server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::ServerError(format!("Server error: {}", e)))?;

    tracing::info!("👋 Nulo Africa API shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Purge expired logout records in the background
fn spawn_revoked_token_cleanup(db: DatabaseConnection, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match token_ops::cleanup_expired(&db).await {
                Ok(0) => {}
                Ok(count) => tracing::info!("🧹 Purged {} expired revoked tokens", count),
                Err(e) => tracing::warn!("Revoked token cleanup failed: {}", e),
            }
        }
    });
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = config.cors_origins();

    // Browsers refuse credentials with a wildcard origin
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let router = Router::new()
        // Service
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .merge(docs::swagger_ui())
        .route("/api/redoc", get(docs::redoc))
        // Authentication
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route(
            "/api/v1/auth/me",
            get(handlers::auth::me).patch(handlers::auth::update_me),
        )
        .route("/api/v1/auth/logout", post(handlers::auth::logout))
        // Properties
        .route(
            "/api/v1/properties/search",
            get(handlers::properties::search_properties),
        )
        .route(
            "/api/v1/properties",
            post(handlers::properties::create_property),
        )
        .route(
            "/api/v1/properties/:property_id",
            get(handlers::properties::get_property)
                .patch(handlers::properties::update_property)
                .delete(handlers::properties::delete_property),
        )
        // Applications
        .route(
            "/api/v1/applications",
            get(handlers::applications::list_applications)
                .post(handlers::applications::create_application),
        )
        .route(
            "/api/v1/applications/:application_id/approve",
            patch(handlers::applications::approve_application),
        )
        .route(
            "/api/v1/applications/:application_id/reject",
            patch(handlers::applications::reject_application),
        )
        // Tenants
        .route(
            "/api/v1/tenants/profile",
            get(handlers::tenants::get_profile).patch(handlers::tenants::update_profile),
        )
        .route(
            "/api/v1/tenants/profile-status",
            get(handlers::tenants::profile_status),
        )
        .route(
            "/api/v1/tenants/complete-profile",
            post(handlers::tenants::complete_profile),
        )
        // Favorites
        .route(
            "/api/v1/favorites",
            get(handlers::favorites::list_favorites).post(handlers::favorites::add_favorite),
        )
        .route(
            "/api/v1/favorites/:property_id",
            axum::routing::delete(handlers::favorites::remove_favorite),
        )
        // Messages
        .route("/api/v1/messages", post(handlers::messages::send_message))
        .route(
            "/api/v1/messages/conversations",
            get(handlers::messages::list_conversations),
        )
        .route(
            "/api/v1/messages/:user_id",
            get(handlers::messages::get_thread),
        )
        // Cleanup operations
        .route(
            "/api/v1/admin/cleanup/revoked-tokens",
            post(handlers::cleanup_revoked_tokens),
        );

    // Internal error text is a per-router choice, never process-wide
    let router = if state.config.debug {
        router.layer(middleware::from_fn(error::expose_internal_details))
    } else {
        router
    };

    router
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
