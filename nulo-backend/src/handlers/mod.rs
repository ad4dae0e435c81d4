use axum::{extract::State, response::Json};

use crate::{
    auth::AdminUser, database::token_ops, error::Result, AppState, CleanupResponse,
    HealthResponse, RootResponse, API_VERSION,
};

pub mod applications;
pub mod auth;
pub mod favorites;
pub mod messages;
pub mod properties;
pub mod tenants;

// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Service"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        environment: state.config.environment.clone(),
        version: API_VERSION.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "API entry point", body = RootResponse)),
    tag = "Service"
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to Nulo Africa API".to_string(),
        docs: "/api/docs".to_string(),
        version: API_VERSION.to_string(),
    })
}

// Purge logout records whose tokens have expired anyway
#[utoipa::path(
    post,
    path = "/api/v1/admin/cleanup/revoked-tokens",
    responses(
        (status = 200, description = "Expired revocations removed", body = CleanupResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer" = [])),
    tag = "Admin"
)]
pub async fn cleanup_revoked_tokens(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<CleanupResponse>> {
    tracing::info!("🧹 Starting cleanup of expired revoked tokens");

    let cleaned_count = token_ops::cleanup_expired(&state.db).await?;

    tracing::info!("✅ Cleaned up {} expired revoked tokens", cleaned_count);

    Ok(Json(CleanupResponse {
        items_cleaned: cleaned_count,
        cleanup_type: "expired_revoked_tokens".to_string(),
        timestamp: chrono::Utc::now(),
    }))
}
