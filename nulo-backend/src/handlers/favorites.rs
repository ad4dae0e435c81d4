use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;
use validator::Validate;

use super::properties::present_properties;
use crate::{
    auth::TenantUser,
    database::{favorite_ops, property_ops},
    error::{AppError, Result},
    views, AppState, FavoriteCreate, FavoriteCreatedResponse, FavoriteListResponse,
    SuccessResponse,
};

#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    responses(
        (status = 200, description = "Saved listings, newest first", body = FavoriteListResponse),
        (status = 403, description = "Not a tenant")
    ),
    security(("bearer" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    TenantUser(current): TenantUser,
) -> Result<Json<FavoriteListResponse>> {
    let favorites = favorite_ops::list_favorites(&state.db, current.id()).await?;

    let property_ids = favorites.iter().map(|f| f.property_id).collect();
    let mut properties = property_ops::get_properties_by_ids(&state.db, property_ids).await?;

    // Keep favourite order and skip listings that have since been removed
    let properties: Vec<_> = favorites
        .iter()
        .filter_map(|favorite| properties.remove(&favorite.property_id))
        .filter(|property| !property.is_deleted())
        .collect();

    let favorites = present_properties(&state.db, &properties, Some(&current)).await?;

    Ok(Json(FavoriteListResponse {
        success: true,
        count: favorites.len(),
        favorites,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/favorites",
    request_body = FavoriteCreate,
    responses(
        (status = 200, description = "Listing saved", body = FavoriteCreatedResponse),
        (status = 400, description = "Already saved"),
        (status = 404, description = "Property not found")
    ),
    security(("bearer" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    TenantUser(current): TenantUser,
    Json(payload): Json<FavoriteCreate>,
) -> Result<Json<FavoriteCreatedResponse>> {
    payload.validate()?;

    let property = property_ops::get_live_property(&state.db, payload.property_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;

    let favorite = favorite_ops::add_favorite(&state.db, current.id(), property.id).await?;

    Ok(Json(FavoriteCreatedResponse {
        success: true,
        message: "Property added to favorites".to_string(),
        favorite: views::favorite_response(&favorite),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/favorites/{property_id}",
    params(("property_id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Listing unsaved", body = SuccessResponse),
        (status = 404, description = "Favorite not found")
    ),
    security(("bearer" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    TenantUser(current): TenantUser,
    Path(property_id): Path<Uuid>,
) -> Result<Json<SuccessResponse>> {
    if !favorite_ops::remove_favorite(&state.db, current.id(), property_id).await? {
        return Err(AppError::NotFound("Favorite not found".to_string()));
    }

    Ok(Json(SuccessResponse::new("Property removed from favorites")))
}
