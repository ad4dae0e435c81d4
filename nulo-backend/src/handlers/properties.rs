use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use nulo_entity::property;
use sea_orm::DatabaseConnection;
use std::collections::{BTreeSet, HashSet};
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{CurrentUser, LandlordUser, OptionalUser},
    database::{favorite_ops, property_ops, user_ops},
    error::{AppError, Result},
    views, AppState, Pagination, PropertyCreate, PropertyListResponse, PropertyResponse,
    PropertySearch, PropertyUpdate, SuccessResponse, UserType,
};

/// Attach landlord cards and the viewer's favourite flags to a batch of listings
pub(crate) async fn present_properties(
    db: &DatabaseConnection,
    properties: &[property::Model],
    viewer: Option<&CurrentUser>,
) -> Result<Vec<PropertyResponse>> {
    let landlord_ids: Vec<Uuid> = properties
        .iter()
        .map(|property| property.landlord_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let users = user_ops::get_users_by_ids(db, landlord_ids.clone()).await?;
    let landlords = user_ops::get_landlord_profiles(db, landlord_ids.clone()).await?;
    let counts = property_ops::count_active_properties(db, landlord_ids).await?;

    let favorited = match viewer {
        Some(viewer) if viewer.user_type() == Some(UserType::Tenant) => {
            let ids = properties.iter().map(|property| property.id).collect();
            favorite_ops::favorited_property_ids(db, viewer.id(), ids).await?
        }
        _ => HashSet::new(),
    };

    properties
        .iter()
        .map(|property| {
            let landlord = users.get(&property.landlord_id).map(|user| {
                views::landlord_info(
                    user,
                    landlords.get(&user.id),
                    counts.get(&user.id).copied().unwrap_or(0),
                )
            });
            views::property_response(property, landlord, favorited.contains(&property.id))
        })
        .collect()
}

async fn present_property(
    db: &DatabaseConnection,
    property: &property::Model,
    viewer: Option<&CurrentUser>,
) -> Result<PropertyResponse> {
    present_properties(db, std::slice::from_ref(property), viewer)
        .await?
        .pop()
        .ok_or_else(|| AppError::ServerError("Failed to render property".to_string()))
}

fn not_found() -> AppError {
    AppError::NotFound("Property not found".to_string())
}

#[utoipa::path(
    get,
    path = "/api/v1/properties/search",
    params(PropertySearch),
    responses(
        (status = 200, description = "Matching active listings", body = PropertyListResponse),
        (status = 422, description = "Invalid filters")
    ),
    tag = "Properties"
)]
pub async fn search_properties(
    State(state): State<AppState>,
    OptionalUser(viewer): OptionalUser,
    Query(search): Query<PropertySearch>,
) -> Result<Json<PropertyListResponse>> {
    search.validate()?;

    let (properties, total) = property_ops::search_properties(&state.db, &search).await?;
    let properties = present_properties(&state.db, &properties, viewer.as_ref()).await?;

    Ok(Json(PropertyListResponse {
        success: true,
        properties,
        pagination: Pagination::new(total, search.page, search.limit),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/properties",
    request_body = PropertyCreate,
    responses(
        (status = 200, description = "Listing created", body = PropertyResponse),
        (status = 403, description = "Not a landlord"),
        (status = 422, description = "Invalid listing")
    ),
    security(("bearer" = [])),
    tag = "Properties"
)]
pub async fn create_property(
    State(state): State<AppState>,
    LandlordUser(current): LandlordUser,
    Json(payload): Json<PropertyCreate>,
) -> Result<Json<PropertyResponse>> {
    payload.validate()?;

    let property = property_ops::create_property(&state.db, current.id(), payload).await?;

    tracing::info!("🏠 Landlord {} listed property {}", current.id(), property.id);

    Ok(Json(present_property(&state.db, &property, Some(&current)).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/properties/{property_id}",
    params(("property_id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Listing details", body = PropertyResponse),
        (status = 404, description = "Property not found")
    ),
    tag = "Properties"
)]
pub async fn get_property(
    State(state): State<AppState>,
    OptionalUser(viewer): OptionalUser,
    Path(property_id): Path<Uuid>,
) -> Result<Json<PropertyResponse>> {
    let property = property_ops::get_live_property(&state.db, property_id)
        .await?
        .ok_or_else(not_found)?;

    let property = property_ops::increment_view_count(&state.db, property.id)
        .await?
        .unwrap_or(property);

    Ok(Json(present_property(&state.db, &property, viewer.as_ref()).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/properties/{property_id}",
    params(("property_id" = Uuid, Path, description = "Property ID")),
    request_body = PropertyUpdate,
    responses(
        (status = 200, description = "Updated listing", body = PropertyResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Property not found")
    ),
    security(("bearer" = [])),
    tag = "Properties"
)]
pub async fn update_property(
    State(state): State<AppState>,
    LandlordUser(current): LandlordUser,
    Path(property_id): Path<Uuid>,
    Json(changes): Json<PropertyUpdate>,
) -> Result<Json<PropertyResponse>> {
    changes.validate()?;

    let property = property_ops::get_live_property(&state.db, property_id)
        .await?
        .ok_or_else(not_found)?;

    if !property.is_owned_by(current.id()) {
        return Err(AppError::Forbidden(
            "You don't have permission to update this property".to_string(),
        ));
    }

    let property = property_ops::update_property(&state.db, property, changes).await?;

    Ok(Json(present_property(&state.db, &property, Some(&current)).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/properties/{property_id}",
    params(("property_id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Listing removed", body = SuccessResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Property not found")
    ),
    security(("bearer" = [])),
    tag = "Properties"
)]
pub async fn delete_property(
    State(state): State<AppState>,
    LandlordUser(current): LandlordUser,
    Path(property_id): Path<Uuid>,
) -> Result<Json<SuccessResponse>> {
    let property = property_ops::get_live_property(&state.db, property_id)
        .await?
        .ok_or_else(not_found)?;

    if !property.is_owned_by(current.id()) {
        return Err(AppError::Forbidden(
            "You don't have permission to delete this property".to_string(),
        ));
    }

    property_ops::soft_delete_property(&state.db, property).await?;

    tracing::info!("🗑️ Landlord {} removed property {}", current.id(), property_id);

    Ok(Json(SuccessResponse::new("Property deleted successfully")))
}
