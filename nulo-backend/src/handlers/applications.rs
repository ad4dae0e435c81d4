use axum::{
    extract::{Path, State},
    response::Json,
};
use nulo_entity::{application, tenant::FULL_COMPLETION};
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{CurrentUser, LandlordUser, TenantUser},
    database::{application_ops, property_ops, tenant_ops, user_ops},
    error::{AppError, Result},
    views, AppState, ApplicationCreate, ApplicationCreatedResponse, ApplicationListResponse,
    ApplicationReject, ApplicationResponse, SuccessResponse, UserType,
};

fn not_found() -> AppError {
    AppError::NotFound("Application not found".to_string())
}

/// The application, provided the landlord owns the property it targets
async fn owned_application(
    state: &AppState,
    application_id: Uuid,
    landlord_id: Uuid,
    action: &str,
) -> Result<application::Model> {
    let application = application_ops::get_application_by_id(&state.db, application_id)
        .await?
        .ok_or_else(not_found)?;

    let owned = property_ops::get_property_by_id(&state.db, application.property_id)
        .await?
        .map(|property| property.is_owned_by(landlord_id))
        .unwrap_or(false);

    if !owned {
        return Err(AppError::Forbidden(format!(
            "You don't have permission to {} this application",
            action
        )));
    }

    Ok(application)
}

#[utoipa::path(
    post,
    path = "/api/v1/applications",
    request_body = ApplicationCreate,
    responses(
        (status = 200, description = "Application submitted with escrow held", body = ApplicationCreatedResponse),
        (status = 400, description = "Property unavailable or already applied"),
        (status = 403, description = "Profile incomplete or not a tenant"),
        (status = 404, description = "Property not found")
    ),
    security(("bearer" = [])),
    tag = "Applications"
)]
pub async fn create_application(
    State(state): State<AppState>,
    TenantUser(current): TenantUser,
    Json(payload): Json<ApplicationCreate>,
) -> Result<Json<ApplicationCreatedResponse>> {
    payload.validate()?;

    let tenant = tenant_ops::get_tenant(&state.db, current.id()).await?;
    if tenant.profile_completion < FULL_COMPLETION {
        return Err(AppError::Forbidden(
            "You must complete your profile (100%) before applying for properties".to_string(),
        ));
    }

    let property = property_ops::get_live_property(&state.db, payload.property_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;

    if !property.is_active() {
        return Err(AppError::BadRequest(
            "Property is not available for applications".to_string(),
        ));
    }

    let (application, escrow) =
        application_ops::submit_application(&state.db, current.id(), &property, payload).await?;

    tracing::info!(
        "📨 Tenant {} applied for property {} ({} {} held)",
        current.id(),
        property.id,
        escrow.amount,
        escrow.currency
    );

    let summary = views::property_summary(&property, None);

    Ok(Json(ApplicationCreatedResponse {
        success: true,
        application: views::application_response(&application, Some(summary), None)?,
        transaction: Some(views::transaction_response(&escrow)?),
        message: "Application submitted successfully".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications",
    responses(
        (status = 200, description = "Applications visible to the caller", body = ApplicationListResponse),
        (status = 403, description = "Invalid user type")
    ),
    security(("bearer" = [])),
    tag = "Applications"
)]
pub async fn list_applications(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<ApplicationListResponse>> {
    let applications = match current.user_type() {
        Some(UserType::Tenant) => tenant_applications(&state, current.id()).await?,
        Some(UserType::Landlord) => landlord_applications(&state, current.id()).await?,
        _ => return Err(AppError::Forbidden("Invalid user type".to_string())),
    };

    Ok(Json(ApplicationListResponse {
        success: true,
        applications,
    }))
}

// Tenants see each property with its landlord
async fn tenant_applications(state: &AppState, tenant_id: Uuid) -> Result<Vec<ApplicationResponse>> {
    let applications = application_ops::list_for_tenant(&state.db, tenant_id).await?;

    let property_ids = applications.iter().map(|a| a.property_id).collect();
    let properties = property_ops::get_properties_by_ids(&state.db, property_ids).await?;

    let landlord_ids = properties.values().map(|p| p.landlord_id).collect();
    let landlords = user_ops::get_users_by_ids(&state.db, landlord_ids).await?;

    applications
        .iter()
        .map(|application| {
            let property = properties.get(&application.property_id).map(|property| {
                let landlord = landlords.get(&property.landlord_id).map(views::user_summary);
                views::property_summary(property, landlord)
            });
            views::application_response(application, property, None)
        })
        .collect()
}

// Landlords see each applicant
async fn landlord_applications(
    state: &AppState,
    landlord_id: Uuid,
) -> Result<Vec<ApplicationResponse>> {
    let applications = application_ops::list_for_landlord(&state.db, landlord_id).await?;

    let property_ids = applications.iter().map(|a| a.property_id).collect();
    let properties = property_ops::get_properties_by_ids(&state.db, property_ids).await?;

    let tenant_ids = applications.iter().map(|a| a.tenant_id).collect();
    let tenants = user_ops::get_users_by_ids(&state.db, tenant_ids).await?;

    applications
        .iter()
        .map(|application| {
            let property = properties
                .get(&application.property_id)
                .map(|property| views::property_summary(property, None));
            let tenant = tenants.get(&application.tenant_id).map(views::user_summary);
            views::application_response(application, property, tenant)
        })
        .collect()
}

#[utoipa::path(
    patch,
    path = "/api/v1/applications/{application_id}/approve",
    params(("application_id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Approved and escrow released", body = SuccessResponse),
        (status = 400, description = "Application already decided"),
        (status = 403, description = "Not the property owner"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer" = [])),
    tag = "Applications"
)]
pub async fn approve_application(
    State(state): State<AppState>,
    LandlordUser(current): LandlordUser,
    Path(application_id): Path<Uuid>,
) -> Result<Json<SuccessResponse>> {
    let application = owned_application(&state, application_id, current.id(), "approve").await?;

    let application =
        application_ops::approve_application(&state.db, application, current.id()).await?;

    tracing::info!(
        "✅ Landlord {} approved application {}",
        current.id(),
        application.id
    );

    Ok(Json(SuccessResponse::new("Application approved successfully")))
}

#[utoipa::path(
    patch,
    path = "/api/v1/applications/{application_id}/reject",
    params(("application_id" = Uuid, Path, description = "Application ID")),
    request_body = ApplicationReject,
    responses(
        (status = 200, description = "Rejected and escrow refunded", body = SuccessResponse),
        (status = 400, description = "Application already decided"),
        (status = 403, description = "Not the property owner"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer" = [])),
    tag = "Applications"
)]
pub async fn reject_application(
    State(state): State<AppState>,
    LandlordUser(current): LandlordUser,
    Path(application_id): Path<Uuid>,
    Json(payload): Json<ApplicationReject>,
) -> Result<Json<SuccessResponse>> {
    payload.validate()?;

    let application = owned_application(&state, application_id, current.id(), "reject").await?;

    let application = application_ops::reject_application(
        &state.db,
        application,
        current.id(),
        payload.reason,
        payload.reason_code,
    )
    .await?;

    tracing::info!(
        "❌ Landlord {} rejected application {}",
        current.id(),
        application.id
    );

    Ok(Json(SuccessResponse::new("Application rejected")))
}
