use axum::{extract::State, response::Json};
use nulo_entity::tenant::FULL_COMPLETION;
use validator::Validate;

use crate::{
    auth::TenantUser,
    database::tenant_ops,
    error::Result,
    views, AppState, CompleteProfileData, CompleteProfileResponse, ProfileStatusResponse,
    TenantProfileResponse, TenantProfileUpdate,
};

#[utoipa::path(
    get,
    path = "/api/v1/tenants/profile",
    responses(
        (status = 200, description = "Tenant profile", body = TenantProfileResponse),
        (status = 403, description = "Not a tenant")
    ),
    security(("bearer" = [])),
    tag = "Tenants"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    TenantUser(current): TenantUser,
) -> Result<Json<TenantProfileResponse>> {
    let mut tenant = tenant_ops::get_tenant(&state.db, current.id()).await?;
    tenant.profile_completion = tenant.profile_completion();

    Ok(Json(TenantProfileResponse {
        success: true,
        profile: views::tenant_profile(&tenant),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/tenants/profile-status",
    responses(
        (status = 200, description = "Onboarding progress", body = ProfileStatusResponse),
        (status = 403, description = "Not a tenant")
    ),
    security(("bearer" = [])),
    tag = "Tenants"
)]
pub async fn profile_status(
    State(state): State<AppState>,
    TenantUser(current): TenantUser,
) -> Result<Json<ProfileStatusResponse>> {
    let tenant = tenant_ops::get_tenant(&state.db, current.id()).await?;
    let completion = tenant.profile_completion();

    Ok(Json(ProfileStatusResponse {
        profile_completion: completion,
        onboarding_completed: tenant.onboarding_completed,
        trust_score: current.user.trust_score,
        verification_status: views::parse(&current.user.verification_status)?,
        missing_fields: tenant.missing_fields(),
        can_apply: completion >= FULL_COMPLETION,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/v1/tenants/profile",
    request_body = TenantProfileUpdate,
    responses(
        (status = 200, description = "Updated profile", body = TenantProfileResponse),
        (status = 403, description = "Not a tenant")
    ),
    security(("bearer" = [])),
    tag = "Tenants"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    TenantUser(current): TenantUser,
    Json(changes): Json<TenantProfileUpdate>,
) -> Result<Json<TenantProfileResponse>> {
    changes.validate()?;

    let tenant = tenant_ops::get_tenant(&state.db, current.id()).await?;
    let tenant = tenant_ops::update_tenant_profile(&state.db, tenant, changes).await?;

    Ok(Json(TenantProfileResponse {
        success: true,
        profile: views::tenant_profile(&tenant),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/tenants/complete-profile",
    request_body = CompleteProfileData,
    responses(
        (status = 200, description = "Onboarding finished", body = CompleteProfileResponse),
        (status = 403, description = "Not a tenant"),
        (status = 422, description = "Incomplete wizard data")
    ),
    security(("bearer" = [])),
    tag = "Tenants"
)]
pub async fn complete_profile(
    State(state): State<AppState>,
    TenantUser(current): TenantUser,
    Json(payload): Json<CompleteProfileData>,
) -> Result<Json<CompleteProfileResponse>> {
    payload.validate()?;

    let tenant = tenant_ops::get_tenant(&state.db, current.id()).await?;
    let (tenant, user) = tenant_ops::complete_profile(&state.db, tenant, payload).await?;

    tracing::info!(
        "🎉 Tenant {} completed onboarding (trust score {})",
        user.id,
        user.trust_score
    );

    Ok(Json(CompleteProfileResponse {
        success: true,
        message: "Profile completed! You can now apply for properties.".to_string(),
        profile: views::tenant_profile(&tenant),
        trust_score: user.trust_score,
    }))
}
