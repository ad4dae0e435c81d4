use axum::{extract::State, response::Json};
use nulo_auth::{hash_password, verify_password};
use nulo_entity::{landlord, tenant, user};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::{
    auth::CurrentUser,
    database::{
        token_ops,
        user_ops::{self, NewUser},
    },
    error::{AppError, Result},
    views, AppState, AuthResponse, SuccessResponse, UserLogin, UserRegister, UserResponse,
    UserType, UserUpdate,
};

const TOKEN_TYPE: &str = "bearer";

/// Tenant or landlord profile row for the user, depending on their type
pub(crate) async fn load_profiles(
    db: &DatabaseConnection,
    user: &user::Model,
) -> Result<(Option<tenant::Model>, Option<landlord::Model>)> {
    match user.user_type.parse::<UserType>() {
        Ok(UserType::Tenant) => Ok((user_ops::get_tenant_profile(db, user.id).await?, None)),
        Ok(UserType::Landlord) => Ok((None, user_ops::get_landlord_profile(db, user.id).await?)),
        _ => Ok((None, None)),
    }
}

async fn full_user_response(db: &DatabaseConnection, user: &user::Model) -> Result<UserResponse> {
    let (tenant, landlord) = load_profiles(db, user).await?;
    views::user_response(user, tenant.as_ref(), landlord.as_ref())
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = UserRegister,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Email already registered"),
        (status = 422, description = "Invalid registration data")
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserRegister>,
) -> Result<Json<AuthResponse>> {
    payload.validate()?;

    let password_hash = hash_password(&payload.password)?;

    let user = user_ops::create_user(
        &state.db,
        NewUser {
            email: payload.email,
            password_hash,
            full_name: payload.full_name,
            user_type: payload.user_type,
            phone_number: payload.phone_number,
        },
    )
    .await?;

    let issued = state.tokens.issue(user.id, &user.user_type)?;

    tracing::info!("👤 Registered {} account {}", user.user_type, user.id);

    Ok(Json(AuthResponse {
        success: true,
        user: full_user_response(&state.db, &user).await?,
        access_token: issued.token,
        token_type: TOKEN_TYPE.to_string(),
        message: Some(
            "Registration successful! Please check your email to verify your account."
                .to_string(),
        ),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = UserLogin,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<UserLogin>,
) -> Result<Json<AuthResponse>> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = user_ops::get_user_by_email(&state.db, &credentials.email)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&credentials.password, &user.password_hash)? {
        tracing::warn!("Failed login attempt for {}", user.id);
        return Err(invalid());
    }

    let user = user_ops::record_login(&state.db, user).await?;
    let issued = state.tokens.issue(user.id, &user.user_type)?;

    tracing::info!("🔑 User {} logged in", user.id);

    Ok(Json(AuthResponse {
        success: true,
        user: full_user_response(&state.db, &user).await?,
        access_token: issued.token,
        token_type: TOKEN_TYPE.to_string(),
        message: None,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = [])),
    tag = "Authentication"
)]
pub async fn me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<UserResponse>> {
    Ok(Json(full_user_response(&state.db, &current.user).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/auth/me",
    request_body = UserUpdate,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = [])),
    tag = "Authentication"
)]
pub async fn update_me(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(changes): Json<UserUpdate>,
) -> Result<Json<UserResponse>> {
    changes.validate()?;

    let user = user_ops::update_user(&state.db, current.user, changes).await?;

    Ok(Json(full_user_response(&state.db, &user).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Token revoked", body = SuccessResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = [])),
    tag = "Authentication"
)]
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<SuccessResponse>> {
    token_ops::revoke_token(&state.db, &current.claims).await?;

    tracing::info!("👋 User {} logged out", current.id());

    Ok(Json(SuccessResponse::new("Logged out successfully")))
}
