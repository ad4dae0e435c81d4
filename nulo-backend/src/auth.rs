//! Bearer-token extractors.
//!
//! `CurrentUser` resolves the `Authorization: Bearer` token to a stored user.
//! The role wrappers add a 403 for the wrong account type, and `OptionalUser`
//! never rejects.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use nulo_auth::Claims;
use nulo_entity::user;
use nulo_types::UserType;

use crate::{
    database::{token_ops, user_ops},
    error::AppError,
    AppState,
};

/// An authenticated user together with the claims of the presented token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user: user::Model,
    pub claims: Claims,
}

impl CurrentUser {
    pub fn id(&self) -> uuid::Uuid {
        self.user.id
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.user.user_type.parse().ok()
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<CurrentUser, AppError> {
    let token = bearer_token(parts).ok_or_else(AppError::credentials)?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected access token: {}", e);
        AppError::credentials()
    })?;

    if token_ops::is_revoked(&state.db, claims.jti).await? {
        return Err(AppError::credentials());
    }

    let user = user_ops::get_user_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(AppError::credentials)?;

    Ok(CurrentUser { user, claims })
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        authenticate(parts, &app_state).await
    }
}

async fn require_role<S>(
    parts: &mut Parts,
    state: &S,
    role: UserType,
    denied: &str,
) -> Result<CurrentUser, AppError>
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    let current = CurrentUser::from_request_parts(parts, state).await?;
    if current.user_type() == Some(role) {
        Ok(current)
    } else {
        Err(AppError::Forbidden(denied.to_string()))
    }
}

/// Rejects anyone who is not a tenant
pub struct TenantUser(pub CurrentUser);

#[async_trait]
impl<S> FromRequestParts<S> for TenantUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            UserType::Tenant,
            "Only tenants can access this resource",
        )
        .await
        .map(TenantUser)
    }
}

/// Rejects anyone who is not a landlord
pub struct LandlordUser(pub CurrentUser);

#[async_trait]
impl<S> FromRequestParts<S> for LandlordUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            UserType::Landlord,
            "Only landlords can access this resource",
        )
        .await
        .map(LandlordUser)
    }
}

pub struct AdminUser(pub CurrentUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            UserType::Admin,
            "Only admins can access this resource",
        )
        .await
        .map(AdminUser)
    }
}

/// The caller when a valid token is presented, otherwise `None`
pub struct OptionalUser(pub Option<CurrentUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if bearer_token(parts).is_none() {
            return Ok(OptionalUser(None));
        }

        let app_state = AppState::from_ref(state);
        Ok(OptionalUser(authenticate(parts, &app_state).await.ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/auth/me");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc.def.ghi"))), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&parts(Some("bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts(Some("Basic dXNlcjpwYXNz"))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts(None)), None);
    }
}
