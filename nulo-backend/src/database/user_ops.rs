use crate::error::{AppError, Result};
use nulo_entity::{landlord, prelude::*, tenant, user};
use nulo_types::{UserType, UserUpdate};
use sea_orm::*;
use std::collections::HashMap;
use uuid::Uuid;

use super::duplicate_as_bad_request;

const ALREADY_REGISTERED: &str = "Registration failed: User already registered";

pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub user_type: UserType,
    pub phone_number: Option<String>,
}

pub async fn get_user_by_id(db: &DatabaseConnection, user_id: Uuid) -> Result<Option<user::Model>> {
    let user = User::find_by_id(user_id).one(db).await?;
    Ok(user)
}

pub async fn get_user_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<user::Model>> {
    let user = User::find()
        .filter(user::Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await?;

    Ok(user)
}

/// Users keyed by id, for embedding summaries in listings
pub async fn get_users_by_ids(
    db: &DatabaseConnection,
    user_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, user::Model>> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = User::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(db)
        .await?;

    Ok(users.into_iter().map(|user| (user.id, user)).collect())
}

/// Create the account and its role profile in one transaction
pub async fn create_user(db: &DatabaseConnection, params: NewUser) -> Result<user::Model> {
    let email = params.email.trim().to_lowercase();

    if get_user_by_email(db, &email).await?.is_some() {
        return Err(AppError::BadRequest(ALREADY_REGISTERED.to_string()));
    }

    let txn = db.begin().await?;

    let user = user::ActiveModel {
        email: Set(email),
        password_hash: Set(params.password_hash),
        full_name: Set(Some(params.full_name)),
        phone_number: Set(params.phone_number),
        user_type: Set(params.user_type.as_str().to_string()),
        ..user::ActiveModel::new()
    }
    .insert(&txn)
    .await
    .map_err(|e| duplicate_as_bad_request(e, ALREADY_REGISTERED))?;

    match params.user_type {
        UserType::Tenant => {
            tenant::ActiveModel {
                id: Set(user.id),
                ..tenant::ActiveModel::new()
            }
            .insert(&txn)
            .await?;
        }
        UserType::Landlord => {
            landlord::ActiveModel {
                id: Set(user.id),
                ..landlord::ActiveModel::new()
            }
            .insert(&txn)
            .await?;
        }
        UserType::Admin => {}
    }

    txn.commit().await?;

    Ok(user)
}

pub async fn record_login(db: &DatabaseConnection, user: user::Model) -> Result<user::Model> {
    let mut user: user::ActiveModel = user.into();
    user.last_login_at = Set(Some(chrono::Utc::now()));
    let user = user.update(db).await?;
    Ok(user)
}

/// Apply the fields present in `changes`
pub async fn update_user(
    db: &DatabaseConnection,
    user: user::Model,
    changes: UserUpdate,
) -> Result<user::Model> {
    let mut user: user::ActiveModel = user.into();

    if let Some(full_name) = changes.full_name {
        user.full_name = Set(Some(full_name));
    }
    if let Some(phone_number) = changes.phone_number {
        user.phone_number = Set(Some(phone_number));
    }
    if let Some(avatar_url) = changes.avatar_url {
        user.avatar_url = Set(Some(avatar_url));
    }
    user.updated_at = Set(chrono::Utc::now());

    let user = user.update(db).await?;
    Ok(user)
}

pub async fn get_tenant_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<tenant::Model>> {
    let tenant = Tenant::find_by_id(user_id).one(db).await?;
    Ok(tenant)
}

pub async fn get_landlord_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<landlord::Model>> {
    let landlord = Landlord::find_by_id(user_id).one(db).await?;
    Ok(landlord)
}

pub async fn get_landlord_profiles(
    db: &DatabaseConnection,
    user_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, landlord::Model>> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let landlords = Landlord::find()
        .filter(landlord::Column::Id.is_in(user_ids))
        .all(db)
        .await?;

    Ok(landlords
        .into_iter()
        .map(|landlord| (landlord.id, landlord))
        .collect())
}
