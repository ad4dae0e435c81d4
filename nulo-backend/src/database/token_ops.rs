use crate::error::Result;
use nulo_auth::Claims;
use nulo_entity::{prelude::*, revoked_token};
use sea_orm::*;
use uuid::Uuid;

use super::is_unique_violation;

/// Record a logged-out token until it would have expired anyway
pub async fn revoke_token(db: &DatabaseConnection, claims: &Claims) -> Result<()> {
    if is_revoked(db, claims.jti).await? {
        return Ok(());
    }

    let inserted = revoked_token::ActiveModel {
        jti: Set(claims.jti),
        user_id: Set(claims.sub),
        expires_at: Set(claims.expires_at()),
        ..revoked_token::ActiveModel::new()
    }
    .insert(db)
    .await;

    match inserted {
        Ok(_) => Ok(()),
        // A concurrent logout of the same token already recorded it
        Err(e) if is_unique_violation(&e) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

pub async fn is_revoked(db: &DatabaseConnection, jti: Uuid) -> Result<bool> {
    let count = RevokedToken::find()
        .filter(revoked_token::Column::Jti.eq(jti))
        .count(db)
        .await?;

    Ok(count > 0)
}

pub async fn cleanup_expired(db: &DatabaseConnection) -> Result<u64> {
    let result = RevokedToken::delete_many()
        .filter(revoked_token::Column::ExpiresAt.lt(chrono::Utc::now()))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
