use crate::error::{AppError, Result};
use nulo_entity::{favorite, prelude::*};
use sea_orm::*;
use std::collections::HashSet;
use uuid::Uuid;

use super::{duplicate_as_bad_request, property_ops};

const ALREADY_FAVORITED: &str = "Property already in favorites";

pub async fn get_favorite(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    property_id: Uuid,
) -> Result<Option<favorite::Model>> {
    let favorite = Favorite::find()
        .filter(favorite::Column::TenantId.eq(tenant_id))
        .filter(favorite::Column::PropertyId.eq(property_id))
        .one(db)
        .await?;

    Ok(favorite)
}

/// Which of `property_ids` the tenant has saved
pub async fn favorited_property_ids(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    property_ids: Vec<Uuid>,
) -> Result<HashSet<Uuid>> {
    if property_ids.is_empty() {
        return Ok(HashSet::new());
    }

    let ids = Favorite::find()
        .select_only()
        .column(favorite::Column::PropertyId)
        .filter(favorite::Column::TenantId.eq(tenant_id))
        .filter(favorite::Column::PropertyId.is_in(property_ids))
        .into_tuple::<Uuid>()
        .all(db)
        .await?;

    Ok(ids.into_iter().collect())
}

/// Newest first
pub async fn list_favorites(
    db: &DatabaseConnection,
    tenant_id: Uuid,
) -> Result<Vec<favorite::Model>> {
    let favorites = Favorite::find()
        .filter(favorite::Column::TenantId.eq(tenant_id))
        .order_by_desc(favorite::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(favorites)
}

/// Insert the favourite and bump the property's counter together
pub async fn add_favorite(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    property_id: Uuid,
) -> Result<favorite::Model> {
    if get_favorite(db, tenant_id, property_id).await?.is_some() {
        return Err(AppError::BadRequest(ALREADY_FAVORITED.to_string()));
    }

    let txn = db.begin().await?;

    let favorite = favorite::ActiveModel {
        tenant_id: Set(tenant_id),
        property_id: Set(property_id),
        ..favorite::ActiveModel::new()
    }
    .insert(&txn)
    .await
    .map_err(|e| duplicate_as_bad_request(e, ALREADY_FAVORITED))?;

    property_ops::increment_favorite_count(&txn, property_id).await?;

    txn.commit().await?;

    Ok(favorite)
}

/// Returns false when there was nothing to remove
pub async fn remove_favorite(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    property_id: Uuid,
) -> Result<bool> {
    let txn = db.begin().await?;

    let result = Favorite::delete_many()
        .filter(favorite::Column::TenantId.eq(tenant_id))
        .filter(favorite::Column::PropertyId.eq(property_id))
        .exec(&txn)
        .await?;

    if result.rows_affected == 0 {
        txn.rollback().await?;
        return Ok(false);
    }

    property_ops::decrement_favorite_count(&txn, property_id).await?;

    txn.commit().await?;

    Ok(true)
}
