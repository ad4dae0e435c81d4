use crate::error::Result;
use nulo_entity::{prelude::*, property};
use nulo_types::{PropertyCreate, PropertySearch, PropertyStatus, PropertyUpdate, SortOrder};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;
use std::collections::HashMap;
use uuid::Uuid;

use super::page_offset;

/// Lowercase ASCII slug: runs of anything else collapse into one dash
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.trim_end_matches('-').to_string()
}

fn unique_slug(title: &str, id: Uuid) -> String {
    let suffix = id.simple().to_string();
    let base = slugify(title);
    if base.is_empty() {
        suffix[..8].to_string()
    } else {
        format!("{}-{}", base, &suffix[..8])
    }
}

fn json_list(items: Vec<String>) -> serde_json::Value {
    serde_json::Value::from(items)
}

pub async fn create_property(
    db: &DatabaseConnection,
    landlord_id: Uuid,
    data: PropertyCreate,
) -> Result<property::Model> {
    let id = Uuid::new_v4();

    let property = property::ActiveModel {
        id: Set(id),
        landlord_id: Set(landlord_id),
        slug: Set(Some(unique_slug(&data.title, id))),
        title: Set(data.title),
        description: Set(data.description),
        rent_amount: Set(data.rent_amount),
        security_deposit: Set(data.security_deposit),
        location: Set(data.location),
        address: Set(data.address),
        city: Set(data.city),
        state: Set(data.state),
        country: Set(data.country),
        latitude: Set(data.latitude),
        longitude: Set(data.longitude),
        bedrooms: Set(data.bedrooms),
        bathrooms: Set(data.bathrooms),
        square_feet: Set(data.square_feet),
        property_type: Set(data.property_type.as_str().to_string()),
        amenities: Set(json_list(data.amenities)),
        photos: Set(json_list(data.photos)),
        availability_start: Set(data.availability_start),
        status: Set(data.status.as_str().to_string()),
        ..property::ActiveModel::new()
    };

    let property = property.insert(db).await?;
    Ok(property)
}

/// Any property, deleted or not
pub async fn get_property_by_id<C: ConnectionTrait>(
    db: &C,
    property_id: Uuid,
) -> Result<Option<property::Model>> {
    let property = Property::find_by_id(property_id).one(db).await?;
    Ok(property)
}

/// A property that has not been soft-deleted
pub async fn get_live_property(
    db: &DatabaseConnection,
    property_id: Uuid,
) -> Result<Option<property::Model>> {
    let property = Property::find_by_id(property_id)
        .filter(property::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    Ok(property)
}

pub async fn get_properties_by_ids(
    db: &DatabaseConnection,
    property_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, property::Model>> {
    if property_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let properties = Property::find()
        .filter(property::Column::Id.is_in(property_ids))
        .all(db)
        .await?;

    Ok(properties
        .into_iter()
        .map(|property| (property.id, property))
        .collect())
}

pub async fn get_property_ids_for_landlord(
    db: &DatabaseConnection,
    landlord_id: Uuid,
) -> Result<Vec<Uuid>> {
    let ids = Property::find()
        .select_only()
        .column(property::Column::Id)
        .filter(property::Column::LandlordId.eq(landlord_id))
        .into_tuple::<Uuid>()
        .all(db)
        .await?;

    Ok(ids)
}

/// Active, non-deleted listings matching the filters, plus the total before paging
pub async fn search_properties(
    db: &DatabaseConnection,
    search: &PropertySearch,
) -> Result<(Vec<property::Model>, u64)> {
    let mut query = Property::find()
        .filter(property::Column::Status.eq(PropertyStatus::Active.as_str()))
        .filter(property::Column::DeletedAt.is_null());

    if let Some(location) = search
        .location
        .as_deref()
        .map(str::trim)
        .filter(|location| !location.is_empty())
    {
        let pattern = format!("%{}%", location.to_lowercase());
        query = query.filter(
            Expr::expr(Func::lower(Expr::col(property::Column::Location))).like(pattern),
        );
    }

    if let Some(min_budget) = search.min_budget {
        query = query.filter(property::Column::RentAmount.gte(min_budget));
    }

    if let Some(max_budget) = search.max_budget {
        query = query.filter(property::Column::RentAmount.lte(max_budget));
    }

    if let Some(bedrooms) = search.bedrooms {
        query = query.filter(property::Column::Bedrooms.eq(bedrooms));
    }

    if let Some(bathrooms) = search.bathrooms {
        query = query.filter(property::Column::Bathrooms.gte(bathrooms));
    }

    if let Some(property_type) = search.property_type {
        query = query.filter(property::Column::PropertyType.eq(property_type.as_str()));
    }

    query = match search.sort {
        SortOrder::Newest => query.order_by_desc(property::Column::CreatedAt),
        SortOrder::PriceLow => query.order_by_asc(property::Column::RentAmount),
        SortOrder::PriceHigh => query.order_by_desc(property::Column::RentAmount),
    };

    let total = query.clone().count(db).await?;

    let properties = query
        .offset(page_offset(search.page, search.limit))
        .limit(search.limit)
        .all(db)
        .await?;

    Ok((properties, total))
}

/// Number of live active listings per landlord
pub async fn count_active_properties(
    db: &DatabaseConnection,
    landlord_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, u64>> {
    if landlord_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let counts = Property::find()
        .select_only()
        .column(property::Column::LandlordId)
        .column_as(Expr::col(property::Column::Id).count(), "count")
        .filter(property::Column::LandlordId.is_in(landlord_ids))
        .filter(property::Column::Status.eq(PropertyStatus::Active.as_str()))
        .filter(property::Column::DeletedAt.is_null())
        .group_by(property::Column::LandlordId)
        .into_tuple::<(Uuid, i64)>()
        .all(db)
        .await?;

    Ok(counts
        .into_iter()
        .map(|(landlord_id, count)| (landlord_id, count.max(0) as u64))
        .collect())
}

/// Bump the view counter in SQL and return the fresh row
pub async fn increment_view_count(
    db: &DatabaseConnection,
    property_id: Uuid,
) -> Result<Option<property::Model>> {
    Property::update_many()
        .col_expr(
            property::Column::ViewCount,
            Expr::col(property::Column::ViewCount).add(1),
        )
        .filter(property::Column::Id.eq(property_id))
        .exec(db)
        .await?;

    get_property_by_id(db, property_id).await
}

pub async fn increment_application_count<C: ConnectionTrait>(db: &C, property_id: Uuid) -> Result<()> {
    Property::update_many()
        .col_expr(
            property::Column::ApplicationCount,
            Expr::col(property::Column::ApplicationCount).add(1),
        )
        .filter(property::Column::Id.eq(property_id))
        .exec(db)
        .await?;

    Ok(())
}

pub async fn increment_favorite_count<C: ConnectionTrait>(db: &C, property_id: Uuid) -> Result<()> {
    Property::update_many()
        .col_expr(
            property::Column::FavoriteCount,
            Expr::col(property::Column::FavoriteCount).add(1),
        )
        .filter(property::Column::Id.eq(property_id))
        .exec(db)
        .await?;

    Ok(())
}

/// Decrement that never takes the counter below zero
pub async fn decrement_favorite_count<C: ConnectionTrait>(db: &C, property_id: Uuid) -> Result<()> {
    Property::update_many()
        .col_expr(
            property::Column::FavoriteCount,
            Expr::col(property::Column::FavoriteCount).sub(1),
        )
        .filter(property::Column::Id.eq(property_id))
        .filter(property::Column::FavoriteCount.gt(0))
        .exec(db)
        .await?;

    Ok(())
}

pub async fn mark_rented<C: ConnectionTrait>(db: &C, property_id: Uuid) -> Result<()> {
    Property::update_many()
        .col_expr(
            property::Column::Status,
            Expr::value(PropertyStatus::Rented.as_str()),
        )
        .col_expr(property::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(property::Column::Id.eq(property_id))
        .exec(db)
        .await?;

    Ok(())
}

/// Apply the fields present in `changes`
pub async fn update_property(
    db: &DatabaseConnection,
    property: property::Model,
    changes: PropertyUpdate,
) -> Result<property::Model> {
    let mut property: property::ActiveModel = property.into();

    if let Some(title) = changes.title {
        property.title = Set(title);
    }
    if let Some(description) = changes.description {
        property.description = Set(Some(description));
    }
    if let Some(rent_amount) = changes.rent_amount {
        property.rent_amount = Set(rent_amount);
    }
    if let Some(security_deposit) = changes.security_deposit {
        property.security_deposit = Set(Some(security_deposit));
    }
    if let Some(location) = changes.location {
        property.location = Set(location);
    }
    if let Some(address) = changes.address {
        property.address = Set(Some(address));
    }
    if let Some(bedrooms) = changes.bedrooms {
        property.bedrooms = Set(bedrooms);
    }
    if let Some(bathrooms) = changes.bathrooms {
        property.bathrooms = Set(bathrooms);
    }
    if let Some(square_feet) = changes.square_feet {
        property.square_feet = Set(Some(square_feet));
    }
    if let Some(property_type) = changes.property_type {
        property.property_type = Set(property_type.as_str().to_string());
    }
    if let Some(amenities) = changes.amenities {
        property.amenities = Set(json_list(amenities));
    }
    if let Some(photos) = changes.photos {
        property.photos = Set(json_list(photos));
    }
    if let Some(availability_start) = changes.availability_start {
        property.availability_start = Set(Some(availability_start));
    }
    if let Some(status) = changes.status {
        property.status = Set(status.as_str().to_string());
    }
    property.updated_at = Set(chrono::Utc::now());

    let property = property.update(db).await?;
    Ok(property)
}

pub async fn soft_delete_property(
    db: &DatabaseConnection,
    property: property::Model,
) -> Result<property::Model> {
    let now = chrono::Utc::now();
    let mut property: property::ActiveModel = property.into();
    property.deleted_at = Set(Some(now));
    property.status = Set(PropertyStatus::Inactive.as_str().to_string());
    property.updated_at = Set(now);

    let property = property.update(db).await?;
    Ok(property)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Sunny 2-Bed Flat, Lekki!"), "sunny-2-bed-flat-lekki");
        assert_eq!(slugify("  --Yaba  Studio--  "), "yaba-studio");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_unique_slug_suffix() {
        let id = Uuid::new_v4();
        let slug = unique_slug("Cosy Studio in Yaba", id);
        assert!(slug.starts_with("cosy-studio-in-yaba-"));
        assert_eq!(slug.len(), "cosy-studio-in-yaba-".len() + 8);

        assert_eq!(unique_slug("***", id).len(), 8);
    }
}
