use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub landlord_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub rent_amount: f64,
    pub security_deposit: Option<f64>,

    /// Always zero: listings never carry an agency fee
    pub agency_fee: f64,

    pub location: String,
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub square_feet: Option<i32>,

    /// One of `apartment`, `house`, `duplex`, `studio`, `penthouse`
    pub property_type: String,

    /// JSON array of strings
    pub amenities: Json,

    /// JSON array of photo URLs
    pub photos: Json,

    pub availability_start: Option<chrono::NaiveDate>,

    /// One of `draft`, `active`, `rented`, `inactive`
    pub status: String,

    #[sea_orm(default_value = 0)]
    pub view_count: i32,
    #[sea_orm(default_value = 0)]
    pub favorite_count: i32,
    #[sea_orm(default_value = 0)]
    pub application_count: i32,

    #[sea_orm(unique)]
    pub slug: Option<String>,

    pub verified: bool,
    pub verified_at: Option<ChronoDateTimeUtc>,

    /// Set on soft delete
    pub deleted_at: Option<ChronoDateTimeUtc>,

    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            agency_fee: Set(0.0),
            view_count: Set(0),
            favorite_count: Set(0),
            application_count: Set(0),
            verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }
}

impl Model {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_owned_by(&self, landlord_id: Uuid) -> bool {
        self.landlord_id == landlord_id
    }

    pub fn is_active(&self) -> bool {
        !self.is_deleted() && self.status == "active"
    }

    pub fn amenity_list(&self) -> Vec<String> {
        string_list(&self.amenities)
    }

    pub fn photo_list(&self) -> Vec<String> {
        string_list(&self.photos)
    }
}

fn string_list(value: &Json) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
