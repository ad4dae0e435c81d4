use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{Pagination, PropertyStatus, PropertyType, SortOrder};

fn default_city() -> String {
    "Lagos".to_string()
}

fn default_state() -> String {
    "Lagos".to_string()
}

fn default_country() -> String {
    "Nigeria".to_string()
}

fn default_bathrooms() -> i32 {
    1
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

// Request types
#[derive(Serialize, Deserialize, Clone, Debug, Validate, ToSchema)]
pub struct PropertyCreate {
    #[validate(length(min = 10, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub rent_amount: f64,
    #[validate(range(min = 0.0))]
    pub security_deposit: Option<f64>,
    #[validate(length(min = 3))]
    pub location: String,
    pub address: Option<String>,
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default = "default_country")]
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(range(min = 0, max = 20))]
    pub bedrooms: i32,
    #[serde(default = "default_bathrooms")]
    #[validate(range(min = 1, max = 10))]
    pub bathrooms: i32,
    #[validate(range(min = 1))]
    pub square_feet: Option<i32>,
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub availability_start: Option<NaiveDate>,
    #[serde(default)]
    pub status: PropertyStatus,
}

/// Partial update; absent fields are left untouched
#[derive(Serialize, Deserialize, Clone, Debug, Default, Validate, ToSchema)]
pub struct PropertyUpdate {
    #[validate(length(min = 10, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub rent_amount: Option<f64>,
    #[validate(range(min = 0.0))]
    pub security_deposit: Option<f64>,
    #[validate(length(min = 3))]
    pub location: Option<String>,
    pub address: Option<String>,
    #[validate(range(min = 0, max = 20))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 1, max = 10))]
    pub bathrooms: Option<i32>,
    #[validate(range(min = 1))]
    pub square_feet: Option<i32>,
    pub property_type: Option<PropertyType>,
    pub amenities: Option<Vec<String>>,
    pub photos: Option<Vec<String>>,
    pub availability_start: Option<NaiveDate>,
    pub status: Option<PropertyStatus>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PropertySearch {
    /// Case-insensitive substring of the listing location
    pub location: Option<String>,
    #[validate(range(min = 0.0))]
    pub min_budget: Option<f64>,
    #[validate(range(min = 0.0))]
    pub max_budget: Option<f64>,
    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,
    /// Minimum number of bathrooms
    #[validate(range(min = 1))]
    pub bathrooms: Option<i32>,
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
}

impl Default for PropertySearch {
    fn default() -> Self {
        Self {
            location: None,
            min_budget: None,
            max_budget: None,
            bedrooms: None,
            bathrooms: None,
            property_type: None,
            sort: SortOrder::default(),
            page: default_page(),
            limit: default_limit(),
        }
    }
}

// Response types
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct LandlordInfo {
    pub id: Uuid,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub trust_score: i32,
    pub verified: bool,
    pub properties_count: u64,
    pub joined_year: i32,
    pub guarantee_joined: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PropertyResponse {
    pub id: Uuid,
    pub landlord_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub rent_amount: f64,
    pub security_deposit: Option<f64>,
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
    pub property_type: PropertyType,
    pub amenities: Vec<String>,
    pub photos: Vec<String>,
    pub availability_start: Option<NaiveDate>,
    pub status: PropertyStatus,
    pub view_count: i32,
    pub favorite_count: i32,
    pub application_count: i32,
    pub slug: Option<String>,
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub landlord: Option<LandlordInfo>,
    pub is_favorited: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct PropertyListResponse {
    pub success: bool,
    pub properties: Vec<PropertyResponse>,
    pub pagination: Pagination,
}
