use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

mod application;
mod enums;
mod message;
mod property;
mod tenant;
mod user;

pub use application::*;
pub use enums::*;
pub use message::*;
pub use property::*;
pub use tenant::*;
pub use user::*;

// Request types
#[derive(Serialize, Deserialize, Clone, Debug, Validate, ToSchema)]
pub struct FavoriteCreate {
    pub property_id: Uuid,
}

// Response types
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, ToSchema)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// An empty result still reports a single page
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if total > 0 && limit > 0 {
            total.div_ceil(limit)
        } else {
            1
        };

        Self {
            total,
            page,
            limit,
            total_pages,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub docs: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CleanupResponse {
    pub items_cleaned: u64,
    pub cleanup_type: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct FavoriteResponse {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct FavoriteCreatedResponse {
    pub success: bool,
    pub message: String,
    pub favorite: FavoriteResponse,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct FavoriteListResponse {
    pub success: bool,
    pub favorites: Vec<PropertyResponse>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_up() {
        let pagination = Pagination::new(41, 1, 20);
        assert_eq!(pagination.total_pages, 3);
    }

    #[test]
    fn empty_pagination_has_one_page() {
        let pagination = Pagination::new(0, 1, 20);
        assert_eq!(pagination.total_pages, 1);
    }
}
