use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{UserType, VerificationStatus};

// Request types
#[derive(Serialize, Deserialize, Clone, Debug, Validate, ToSchema)]
pub struct UserRegister {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 2))]
    pub full_name: String,
    pub user_type: UserType,
    pub phone_number: Option<String>,
}

/// Login body. Not validated: any email/password pair that fails to match
/// an account answers 401, malformed or not.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, Validate, ToSchema)]
pub struct UserUpdate {
    #[validate(length(min = 2))]
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
}

// Response types
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct TenantProfile {
    pub budget: Option<f64>,
    pub preferred_location: Option<String>,
    pub move_in_date: Option<NaiveDate>,
    #[schema(value_type = Object)]
    pub preferences: serde_json::Value,
    #[schema(value_type = Object)]
    pub documents: serde_json::Value,
    pub profile_completion: i32,
    pub onboarding_completed: bool,
    pub profile_completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct LandlordProfile {
    pub ownership_docs: Vec<String>,
    pub verification_submitted_at: Option<DateTime<Utc>>,
    pub verification_approved_at: Option<DateTime<Utc>>,
    pub guarantee_joined: bool,
    pub guarantee_contribution: f64,
    pub bank_account_number: Option<String>,
    pub bank_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub phone_number: Option<String>,
    pub user_type: UserType,
    pub trust_score: i32,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
    pub tenant_profile: Option<TenantProfile>,
    pub landlord_profile: Option<LandlordProfile>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub message: Option<String>,
}

/// Compact user card embedded in application listings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub trust_score: i32,
}
