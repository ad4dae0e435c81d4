use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{TenantProfile, VerificationStatus};

// Request types
#[derive(Serialize, Deserialize, Clone, Debug, Default, Validate, ToSchema)]
pub struct TenantProfileUpdate {
    #[validate(range(min = 0.0))]
    pub budget: Option<f64>,
    pub preferred_location: Option<String>,
    pub move_in_date: Option<NaiveDate>,
    #[schema(value_type = Option<Object>)]
    pub preferences: Option<serde_json::Value>,
}

/// Payload of the three-step onboarding wizard
#[derive(Serialize, Deserialize, Clone, Debug, Validate, ToSchema)]
pub struct CompleteProfileData {
    // Step 1: preferences
    #[validate(range(exclusive_min = 0.0))]
    pub budget: f64,
    #[validate(length(min = 1))]
    pub preferred_location: String,
    #[validate(range(min = 0, max = 20))]
    pub bedrooms: i32,
    pub move_in_date: Option<NaiveDate>,

    // Step 2: documents
    #[validate(length(min = 1))]
    pub id_document_url: String,
    #[validate(length(min = 1))]
    pub proof_of_income_url: String,
    #[validate(email)]
    pub reference1_email: Option<String>,
    #[validate(email)]
    pub reference2_email: Option<String>,

    // Step 3: rent credit
    #[serde(default)]
    pub join_rent_credit: bool,
}

// Response types
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct TenantProfileResponse {
    pub success: bool,
    pub profile: TenantProfile,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ProfileStatusResponse {
    pub profile_completion: i32,
    pub onboarding_completed: bool,
    pub trust_score: i32,
    pub verification_status: VerificationStatus,
    pub missing_fields: Vec<String>,
    pub can_apply: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CompleteProfileResponse {
    pub success: bool,
    pub message: String,
    pub profile: TenantProfile,
    pub trust_score: i32,
}
