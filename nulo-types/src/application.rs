use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{ApplicationStatus, TransactionStatus, UserSummary};

// Request types
#[derive(Serialize, Deserialize, Clone, Debug, Validate, ToSchema)]
pub struct ApplicationCreate {
    pub property_id: Uuid,
    pub message: Option<String>,
    pub proposed_move_in_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Validate, ToSchema)]
pub struct ApplicationReject {
    #[validate(length(min = 1))]
    pub reason: String,
    #[validate(length(min = 1))]
    pub reason_code: String,
}

// Response types
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PropertySummary {
    pub id: Uuid,
    pub landlord_id: Uuid,
    pub title: String,
    pub location: String,
    pub rent_amount: f64,
    pub photos: Vec<String>,
    pub landlord: Option<UserSummary>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub status: ApplicationStatus,
    pub message: Option<String>,
    pub proposed_move_in_date: Option<NaiveDate>,
    #[schema(value_type = Object)]
    pub documents: serde_json::Value,
    pub rejection_reason: Option<String>,
    pub reason_code: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub property: Option<PropertySummary>,
    pub tenant: Option<UserSummary>,
}

/// Mock escrow ledger entry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub application_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub property_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub status: TransactionStatus,
    pub payment_gateway: String,
    pub transaction_type: String,
    pub held_at: Option<DateTime<Utc>>,
    pub released_at: Option<DateTime<Utc>>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ApplicationCreatedResponse {
    pub success: bool,
    pub application: ApplicationResponse,
    pub transaction: Option<TransactionResponse>,
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ApplicationListResponse {
    pub success: bool,
    pub applications: Vec<ApplicationResponse>,
}
