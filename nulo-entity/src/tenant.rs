use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// Completion reached once budget and preferred location are set
pub const PREFERENCES_COMPLETION: i32 = 33;
/// Completion reached once identity and income documents are on file
pub const DOCUMENTS_COMPLETION: i32 = 67;
/// Completion reached when onboarding is finished
pub const FULL_COMPLETION: i32 = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "tenants")]
pub struct Model {
    /// Same id as the owning user
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub budget: Option<f64>,
    pub preferred_location: Option<String>,
    pub move_in_date: Option<chrono::NaiveDate>,

    /// Free-form wizard preferences (bedrooms, move-in date, rent credit)
    pub preferences: Json,

    /// Uploaded document URLs keyed by kind
    pub documents: Json,

    #[sea_orm(default_value = 0)]
    pub profile_completion: i32,

    pub onboarding_completed: bool,

    pub profile_completed_at: Option<ChronoDateTimeUtc>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            preferences: Set(serde_json::json!({})),
            documents: Set(serde_json::json!({})),
            profile_completion: Set(0),
            onboarding_completed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }
}

impl Model {
    pub fn has_preferences(&self) -> bool {
        self.budget.map(|budget| budget > 0.0).unwrap_or(false)
            && self
                .preferred_location
                .as_deref()
                .map(|location| !location.trim().is_empty())
                .unwrap_or(false)
    }

    fn has_document(&self, kind: &str) -> bool {
        self.documents
            .get(kind)
            .and_then(|value| value.as_str())
            .map(|value| !value.is_empty())
            .unwrap_or(false)
    }

    pub fn has_id_document(&self) -> bool {
        self.has_document("id_document")
    }

    pub fn has_proof_of_income(&self) -> bool {
        self.has_document("proof_of_income")
    }

    /// Onboarding progress: each later wizard step overrides the earlier ones
    pub fn profile_completion(&self) -> i32 {
        let mut completion = 0;

        if self.has_preferences() {
            completion = PREFERENCES_COMPLETION;
        }

        if self.has_id_document() && self.has_proof_of_income() {
            completion = DOCUMENTS_COMPLETION;
        }

        if self.onboarding_completed {
            completion = FULL_COMPLETION;
        }

        completion
    }

    /// Names of the onboarding fields still missing, in wizard order
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if !self.budget.map(|budget| budget > 0.0).unwrap_or(false) {
            missing.push("budget".to_string());
        }
        if self
            .preferred_location
            .as_deref()
            .map(|location| location.trim().is_empty())
            .unwrap_or(true)
        {
            missing.push("preferred_location".to_string());
        }
        if !self.has_id_document() {
            missing.push("id_document".to_string());
        }
        if !self.has_proof_of_income() {
            missing.push("proof_of_income".to_string());
        }

        missing
    }
}
