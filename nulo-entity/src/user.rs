use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// Starting trust score for every new account
pub const BASE_TRUST_SCORE: i32 = 50;

/// Upper bound for trust scores
pub const MAX_TRUST_SCORE: i32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Login email, stored lowercase
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub phone_number: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,

    /// One of `tenant`, `landlord`, `admin`
    pub user_type: String,

    #[sea_orm(default_value = 50)]
    pub trust_score: i32,

    /// One of `pending`, `approved`, `rejected`, `partial`
    pub verification_status: String,

    pub last_login_at: Option<ChronoDateTimeUtc>,
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
            trust_score: Set(BASE_TRUST_SCORE),
            verification_status: Set("partial".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }
}

impl Model {
    /// Landlord listings show a verified badge only for approved accounts
    pub fn is_verified(&self) -> bool {
        self.verification_status == "approved"
    }

    /// Trust score after a bonus, capped at the maximum
    pub fn trust_score_with_bonus(&self, bonus: i32) -> i32 {
        (self.trust_score + bonus).clamp(0, MAX_TRUST_SCORE)
    }
}
