use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub tenant_id: Uuid,
    pub property_id: Uuid,

    /// One of `submitted`, `under_review`, `approved`, `rejected`
    pub status: String,

    pub message: Option<String>,
    pub proposed_move_in_date: Option<chrono::NaiveDate>,
    pub documents: Json,
    pub rejection_reason: Option<String>,
    pub reason_code: Option<String>,
    pub reviewed_at: Option<ChronoDateTimeUtc>,

    /// Landlord who approved or rejected the application
    pub reviewed_by: Option<Uuid>,

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
            status: Set("submitted".to_string()),
            documents: Set(serde_json::json!({})),
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }
}
