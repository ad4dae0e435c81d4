use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "landlords")]
pub struct Model {
    /// Same id as the owning user
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// JSON array of ownership document URLs
    pub ownership_docs: Json,

    pub verification_submitted_at: Option<ChronoDateTimeUtc>,
    pub verification_approved_at: Option<ChronoDateTimeUtc>,

    pub guarantee_joined: bool,

    pub guarantee_contribution: f64,
    pub bank_account_number: Option<String>,
    pub bank_name: Option<String>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            ownership_docs: Set(serde_json::json!([])),
            guarantee_joined: Set(false),
            guarantee_contribution: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }
}

impl Model {
    pub fn ownership_doc_urls(&self) -> Vec<String> {
        self.ownership_docs
            .as_array()
            .map(|docs| {
                docs.iter()
                    .filter_map(|doc| doc.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
