use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// Access token revoked by logout; kept until the token would expire anyway
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "revoked_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,

    /// Token id (`jti` claim)
    #[sea_orm(unique)]
    pub jti: Uuid,

    pub user_id: Uuid,
    pub expires_at: ChronoDateTimeUtc,
    pub revoked_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            revoked_at: Set(chrono::Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}

