use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub content: String,
    pub property_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
    pub message_type: String,

    pub read: bool,
    pub read_at: Option<ChronoDateTimeUtc>,

    /// JSON array of attachment descriptors
    pub attachments: Json,

    /// When the message was sent
    pub timestamp: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            message_type: Set("text".to_string()),
            read: Set(false),
            attachments: Set(serde_json::json!([])),
            timestamp: Set(chrono::Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}

impl Model {
    /// The other side of the conversation from `user_id`'s point of view
    pub fn partner_of(&self, user_id: Uuid) -> Uuid {
        if self.sender_id == user_id {
            self.recipient_id
        } else {
            self.sender_id
        }
    }
}
