use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::UserType;

// Request types
#[derive(Serialize, Deserialize, Clone, Debug, Validate, ToSchema)]
pub struct MessageCreate {
    pub recipient_id: Uuid,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    pub property_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
}

// Response types
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct Participant {
    pub id: Uuid,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub user_type: UserType,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub content: String,
    pub property_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
    pub message_type: String,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    #[schema(value_type = Object)]
    pub attachments: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub sender: Option<Participant>,
    pub recipient: Option<Participant>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct LastMessage {
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct Conversation {
    pub user: Participant,
    pub last_message: LastMessage,
    pub unread_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ConversationListResponse {
    pub success: bool,
    pub conversations: Vec<Conversation>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct MessageThreadResponse {
    pub success: bool,
    pub messages: Vec<MessageResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct MessageSentResponse {
    pub success: bool,
    pub message: MessageResponse,
}
