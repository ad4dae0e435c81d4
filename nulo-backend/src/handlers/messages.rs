use axum::{
    extract::{Path, State},
    response::Json,
};
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::CurrentUser,
    database::{message_ops, user_ops},
    error::{AppError, Result},
    views, AppState, Conversation, ConversationListResponse, LastMessage, MessageCreate,
    MessageResponse, MessageSentResponse, MessageThreadResponse,
};

#[utoipa::path(
    get,
    path = "/api/v1/messages/conversations",
    responses(
        (status = 200, description = "One entry per conversation partner", body = ConversationListResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = [])),
    tag = "Messages"
)]
pub async fn list_conversations(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<ConversationListResponse>> {
    let user_id = current.id();
    let messages = message_ops::messages_involving(&state.db, user_id).await?;

    // Messages arrive newest first, so the first one seen per partner is the latest
    let mut seen = HashSet::new();
    let latest: Vec<_> = messages
        .into_iter()
        .filter(|message| seen.insert(message.partner_of(user_id)))
        .collect();

    let partner_ids = latest.iter().map(|m| m.partner_of(user_id)).collect();
    let partners = user_ops::get_users_by_ids(&state.db, partner_ids).await?;

    let mut conversations = Vec::with_capacity(latest.len());
    for message in latest {
        let partner_id = message.partner_of(user_id);
        let Some(partner) = partners.get(&partner_id) else {
            continue;
        };

        conversations.push(Conversation {
            user: views::participant(partner)?,
            last_message: LastMessage {
                content: message.content,
                timestamp: message.timestamp,
                read: message.read,
            },
            unread_count: message_ops::count_unread_from(&state.db, partner_id, user_id).await?,
        });
    }

    Ok(Json(ConversationListResponse {
        success: true,
        conversations,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/messages/{user_id}",
    params(("user_id" = Uuid, Path, description = "Conversation partner")),
    responses(
        (status = 200, description = "Thread, oldest first", body = MessageThreadResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = [])),
    tag = "Messages"
)]
pub async fn get_thread(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(partner_id): Path<Uuid>,
) -> Result<Json<MessageThreadResponse>> {
    let user_id = current.id();
    let thread = message_ops::get_thread(&state.db, user_id, partner_id).await?;

    let users = user_ops::get_users_by_ids(&state.db, vec![user_id, partner_id]).await?;
    let participant = |id: &Uuid| users.get(id).map(views::participant).transpose();

    let messages = thread
        .iter()
        .map(|message| -> Result<MessageResponse> {
            Ok(views::message_response(
                message,
                participant(&message.sender_id)?,
                participant(&message.recipient_id)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let marked = message_ops::mark_read(&state.db, partner_id, user_id).await?;
    if marked > 0 {
        tracing::debug!("Marked {} messages from {} as read", marked, partner_id);
    }

    Ok(Json(MessageThreadResponse {
        success: true,
        messages,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/messages",
    request_body = MessageCreate,
    responses(
        (status = 200, description = "Message sent", body = MessageSentResponse),
        (status = 404, description = "Recipient not found"),
        (status = 422, description = "Empty message")
    ),
    security(("bearer" = [])),
    tag = "Messages"
)]
pub async fn send_message(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<MessageCreate>,
) -> Result<Json<MessageSentResponse>> {
    payload.validate()?;

    let recipient = user_ops::get_user_by_id(&state.db, payload.recipient_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

    let message = message_ops::send_message(&state.db, current.id(), payload).await?;

    Ok(Json(MessageSentResponse {
        success: true,
        message: views::message_response(
            &message,
            Some(views::participant(&current.user)?),
            Some(views::participant(&recipient)?),
        ),
    }))
}
