use crate::error::Result;
use nulo_entity::{message, prelude::*};
use nulo_types::MessageCreate;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

pub async fn send_message(
    db: &DatabaseConnection,
    sender_id: Uuid,
    data: MessageCreate,
) -> Result<message::Model> {
    let message = message::ActiveModel {
        sender_id: Set(sender_id),
        recipient_id: Set(data.recipient_id),
        content: Set(data.content),
        property_id: Set(data.property_id),
        application_id: Set(data.application_id),
        ..message::ActiveModel::new()
    }
    .insert(db)
    .await?;

    Ok(message)
}

/// Every message the user sent or received, newest first
pub async fn messages_involving(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<message::Model>> {
    let messages = Message::find()
        .filter(
            Condition::any()
                .add(message::Column::SenderId.eq(user_id))
                .add(message::Column::RecipientId.eq(user_id)),
        )
        .order_by_desc(message::Column::Timestamp)
        .all(db)
        .await?;

    Ok(messages)
}

pub async fn count_unread_from(
    db: &DatabaseConnection,
    sender_id: Uuid,
    recipient_id: Uuid,
) -> Result<u64> {
    let count = Message::find()
        .filter(message::Column::SenderId.eq(sender_id))
        .filter(message::Column::RecipientId.eq(recipient_id))
        .filter(message::Column::Read.eq(false))
        .count(db)
        .await?;

    Ok(count)
}

/// Both directions of a conversation, oldest first
pub async fn get_thread(
    db: &DatabaseConnection,
    user_id: Uuid,
    partner_id: Uuid,
) -> Result<Vec<message::Model>> {
    let messages = Message::find()
        .filter(
            Condition::any()
                .add(
                    Condition::all()
                        .add(message::Column::SenderId.eq(user_id))
                        .add(message::Column::RecipientId.eq(partner_id)),
                )
                .add(
                    Condition::all()
                        .add(message::Column::SenderId.eq(partner_id))
                        .add(message::Column::RecipientId.eq(user_id)),
                ),
        )
        .order_by_asc(message::Column::Timestamp)
        .all(db)
        .await?;

    Ok(messages)
}

/// Mark everything `sender_id` sent to `recipient_id` as read
pub async fn mark_read(db: &DatabaseConnection, sender_id: Uuid, recipient_id: Uuid) -> Result<u64> {
    let result = Message::update_many()
        .col_expr(message::Column::Read, Expr::value(true))
        .col_expr(message::Column::ReadAt, Expr::value(chrono::Utc::now()))
        .filter(message::Column::SenderId.eq(sender_id))
        .filter(message::Column::RecipientId.eq(recipient_id))
        .filter(message::Column::Read.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
