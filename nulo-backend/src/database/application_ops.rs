use crate::error::{AppError, Result};
use nulo_entity::{application, prelude::*, property, transaction, user};
use nulo_types::{ApplicationCreate, ApplicationStatus, TransactionStatus};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use super::{duplicate_as_bad_request, property_ops};

/// Trust bonus both parties earn when an application is approved
pub const APPROVAL_TRUST_BONUS: i32 = 5;

const ESCROW_NOTE: &str = "Mock escrow - payment held pending approval";

const ALREADY_APPLIED: &str = "You have already applied for this property";

pub async fn get_application_by_id(
    db: &DatabaseConnection,
    application_id: Uuid,
) -> Result<Option<application::Model>> {
    let application = Application::find_by_id(application_id).one(db).await?;
    Ok(application)
}

pub async fn get_existing_application(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    property_id: Uuid,
) -> Result<Option<application::Model>> {
    let application = Application::find()
        .filter(application::Column::TenantId.eq(tenant_id))
        .filter(application::Column::PropertyId.eq(property_id))
        .one(db)
        .await?;

    Ok(application)
}

/// Create the application, hold the rent in escrow and bump the property counter
pub async fn submit_application(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    property: &property::Model,
    data: ApplicationCreate,
) -> Result<(application::Model, transaction::Model)> {
    if get_existing_application(db, tenant_id, property.id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(ALREADY_APPLIED.to_string()));
    }

    let txn = db.begin().await?;

    let application = application::ActiveModel {
        tenant_id: Set(tenant_id),
        property_id: Set(property.id),
        message: Set(data.message),
        proposed_move_in_date: Set(data.proposed_move_in_date),
        ..application::ActiveModel::new()
    }
    .insert(&txn)
    .await
    .map_err(|e| duplicate_as_bad_request(e, ALREADY_APPLIED))?;

    let escrow = transaction::ActiveModel {
        application_id: Set(application.id),
        tenant_id: Set(tenant_id),
        landlord_id: Set(property.landlord_id),
        property_id: Set(property.id),
        amount: Set(property.rent_amount),
        status: Set(TransactionStatus::Held.as_str().to_string()),
        held_at: Set(Some(chrono::Utc::now())),
        notes: Set(Some(ESCROW_NOTE.to_string())),
        ..transaction::ActiveModel::new()
    }
    .insert(&txn)
    .await?;

    property_ops::increment_application_count(&txn, property.id).await?;

    txn.commit().await?;

    Ok((application, escrow))
}

/// A tenant's applications, newest first
pub async fn list_for_tenant(
    db: &DatabaseConnection,
    tenant_id: Uuid,
) -> Result<Vec<application::Model>> {
    let applications = Application::find()
        .filter(application::Column::TenantId.eq(tenant_id))
        .order_by_desc(application::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(applications)
}

/// Applications to any of the landlord's properties, newest first
pub async fn list_for_landlord(
    db: &DatabaseConnection,
    landlord_id: Uuid,
) -> Result<Vec<application::Model>> {
    let property_ids = property_ops::get_property_ids_for_landlord(db, landlord_id).await?;
    if property_ids.is_empty() {
        return Ok(Vec::new());
    }

    let applications = Application::find()
        .filter(application::Column::PropertyId.is_in(property_ids))
        .order_by_desc(application::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(applications)
}

pub async fn get_transaction_for_application(
    db: &DatabaseConnection,
    application_id: Uuid,
) -> Result<Option<transaction::Model>> {
    let escrow = transaction::Entity::find()
        .filter(transaction::Column::ApplicationId.eq(application_id))
        .one(db)
        .await?;

    Ok(escrow)
}

async fn set_escrow_status<C: ConnectionTrait>(
    db: &C,
    application_id: Uuid,
    status: TransactionStatus,
) -> Result<()> {
    let now = chrono::Utc::now();
    let timestamp_column = match status {
        TransactionStatus::Held => transaction::Column::HeldAt,
        TransactionStatus::Released => transaction::Column::ReleasedAt,
        TransactionStatus::Refunded => transaction::Column::RefundedAt,
    };

    transaction::Entity::update_many()
        .col_expr(transaction::Column::Status, Expr::value(status.as_str()))
        .col_expr(timestamp_column, Expr::value(now))
        .filter(transaction::Column::ApplicationId.eq(application_id))
        .exec(db)
        .await?;

    Ok(())
}

async fn add_trust_bonus<C: ConnectionTrait>(db: &C, user_id: Uuid, bonus: i32) -> Result<()> {
    let Some(user) = User::find_by_id(user_id).one(db).await? else {
        return Ok(());
    };

    let trust_score = user.trust_score_with_bonus(bonus);
    let mut user: user::ActiveModel = user.into();
    user.trust_score = Set(trust_score);
    user.updated_at = Set(chrono::Utc::now());
    user.update(db).await?;

    Ok(())
}

fn already_decided(status: &str) -> AppError {
    AppError::BadRequest(format!("Application is already {}", status))
}

fn ensure_pending(application: &application::Model) -> Result<()> {
    let pending = application
        .status
        .parse::<ApplicationStatus>()
        .map(|status| status.is_pending())
        .unwrap_or(false);

    if pending {
        Ok(())
    } else {
        Err(already_decided(&application.status))
    }
}

enum Decision {
    Approve,
    Reject { reason: String, reason_code: String },
}

/// Move the application out of a pending status inside `txn`.
///
/// The status guard lives in the UPDATE itself, so of two concurrent decisions
/// only one matches the row; the other sees zero rows and gets the winner's status.
async fn record_decision(
    txn: &DatabaseTransaction,
    application_id: Uuid,
    landlord_id: Uuid,
    decision: Decision,
) -> Result<application::Model> {
    let now = chrono::Utc::now();
    let pending: Vec<&str> = ApplicationStatus::ALL
        .iter()
        .filter(|status| status.is_pending())
        .map(|status| status.as_str())
        .collect();

    let update = Application::update_many()
        .col_expr(application::Column::ReviewedAt, Expr::value(now))
        .col_expr(application::Column::ReviewedBy, Expr::value(landlord_id))
        .col_expr(application::Column::UpdatedAt, Expr::value(now));

    let update = match decision {
        Decision::Approve => update.col_expr(
            application::Column::Status,
            Expr::value(ApplicationStatus::Approved.as_str()),
        ),
        Decision::Reject {
            reason,
            reason_code,
        } => update
            .col_expr(
                application::Column::Status,
                Expr::value(ApplicationStatus::Rejected.as_str()),
            )
            .col_expr(application::Column::RejectionReason, Expr::value(reason))
            .col_expr(application::Column::ReasonCode, Expr::value(reason_code)),
    };

    let result = update
        .filter(application::Column::Id.eq(application_id))
        .filter(application::Column::Status.is_in(pending))
        .exec(txn)
        .await?;

    let application = Application::find_by_id(application_id)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    if result.rows_affected == 0 {
        return Err(already_decided(&application.status));
    }

    Ok(application)
}

/// Approve, release the escrow, mark the property rented and reward both parties
pub async fn approve_application(
    db: &DatabaseConnection,
    application: application::Model,
    landlord_id: Uuid,
) -> Result<application::Model> {
    ensure_pending(&application)?;

    let txn = db.begin().await?;

    let application = record_decision(&txn, application.id, landlord_id, Decision::Approve).await?;

    set_escrow_status(&txn, application.id, TransactionStatus::Released).await?;
    property_ops::mark_rented(&txn, application.property_id).await?;
    add_trust_bonus(&txn, application.tenant_id, APPROVAL_TRUST_BONUS).await?;
    add_trust_bonus(&txn, landlord_id, APPROVAL_TRUST_BONUS).await?;

    txn.commit().await?;

    Ok(application)
}

/// Reject with the landlord's reason and refund the escrow
pub async fn reject_application(
    db: &DatabaseConnection,
    application: application::Model,
    landlord_id: Uuid,
    reason: String,
    reason_code: String,
) -> Result<application::Model> {
    ensure_pending(&application)?;

    let txn = db.begin().await?;

    let decision = Decision::Reject {
        reason,
        reason_code,
    };
    let application = record_decision(&txn, application.id, landlord_id, decision).await?;

    set_escrow_status(&txn, application.id, TransactionStatus::Refunded).await?;

    txn.commit().await?;

    Ok(application)
}
