use crate::error::{AppError, Result};
use nulo_entity::{prelude::*, tenant, user};
use nulo_types::{CompleteProfileData, TenantProfileUpdate, VerificationStatus};
use sea_orm::*;
use serde_json::json;
use uuid::Uuid;

/// Trust score granted once onboarding is finished
pub const COMPLETED_PROFILE_TRUST_SCORE: i32 = 70;

/// Extra trust for joining the rent credit programme
pub const RENT_CREDIT_TRUST_BONUS: i32 = 10;

pub fn completed_trust_score(join_rent_credit: bool) -> i32 {
    if join_rent_credit {
        COMPLETED_PROFILE_TRUST_SCORE + RENT_CREDIT_TRUST_BONUS
    } else {
        COMPLETED_PROFILE_TRUST_SCORE
    }
}

pub async fn get_tenant(db: &DatabaseConnection, tenant_id: Uuid) -> Result<tenant::Model> {
    Tenant::find_by_id(tenant_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant profile not found".to_string()))
}

/// Apply the fields present in `changes` and store the recomputed completion
pub async fn update_tenant_profile(
    db: &DatabaseConnection,
    tenant: tenant::Model,
    changes: TenantProfileUpdate,
) -> Result<tenant::Model> {
    let mut updated = tenant.clone();

    if let Some(budget) = changes.budget {
        updated.budget = Some(budget);
    }
    if let Some(preferred_location) = changes.preferred_location {
        updated.preferred_location = Some(preferred_location);
    }
    if let Some(move_in_date) = changes.move_in_date {
        updated.move_in_date = Some(move_in_date);
    }
    if let Some(preferences) = changes.preferences {
        updated.preferences = preferences;
    }
    updated.profile_completion = updated.profile_completion();

    let mut active: tenant::ActiveModel = tenant.into();
    active.budget = Set(updated.budget);
    active.preferred_location = Set(updated.preferred_location);
    active.move_in_date = Set(updated.move_in_date);
    active.preferences = Set(updated.preferences);
    active.profile_completion = Set(updated.profile_completion);
    active.updated_at = Set(chrono::Utc::now());

    let tenant = active.update(db).await?;
    Ok(tenant)
}

/// Store the wizard payload, unlock applications and raise the trust score
pub async fn complete_profile(
    db: &DatabaseConnection,
    tenant: tenant::Model,
    data: CompleteProfileData,
) -> Result<(tenant::Model, user::Model)> {
    let now = chrono::Utc::now();
    let tenant_id = tenant.id;

    let mut documents = json!({
        "id_document": data.id_document_url,
        "proof_of_income": data.proof_of_income_url,
    });
    let references: Vec<String> = [data.reference1_email, data.reference2_email]
        .into_iter()
        .flatten()
        .collect();
    if !references.is_empty() {
        documents["references"] = json!(references);
    }

    let preferences = json!({
        "bedrooms": data.bedrooms,
        "move_in_date": data.move_in_date,
        "join_rent_credit": data.join_rent_credit,
    });

    let txn = db.begin().await?;

    let mut active: tenant::ActiveModel = tenant.into();
    active.budget = Set(Some(data.budget));
    active.preferred_location = Set(Some(data.preferred_location));
    if data.move_in_date.is_some() {
        active.move_in_date = Set(data.move_in_date);
    }
    active.preferences = Set(preferences);
    active.documents = Set(documents);
    active.profile_completion = Set(tenant::FULL_COMPLETION);
    active.onboarding_completed = Set(true);
    active.profile_completed_at = Set(Some(now));
    active.updated_at = Set(now);
    let tenant = active.update(&txn).await?;

    let user = User::find_by_id(tenant_id)
        .one(&txn)
        .await?
        .ok_or_else(AppError::credentials)?;

    let mut user: user::ActiveModel = user.into();
    user.trust_score = Set(completed_trust_score(data.join_rent_credit));
    user.verification_status = Set(VerificationStatus::Approved.as_str().to_string());
    user.updated_at = Set(now);
    let user = user.update(&txn).await?;

    txn.commit().await?;

    Ok((tenant, user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_trust_score() {
        assert_eq!(completed_trust_score(false), 70);
        assert_eq!(completed_trust_score(true), 80);
    }
}
