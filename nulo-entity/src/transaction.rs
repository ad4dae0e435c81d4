use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "NGN";
pub const DEFAULT_GATEWAY: &str = "paystack";
pub const RENT_PAYMENT: &str = "rent_payment";

/// Escrow record for the rent attached to an application
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub application_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub property_id: Uuid,
    pub amount: f64,
    pub currency: String,

    /// One of `held`, `released`, `refunded`
    pub status: String,

    pub payment_gateway: String,
    pub transaction_type: String,
    pub held_at: Option<ChronoDateTimeUtc>,
    pub released_at: Option<ChronoDateTimeUtc>,
    pub refunded_at: Option<ChronoDateTimeUtc>,
    pub notes: Option<String>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            currency: Set(DEFAULT_CURRENCY.to_string()),
            payment_gateway: Set(DEFAULT_GATEWAY.to_string()),
            transaction_type: Set(RENT_PAYMENT.to_string()),
            created_at: Set(chrono::Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}
