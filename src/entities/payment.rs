//! Payment entity - Dues paid by a resident.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who paid
    pub user_id: i64,
    /// Household the payment settles, if any
    pub household_id: Option<String>,
    /// Amount paid, always positive
    pub amount: f64,
    /// Payment channel (e.g. "cash", "gcash")
    pub method: String,
    /// Receipt or transfer reference
    pub reference: Option<String>,
    /// When the payment was recorded
    pub paid_at: DateTimeUtc,
}

/// Payments reference users by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
