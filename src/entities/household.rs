//! Household entity - A single residential unit inside a block.

use super::status::{HouseholdStatus, PaymentStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Household database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "households")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// `{block_id}{n}`, e.g. "A3"
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning block; never changes after seeding
    pub block_id: String,
    /// Number of residents tallied against this unit
    pub occupants: i32,
    /// Current lifecycle status
    pub status: HouseholdStatus,
    /// Latest water reading in cubic meters
    pub water_consumption: f64,
    /// Latest electricity reading in kWh
    pub electricity_consumption: f64,
    /// Billing state for the current period
    pub payment_status: PaymentStatus,
}

/// Defines relationships between Household and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each household belongs to one block
    #[sea_orm(
        belongs_to = "super::block::Entity",
        from = "Column::BlockId",
        to = "super::block::Column::Id"
    )]
    Block,
    /// Construction records filed against this household
    #[sea_orm(has_many = "super::construction::Entity")]
    Constructions,
}

impl Related<super::block::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Block.def()
    }
}

impl Related<super::construction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Constructions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
