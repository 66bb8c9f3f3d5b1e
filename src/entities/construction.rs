//! Construction entity - A construction or renovation filed against a household.
//!
//! The record's type is a household status; registering one moves the household into
//! that status. Its phase (upcoming, in progress, completed) is derived from the dates
//! and never stored.

use super::status::HouseholdStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Construction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "constructions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Block of the household
    pub block_id: String,
    /// Household under works
    pub household_id: String,
    /// Status the household enters when the record is registered
    pub construction_type: HouseholdStatus,
    /// First day of works
    pub start_date: Date,
    /// Last day of works
    pub end_date: Date,
    /// When the record was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Construction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record belongs to one household
    #[sea_orm(
        belongs_to = "super::household::Entity",
        from = "Column::HouseholdId",
        to = "super::household::Column::Id"
    )]
    Household,
}

impl Related<super::household::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Household.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
