//! Block entity - An aggregate of ten households sharing an id prefix.
//!
//! Consumption totals and the three tracked counters are cached aggregates of the
//! member households. They are maintained incrementally by the core operations and
//! can be rebuilt from scratch by `core::reconcile`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Block database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blocks")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Block identifier, also the household id prefix (e.g. "A")
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name (e.g. "Block A")
    pub name: String,
    /// Number of household slots in the block
    pub total_households: i32,
    /// Sum of member household water readings
    pub water_consumption: f64,
    /// Sum of member household electricity readings
    pub electricity_consumption: f64,
    /// Households currently "Under Renovation"
    pub under_renovation: i32,
    /// Households currently "Upcoming Renovation"
    pub upcoming_renovation: i32,
    /// Households currently "Under Construction"
    pub under_construction: i32,
}

/// Defines relationships between Block and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One block has many households
    #[sea_orm(has_many = "super::household::Entity")]
    Households,
}

impl Related<super::household::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Households.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
