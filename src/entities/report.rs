//! Incident report entity - Something a resident or guard flagged to the admin.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Incident report database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Reporting user
    pub user_id: i64,
    /// Free-form category (e.g. "noise", "security")
    pub category: String,
    /// What happened
    pub description: String,
    /// Filing time
    pub created_at: DateTimeUtc,
}

/// Reports reference users by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
