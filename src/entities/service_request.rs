//! Service request entity - A resident asking the admin for something
//! (gate pass, repair, document).
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service request database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_requests")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Requesting user
    pub user_id: i64,
    /// Kind of service requested
    pub request_type: String,
    /// Free-text details
    pub details: String,
    /// Filing time
    pub created_at: DateTimeUtc,
}

/// Requests reference users by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
