//! User entity - Residents, guards and administrators.
//!
//! `block_id`/`household_id` record where a customer lives. Guards never carry a
//! household. The household reference is deliberately not a foreign key: occupancy is
//! tallied on the household row and kept in step by `core::occupancy`.

use super::status::UserType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Login name; unique across all users
    #[sea_orm(unique)]
    pub email: String,
    /// Stored as entered and compared verbatim at login
    #[serde(skip_serializing, default)]
    pub password: String,
    pub user_type: UserType,
    /// Block of the user's household
    pub block_id: Option<String>,
    /// Household the user occupies; never set for guards
    pub household_id: Option<String>,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Users have no enforced relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
