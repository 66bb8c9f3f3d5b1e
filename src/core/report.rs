//! Incident report business logic.
//!
//! Residents and guards file reports; the admin dashboard lists them all and the owner
//! portal lists a single user's.

use crate::{
    entities::{Report, User, report},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Fields for a new incident report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    /// Reporting user
    pub user_id: i64,
    /// Incident kind, e.g. "security"
    pub category: String,
    /// What happened
    pub description: String,
}

/// Files an incident report for an existing user.
pub async fn create_report(db: &DatabaseConnection, new_report: NewReport) -> Result<report::Model> {
    if new_report.category.trim().is_empty() || new_report.description.trim().is_empty() {
        return Err(Error::validation("Category and description are required"));
    }

    User::find_by_id(new_report.user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("User", new_report.user_id))?;

    report::ActiveModel {
        user_id: Set(new_report.user_id),
        category: Set(new_report.category.trim().to_string()),
        description: Set(new_report.description.trim().to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves every report, newest first.
pub async fn get_all_reports(db: &DatabaseConnection) -> Result<Vec<report::Model>> {
    Report::find()
        .order_by_desc(report::Column::CreatedAt)
        .order_by_desc(report::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves one user's reports, newest first.
pub async fn get_reports_for_user(db: &DatabaseConnection, user_id: i64) -> Result<Vec<report::Model>> {
    Report::find()
        .filter(report::Column::UserId.eq(user_id))
        .order_by_desc(report::Column::CreatedAt)
        .order_by_desc(report::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
