//! Construction and renovation records.
//!
//! Registering a record moves the household into the record's status through the same
//! counter adjustment as a manual status change. The record insert and the status
//! change commit together; on any failure neither is applied.

use crate::{
    core::household::{StatusChange, apply_status_change, require_household},
    entities::{Construction, HouseholdStatus, construction},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::info;

/// Where a construction record sits relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstructionPhase {
    /// Works have not started yet
    Upcoming,
    /// Between start and end, inclusive
    #[serde(rename = "In Progress")]
    InProgress,
    /// Works are over
    Completed,
}

/// Classifies a record's dates against `today`.
///
/// Both boundary days count as in progress.
#[must_use]
pub fn classify_construction(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> ConstructionPhase {
    if today < start {
        ConstructionPhase::Upcoming
    } else if today > end {
        ConstructionPhase::Completed
    } else {
        ConstructionPhase::InProgress
    }
}

/// A construction record with its phase as of a given day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionSummary {
    /// Stored record
    #[serde(flatten)]
    pub construction: construction::Model,
    /// Phase relative to the reference day
    pub phase: ConstructionPhase,
}

impl ConstructionSummary {
    /// Wraps a record, classifying it against `today`.
    #[must_use]
    pub fn new(construction: construction::Model, today: NaiveDate) -> Self {
        let phase = classify_construction(construction.start_date, construction.end_date, today);
        Self {
            construction,
            phase,
        }
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// The persisted record
    pub construction: construction::Model,
    /// The household/block update it caused
    pub status_change: StatusChange,
}

/// Persists a construction record and moves the household into `construction_type`.
///
/// # Errors
/// - [`Error::Validation`] if an id is empty, `start > end`, or the household is not in
///   `block_id`
/// - [`Error::NotFound`] if the household or its block does not exist
pub async fn register_construction(
    db: &DatabaseConnection,
    block_id: &str,
    household_id: &str,
    construction_type: HouseholdStatus,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Registration> {
    let block_id = block_id.trim();
    let household_id = household_id.trim();
    if block_id.is_empty() || household_id.is_empty() {
        return Err(Error::validation("Block and household are required"));
    }
    if start > end {
        return Err(Error::validation(format!(
            "Start date {start} is after end date {end}"
        )));
    }

    let txn = db.begin().await?;

    let household = require_household(&txn, household_id).await?;
    if household.block_id != block_id {
        return Err(Error::validation(format!(
            "Household '{household_id}' belongs to block '{}', not '{block_id}'",
            household.block_id
        )));
    }

    let record = construction::ActiveModel {
        block_id: Set(block_id.to_string()),
        household_id: Set(household_id.to_string()),
        construction_type: Set(construction_type),
        start_date: Set(start),
        end_date: Set(end),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let construction = record.insert(&txn).await?;

    let status_change = apply_status_change(&txn, household_id, construction_type).await?;

    txn.commit().await?;

    info!(
        household = household_id,
        kind = construction_type.label(),
        %start,
        %end,
        "Construction registered"
    );

    Ok(Registration {
        construction,
        status_change,
    })
}

/// Retrieves every construction record, most recent start first.
pub async fn get_all_constructions(db: &DatabaseConnection) -> Result<Vec<construction::Model>> {
    Construction::find()
        .order_by_desc(construction::Column::StartDate)
        .order_by_desc(construction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the construction records of one household, most recent start first.
pub async fn get_constructions_for_household(
    db: &DatabaseConnection,
    household_id: &str,
) -> Result<Vec<construction::Model>> {
    Construction::find()
        .filter(construction::Column::HouseholdId.eq(household_id))
        .order_by_desc(construction::Column::StartDate)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::block::get_block_by_id;
    use crate::core::household::get_household_by_id;
    use crate::test_utils::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_construction_phases() {
        let start = date(2025, 1, 1);
        let end = date(2025, 6, 1);
        assert_eq!(
            classify_construction(start, end, date(2025, 3, 1)),
            ConstructionPhase::InProgress
        );
        assert_eq!(
            classify_construction(start, end, date(2024, 12, 1)),
            ConstructionPhase::Upcoming
        );
        assert_eq!(
            classify_construction(start, end, date(2025, 7, 1)),
            ConstructionPhase::Completed
        );
    }

    #[test]
    fn test_classify_boundaries_are_in_progress() {
        let start = date(2025, 1, 1);
        let end = date(2025, 6, 1);
        assert_eq!(classify_construction(start, end, start), ConstructionPhase::InProgress);
        assert_eq!(classify_construction(start, end, end), ConstructionPhase::InProgress);
    }

    #[test]
    fn test_phase_serializes_with_space() {
        let json = serde_json::to_string(&ConstructionPhase::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }

    #[tokio::test]
    async fn test_register_construction_updates_household_and_block() -> Result<()> {
        let db = setup_seeded_db().await?;

        let registration = register_construction(
            &db,
            "A",
            "A7",
            HouseholdStatus::UpcomingRenovation,
            date(2025, 1, 1),
            date(2025, 6, 1),
        )
        .await?;

        assert_eq!(registration.construction.household_id, "A7");
        assert_eq!(
            registration.status_change.household.status,
            HouseholdStatus::UpcomingRenovation
        );
        assert_eq!(registration.status_change.block.upcoming_renovation, 1);

        let stored = get_all_constructions(&db).await?;
        assert_eq!(stored.len(), 1);
        assert_eq!(get_constructions_for_household(&db, "A7").await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejects_reversed_dates() -> Result<()> {
        let db = setup_seeded_db().await?;
        let result = register_construction(
            &db,
            "A",
            "A7",
            HouseholdStatus::UnderConstruction,
            date(2025, 6, 1),
            date(2025, 1, 1),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        assert!(get_all_constructions(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_register_missing_household_changes_nothing() -> Result<()> {
        let db = setup_seeded_db().await?;
        let before = get_block_by_id(&db, "A").await?.unwrap();

        let result = register_construction(
            &db,
            "A",
            "A42",
            HouseholdStatus::UnderConstruction,
            date(2025, 1, 1),
            date(2025, 6, 1),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        assert_eq!(get_block_by_id(&db, "A").await?.unwrap(), before);
        assert!(get_all_constructions(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejects_household_from_other_block() -> Result<()> {
        let db = setup_seeded_db().await?;
        let result = register_construction(
            &db,
            "B",
            "A7",
            HouseholdStatus::UnderConstruction,
            date(2025, 1, 1),
            date(2025, 6, 1),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let household = get_household_by_id(&db, "A7").await?.unwrap();
        assert_eq!(household.status, HouseholdStatus::Unoccupied);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejects_empty_ids() -> Result<()> {
        let db = setup_seeded_db().await?;
        let result = register_construction(
            &db,
            " ",
            "A7",
            HouseholdStatus::UnderConstruction,
            date(2025, 1, 1),
            date(2025, 6, 1),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_classifies_against_given_day() -> Result<()> {
        let db = setup_seeded_db().await?;
        let registration = register_construction(
            &db,
            "A",
            "A7",
            HouseholdStatus::UnderConstruction,
            date(2025, 1, 1),
            date(2025, 6, 1),
        )
        .await?;
        let summary = ConstructionSummary::new(registration.construction, date(2025, 7, 1));
        assert_eq!(summary.phase, ConstructionPhase::Completed);
        Ok(())
    }
}
