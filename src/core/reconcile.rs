//! Reconciliation pass for the incrementally maintained tallies.
//!
//! Block tracked counters and household occupant counts are adjusted in place by
//! status changes and user moves. Anything that edits rows outside those paths can
//! make them drift; this pass recomputes both from source rows, writes the corrected
//! values, and logs every discrepancy it fixed.

use std::collections::HashMap;

use crate::{
    core::block::{TRACKED_STATUSES, TrackedCounters},
    entities::{Block, Household, HouseholdStatus, User, block, household, user},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::{info, warn};

/// A single value the pass corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    /// Block or household id
    pub record: String,
    /// Column that drifted
    pub field: &'static str,
    /// Value found in the row
    pub recorded: i64,
    /// Value recomputed from source rows
    pub actual: i64,
}

/// Everything one pass looked at and changed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// Blocks whose counters were recomputed
    pub blocks_checked: usize,
    /// Households whose occupants were recounted
    pub households_checked: usize,
    /// Every value that had drifted, in fix order
    pub corrections: Vec<Correction>,
}

impl ReconcileReport {
    /// True when nothing had drifted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.corrections.is_empty()
    }
}

/// Recomputes all block counters and household occupant counts in one transaction.
pub async fn reconcile(db: &DatabaseConnection) -> Result<ReconcileReport> {
    let txn = db.begin().await?;
    let mut report = ReconcileReport::default();

    let households = Household::find()
        .order_by_asc(household::Column::Id)
        .all(&txn)
        .await?;

    let mut by_block: HashMap<&str, Vec<HouseholdStatus>> = HashMap::new();
    for h in &households {
        by_block.entry(h.block_id.as_str()).or_default().push(h.status);
    }

    for block in Block::find().order_by_asc(block::Column::Id).all(&txn).await? {
        report.blocks_checked += 1;
        let recorded = TrackedCounters::from_block(&block);
        let actual = TrackedCounters::tally(
            by_block
                .get(block.id.as_str())
                .into_iter()
                .flatten()
                .copied(),
        );
        if recorded == actual {
            continue;
        }

        for status in TRACKED_STATUSES {
            let (Some(was), Some(now)) = (recorded.get(status), actual.get(status)) else {
                continue;
            };
            if was != now {
                warn!(block = %block.id, status = status.label(), was, now, "Block counter drifted");
                report.corrections.push(Correction {
                    record: block.id.clone(),
                    field: counter_field(status),
                    recorded: i64::from(was),
                    actual: i64::from(now),
                });
            }
        }

        let mut active: block::ActiveModel = block.into();
        actual.write_to(&mut active);
        active.update(&txn).await?;
    }

    let mut live: HashMap<String, i64> = HashMap::new();
    for u in User::find()
        .filter(user::Column::HouseholdId.is_not_null())
        .all(&txn)
        .await?
    {
        if let Some(id) = u.household_id {
            *live.entry(id).or_default() += 1;
        }
    }

    for h in households {
        report.households_checked += 1;
        let actual = live.get(&h.id).copied().unwrap_or(0);
        let recorded = i64::from(h.occupants);
        if recorded == actual {
            continue;
        }

        warn!(household = %h.id, was = recorded, now = actual, "Occupant count drifted");
        report.corrections.push(Correction {
            record: h.id.clone(),
            field: "occupants",
            recorded,
            actual,
        });

        let mut active: household::ActiveModel = h.into();
        active.occupants = Set(i32::try_from(actual).unwrap_or(i32::MAX));
        active.update(&txn).await?;
    }

    txn.commit().await?;

    info!(
        blocks = report.blocks_checked,
        households = report.households_checked,
        corrections = report.corrections.len(),
        "Reconciliation finished"
    );
    Ok(report)
}

const fn counter_field(status: HouseholdStatus) -> &'static str {
    match status {
        HouseholdStatus::UnderRenovation => "underRenovation",
        HouseholdStatus::UpcomingRenovation => "upcomingRenovation",
        _ => "underConstruction",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{
        block::get_block_by_id, household::require_household,
        occupancy::assign_user_to_household,
    };
    use crate::entities::UserType;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_reconcile_repairs_block_counter() -> Result<()> {
        let db = setup_seeded_db().await?;
        force_block_counters(
            &db,
            "A",
            TrackedCounters {
                under_renovation: 0,
                upcoming_renovation: 4,
                under_construction: 0,
            },
        )
        .await?;

        let report = reconcile(&db).await?;

        let block = get_block_by_id(&db, "A").await?.unwrap();
        assert_eq!(block.under_renovation, 1);
        assert_eq!(block.upcoming_renovation, 0);
        assert!(report.corrections.contains(&Correction {
            record: "A".to_string(),
            field: "underRenovation",
            recorded: 0,
            actual: 1,
        }));
        assert!(report.corrections.contains(&Correction {
            record: "A".to_string(),
            field: "upcomingRenovation",
            recorded: 4,
            actual: 0,
        }));
        Ok(())
    }

    #[tokio::test]
    async fn test_reconcile_sets_occupants_from_users() -> Result<()> {
        let db = setup_seeded_db().await?;
        let user = create_test_user(&db, "Ana", UserType::Customer).await?;
        assign_user_to_household(&db, user.id, "B", "B1").await?;

        let report = reconcile(&db).await?;

        assert_eq!(report.blocks_checked, 2);
        assert_eq!(report.households_checked, 20);
        // Seed tallies (A2 = 3, A5 = 2) have no backing users
        assert_eq!(require_household(&db, "A2").await?.occupants, 0);
        assert_eq!(require_household(&db, "A5").await?.occupants, 0);
        assert_eq!(require_household(&db, "B1").await?.occupants, 1);

        // A second pass finds nothing left to fix
        assert!(reconcile(&db).await?.is_clean());
        Ok(())
    }
}
