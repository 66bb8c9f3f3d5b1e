//! Block business logic - Reads and the aggregate helpers that keep block rows in step
//! with their households.
//!
//! The three tracked counters are maintained incrementally through
//! [`TrackedCounters::apply_transition`]; consumption totals are recomputed from the
//! member households by [`refresh_block_consumption`].

use crate::{
    entities::{Block, Household, HouseholdStatus, block, household},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;

/// Number of household slots in every block.
pub const HOUSEHOLDS_PER_BLOCK: u32 = 10;

/// Statuses whose member count is cached on the block row.
pub const TRACKED_STATUSES: [HouseholdStatus; 3] = [
    HouseholdStatus::UnderRenovation,
    HouseholdStatus::UpcomingRenovation,
    HouseholdStatus::UnderConstruction,
];

/// Builds the id of the `n`th household of a block, e.g. `("A", 3)` -> `"A3"`.
#[must_use]
pub fn household_id_for(block_id: &str, n: u32) -> String {
    format!("{block_id}{n}")
}

/// The block-level counts of households in each tracked status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedCounters {
    /// Households "Under Renovation"
    pub under_renovation: i32,
    /// Households "Upcoming Renovation"
    pub upcoming_renovation: i32,
    /// Households "Under Construction"
    pub under_construction: i32,
}

impl TrackedCounters {
    /// Reads the cached counters off a block row.
    #[must_use]
    pub const fn from_block(block: &block::Model) -> Self {
        Self {
            under_renovation: block.under_renovation,
            upcoming_renovation: block.upcoming_renovation,
            under_construction: block.under_construction,
        }
    }

    /// Counts households per tracked status from scratch.
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = HouseholdStatus>,
    {
        let mut counters = Self::default();
        for status in statuses {
            if let Some(counter) = counters.counter_mut(status) {
                *counter += 1;
            }
        }
        counters
    }

    /// Current count for a status, or `None` if the status is not tracked.
    #[must_use]
    pub const fn get(&self, status: HouseholdStatus) -> Option<i32> {
        match status {
            HouseholdStatus::UnderRenovation => Some(self.under_renovation),
            HouseholdStatus::UpcomingRenovation => Some(self.upcoming_renovation),
            HouseholdStatus::UnderConstruction => Some(self.under_construction),
            _ => None,
        }
    }

    const fn counter_mut(&mut self, status: HouseholdStatus) -> Option<&mut i32> {
        match status {
            HouseholdStatus::UnderRenovation => Some(&mut self.under_renovation),
            HouseholdStatus::UpcomingRenovation => Some(&mut self.upcoming_renovation),
            HouseholdStatus::UnderConstruction => Some(&mut self.under_construction),
            _ => None,
        }
    }

    /// Moves one household from `old` to `new`.
    ///
    /// The counter for `old` is decremented and clamped at zero before the counter for
    /// `new` is incremented, so a self-transition is a no-op on consistent data and
    /// never drives a counter negative on drifted data.
    pub fn apply_transition(&mut self, old: HouseholdStatus, new: HouseholdStatus) {
        if let Some(counter) = self.counter_mut(old) {
            *counter = (*counter - 1).max(0);
        }
        if let Some(counter) = self.counter_mut(new) {
            *counter += 1;
        }
    }

    /// Copies the counters onto an active model for saving.
    pub fn write_to(&self, active: &mut block::ActiveModel) {
        active.under_renovation = Set(self.under_renovation);
        active.upcoming_renovation = Set(self.upcoming_renovation);
        active.under_construction = Set(self.under_construction);
    }
}

/// Retrieves all blocks ordered by id.
pub async fn get_all_blocks(db: &DatabaseConnection) -> Result<Vec<block::Model>> {
    Block::find()
        .order_by_asc(block::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a block by id, returning None if it does not exist.
pub async fn get_block_by_id<C>(db: &C, block_id: &str) -> Result<Option<block::Model>>
where
    C: ConnectionTrait,
{
    Block::find_by_id(block_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a block by id, failing with [`Error::NotFound`] if absent.
pub async fn require_block<C>(db: &C, block_id: &str) -> Result<block::Model>
where
    C: ConnectionTrait,
{
    get_block_by_id(db, block_id)
        .await?
        .ok_or_else(|| Error::not_found("Block", block_id))
}

/// Retrieves the stored households of a block ordered by id.
///
/// Ordering is lexical, so "A10" sorts before "A2"; callers that need slot order use
/// [`crate::core::occupancy::available_households`].
pub async fn get_households_for_block<C>(db: &C, block_id: &str) -> Result<Vec<household::Model>>
where
    C: ConnectionTrait,
{
    Household::find()
        .filter(household::Column::BlockId.eq(block_id))
        .order_by_asc(household::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Recomputes a block's water and electricity totals from its households and saves them.
pub async fn refresh_block_consumption<C>(db: &C, block_id: &str) -> Result<block::Model>
where
    C: ConnectionTrait,
{
    let block = require_block(db, block_id).await?;
    let households = get_households_for_block(db, block_id).await?;

    let water: f64 = households.iter().map(|h| h.water_consumption).sum();
    let electricity: f64 = households.iter().map(|h| h.electricity_consumption).sum();

    let mut active: block::ActiveModel = block.into();
    active.water_consumption = Set(water);
    active.electricity_consumption = Set(electricity);
    active.update(db).await.map_err(Into::into)
}
