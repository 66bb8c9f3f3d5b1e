//! Household business logic - Status transitions, consumption readings and billing.
//!
//! Every mutation that touches both a household and its block runs inside one database
//! transaction, so the block's cached aggregates never commit without the household
//! change that produced them.

use crate::{
    config::subdivision::RatesConfig,
    core::block::{TrackedCounters, refresh_block_consumption, require_block},
    entities::{Household, HouseholdStatus, PaymentStatus, block, household},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::info;

/// Outcome of a status transition: both updated records plus the status left behind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    /// Household after the change
    pub household: household::Model,
    /// Owning block with adjusted counters
    pub block: block::Model,
    /// Status the household held before the change
    pub previous_status: HouseholdStatus,
}

/// Finds a household by id, returning None if it does not exist.
pub async fn get_household_by_id<C>(db: &C, household_id: &str) -> Result<Option<household::Model>>
where
    C: ConnectionTrait,
{
    Household::find_by_id(household_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a household by id, failing with [`Error::NotFound`] if absent.
pub async fn require_household<C>(db: &C, household_id: &str) -> Result<household::Model>
where
    C: ConnectionTrait,
{
    get_household_by_id(db, household_id)
        .await?
        .ok_or_else(|| Error::not_found("Household", household_id))
}

/// Sets a household's status and adjusts its block's tracked counters.
///
/// Fails with [`Error::NotFound`] if the household or its block is missing; nothing is
/// written in that case.
pub async fn update_household_status(
    db: &DatabaseConnection,
    household_id: &str,
    new_status: HouseholdStatus,
) -> Result<StatusChange> {
    let txn = db.begin().await?;
    let change = apply_status_change(&txn, household_id, new_status).await?;
    txn.commit().await?;

    info!(
        household = %change.household.id,
        from = change.previous_status.label(),
        to = new_status.label(),
        "Household status updated"
    );
    Ok(change)
}

/// Status transition on an existing connection or transaction. The caller owns commit.
pub(crate) async fn apply_status_change<C>(
    db: &C,
    household_id: &str,
    new_status: HouseholdStatus,
) -> Result<StatusChange>
where
    C: ConnectionTrait,
{
    let household = require_household(db, household_id).await?;
    let block = require_block(db, &household.block_id).await?;
    let previous_status = household.status;

    let mut counters = TrackedCounters::from_block(&block);
    counters.apply_transition(previous_status, new_status);

    let mut household_active: household::ActiveModel = household.into();
    household_active.status = Set(new_status);
    let household = household_active.update(db).await?;

    let mut block_active: block::ActiveModel = block.into();
    counters.write_to(&mut block_active);
    let block = block_active.update(db).await?;

    Ok(StatusChange {
        household,
        block,
        previous_status,
    })
}

/// Records new water and electricity readings and refreshes the block totals.
///
/// Readings must be finite and non-negative.
pub async fn record_consumption(
    db: &DatabaseConnection,
    household_id: &str,
    water: f64,
    electricity: f64,
) -> Result<(household::Model, block::Model)> {
    for (name, value) in [("Water", water), ("Electricity", electricity)] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::validation(format!(
                "{name} consumption must be a non-negative number, got {value}"
            )));
        }
    }

    let txn = db.begin().await?;

    let household = require_household(&txn, household_id).await?;
    let block_id = household.block_id.clone();

    let mut active: household::ActiveModel = household.into();
    active.water_consumption = Set(water);
    active.electricity_consumption = Set(electricity);
    let household = active.update(&txn).await?;

    let block = refresh_block_consumption(&txn, &block_id).await?;
    txn.commit().await?;

    Ok((household, block))
}

/// Overwrites a household's payment status.
pub async fn set_payment_status<C>(
    db: &C,
    household_id: &str,
    payment_status: PaymentStatus,
) -> Result<household::Model>
where
    C: ConnectionTrait,
{
    let household = require_household(db, household_id).await?;
    let mut active: household::ActiveModel = household.into();
    active.payment_status = Set(payment_status);
    active.update(db).await.map_err(Into::into)
}

/// Monthly amount due for a household: flat dues plus metered utilities.
#[must_use]
pub fn derive_payment_amount(household: &household::Model, rates: &RatesConfig) -> f64 {
    rates.monthly_dues
        + household.water_consumption * rates.water_rate
        + household.electricity_consumption * rates.electricity_rate
}
