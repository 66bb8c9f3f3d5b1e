//! Seeding blocks and households from the subdivision configuration.
//!
//! Blocks already present are skipped, so seeding runs on every start without
//! clobbering state the dashboard has changed since.

use crate::{
    config::subdivision::Config,
    core::block::{HOUSEHOLDS_PER_BLOCK, TrackedCounters, household_id_for},
    entities::{Block, HouseholdStatus, PaymentStatus, block, household},
    errors::Result,
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// Inserts every configured block that does not exist yet, along with its ten
/// households. Returns the number of blocks created.
pub async fn seed_subdivision(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    info!(
        "Starting to seed subdivision. Found {} block configurations.",
        config.blocks.len()
    );
    let txn = db.begin().await?;
    let mut created = 0;

    for block_config in &config.blocks {
        if Block::find_by_id(block_config.id.clone())
            .one(&txn)
            .await?
            .is_some()
        {
            debug!("Block '{}' already exists. Skipping.", block_config.id);
            continue;
        }

        let households: Vec<household::Model> = (1..=HOUSEHOLDS_PER_BLOCK)
            .map(|n| seed_household(config, &block_config.id, n))
            .collect();

        let counters = TrackedCounters::tally(households.iter().map(|h| h.status));
        let water: f64 = households.iter().map(|h| h.water_consumption).sum();
        let electricity: f64 = households.iter().map(|h| h.electricity_consumption).sum();

        let mut block = block::ActiveModel {
            id: Set(block_config.id.clone()),
            name: Set(block_config.display_name()),
            total_households: Set(i32::try_from(HOUSEHOLDS_PER_BLOCK).unwrap_or(i32::MAX)),
            water_consumption: Set(water),
            electricity_consumption: Set(electricity),
            ..Default::default()
        };
        counters.write_to(&mut block);
        block.insert(&txn).await?;

        household::Entity::insert_many(households.into_iter().map(to_insert))
            .exec_without_returning(&txn)
            .await?;

        info!("Seeded block '{}' with {HOUSEHOLDS_PER_BLOCK} households.", block_config.id);
        created += 1;
    }

    txn.commit().await?;
    Ok(created)
}

fn seed_household(config: &Config, block_id: &str, n: u32) -> household::Model {
    let id = household_id_for(block_id, n);
    let sample = config.households.iter().find(|h| h.id == id);

    household::Model {
        block_id: block_id.to_string(),
        occupants: sample.map_or(0, |h| h.occupants),
        status: sample.map_or(HouseholdStatus::Unoccupied, |h| h.status),
        water_consumption: sample.map_or(0.0, |h| h.water_consumption),
        electricity_consumption: sample.map_or(0.0, |h| h.electricity_consumption),
        payment_status: sample.map_or(PaymentStatus::NotApplicable, |h| h.payment_status),
        id,
    }
}

fn to_insert(model: household::Model) -> household::ActiveModel {
    household::ActiveModel {
        id: Set(model.id),
        block_id: Set(model.block_id),
        occupants: Set(model.occupants),
        status: Set(model.status),
        water_consumption: Set(model.water_consumption),
        electricity_consumption: Set(model.electricity_consumption),
        payment_status: Set(model.payment_status),
    }
}
