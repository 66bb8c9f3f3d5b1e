//! Shared test utilities for the subdivision desk.
//!
//! This module provides helpers for setting up in-memory databases, a small seeded
//! subdivision, and for forcing drift into the cached tallies.

use crate::{
    config::subdivision::{Config, parse_config},
    core::{block::TrackedCounters, seed::seed_subdivision, user},
    entities::{Block, Household, UserType, block, household},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, Set, prelude::*};

/// Sample data used by [`setup_seeded_db`]:
/// - blocks A and B, ten households each
/// - A2 "Under Renovation", 3 occupants, water 12.5, electricity 150, paid
/// - A5 "Occupied", 2 occupants, water 8.0, electricity 90, overdue
pub const TEST_CONFIG: &str = r#"
    [[blocks]]
    id = "A"

    [[blocks]]
    id = "B"

    [[households]]
    id = "A2"
    status = "Under Renovation"
    occupants = 3
    water_consumption = 12.5
    electricity_consumption = 150.0
    payment_status = "Paid"

    [[households]]
    id = "A5"
    status = "Occupied"
    occupants = 2
    water_consumption = 8.0
    electricity_consumption = 90.0
    payment_status = "Overdue"
"#;

/// Parses [`TEST_CONFIG`].
#[allow(clippy::expect_used)]
pub fn test_config() -> Config {
    parse_config(TEST_CONFIG).expect("test config parses")
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// In-memory database seeded from [`TEST_CONFIG`].
pub async fn setup_seeded_db() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    seed_subdivision(&db, &test_config()).await?;
    Ok(db)
}

/// Creates a user with sensible defaults.
///
/// # Defaults
/// * `email`: `"{first_name lowercased}@example.com"`
/// * `last_name`: `"Tester"`
/// * `password`: `"password"`
/// * no household
pub async fn create_test_user(
    db: &DatabaseConnection,
    first_name: &str,
    user_type: UserType,
) -> Result<crate::entities::UserModel> {
    user::create_user(
        db,
        user::NewUser {
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            password: "password".to_string(),
            user_type,
            block_id: None,
            household_id: None,
        },
    )
    .await
}

/// Overwrites a block's tracked counters without touching its households.
pub async fn force_block_counters(
    db: &DatabaseConnection,
    block_id: &str,
    counters: TrackedCounters,
) -> Result<()> {
    let block = Block::find_by_id(block_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Block", block_id))?;
    let mut active: block::ActiveModel = block.into_active_model();
    counters.write_to(&mut active);
    active.update(db).await?;
    Ok(())
}

/// Overwrites a household's occupant tally without touching any user.
pub async fn force_occupants(db: &DatabaseConnection, household_id: &str, occupants: i32) -> Result<()> {
    let household = Household::find_by_id(household_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Household", household_id))?;
    let mut active: household::ActiveModel = household.into_active_model();
    active.occupants = Set(occupants);
    active.update(db).await?;
    Ok(())
}
