//! Subdivision configuration loading from config.toml
//!
//! The file lists the blocks to seed on first run, optional per-household overrides
//! for the sample data, and the rates used to derive monthly dues.

use crate::core::block::{HOUSEHOLDS_PER_BLOCK, household_id_for};
use crate::entities::{HouseholdStatus, PaymentStatus};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Blocks to seed
    pub blocks: Vec<BlockConfig>,
    /// Sample values for individual households; unlisted households seed empty
    #[serde(default)]
    pub households: Vec<HouseholdConfig>,
    /// Billing rates
    #[serde(default)]
    pub rates: RatesConfig,
}

/// A block to seed with its ten households
#[derive(Debug, Deserialize, Clone)]
pub struct BlockConfig {
    /// Block id, also the household id prefix
    pub id: String,
    /// Display name; defaults to "Block {id}"
    pub name: Option<String>,
}

impl BlockConfig {
    /// Display name, falling back to "Block {id}".
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Block {}", self.id))
    }
}

/// Seed values for one household
#[derive(Debug, Deserialize, Clone)]
pub struct HouseholdConfig {
    /// Household id, e.g. "A2"
    pub id: String,
    /// Initial status
    pub status: HouseholdStatus,
    /// Initial occupant count
    #[serde(default)]
    pub occupants: i32,
    /// Initial water reading
    #[serde(default)]
    pub water_consumption: f64,
    /// Initial electricity reading
    #[serde(default)]
    pub electricity_consumption: f64,
    /// Initial payment status; defaults to N/A
    #[serde(default = "default_payment_status")]
    pub payment_status: PaymentStatus,
}

const fn default_payment_status() -> PaymentStatus {
    PaymentStatus::NotApplicable
}

/// Rates for deriving a household's monthly dues
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct RatesConfig {
    /// Flat association dues per household per month
    pub monthly_dues: f64,
    /// Price per cubic meter of water
    pub water_rate: f64,
    /// Price per kWh of electricity
    pub electricity_rate: f64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            monthly_dues: 500.0,
            water_rate: 30.0,
            electricity_rate: 12.0,
        }
    }
}

/// Loads subdivision configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading subdivision configuration from {}", path_ref.display());
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses configuration text and validates it.
///
/// # Errors
/// Returns [`Error::Config`] if:
/// - A block id is empty
/// - A household override is not `{block}{n}` for a configured block and n in 1..=10
/// - The same household is listed twice
/// - Occupants are negative, or a reading is negative or not finite
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if let Some(block) = config.blocks.iter().find(|b| b.id.trim().is_empty()) {
        return Err(Error::Config {
            message: format!("Block id cannot be empty (name: {:?})", block.name),
        });
    }

    let mut seen = HashSet::new();
    for household in &config.households {
        validate_household(&config.blocks, household)?;
        if !seen.insert(household.id.as_str()) {
            return Err(Error::Config {
                message: format!("Household '{}' is listed more than once", household.id),
            });
        }
    }

    Ok(config)
}

fn validate_household(blocks: &[BlockConfig], household: &HouseholdConfig) -> Result<()> {
    let reject = |reason: &str| {
        Err(Error::Config {
            message: format!("Household '{}' {reason}", household.id),
        })
    };

    if !blocks.iter().any(|b| household_belongs_to(&household.id, &b.id)) {
        return reject("does not belong to any configured block");
    }
    if household.occupants < 0 {
        return reject("has negative occupants");
    }
    let readings = [household.water_consumption, household.electricity_consumption];
    if readings.iter().any(|r| !r.is_finite() || *r < 0.0) {
        return reject("has a negative or non-finite consumption reading");
    }
    Ok(())
}

/// True when `household_id` is exactly `{block_id}{n}` for some n in 1..=10.
#[must_use]
pub fn household_belongs_to(household_id: &str, block_id: &str) -> bool {
    (1..=HOUSEHOLDS_PER_BLOCK).any(|n| household_id_for(block_id, n) == household_id)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_subdivision_config() {
        let toml_str = r#"
            [[blocks]]
            id = "A"

            [[blocks]]
            id = "B"
            name = "Acacia"

            [[households]]
            id = "A2"
            status = "Under Renovation"
            occupants = 3
            water_consumption = 12.5
            payment_status = "Paid"

            [rates]
            monthly_dues = 750.0
            water_rate = 25.0
            electricity_rate = 10.0
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.blocks.len(), 2);
        assert_eq!(config.blocks[0].display_name(), "Block A");
        assert_eq!(config.blocks[1].display_name(), "Acacia");
        assert_eq!(config.households[0].status, HouseholdStatus::UnderRenovation);
        assert_eq!(config.households[0].water_consumption, 12.5);
        assert_eq!(config.households[0].electricity_consumption, 0.0);
        assert_eq!(config.households[0].payment_status, PaymentStatus::Paid);
        assert_eq!(config.rates.monthly_dues, 750.0);
    }

    #[test]
    fn test_rates_default_when_absent() {
        let config = parse_config("[[blocks]]\nid = \"A\"\n").unwrap();
        assert_eq!(config.rates, RatesConfig::default());
        assert!(config.households.is_empty());
    }

    #[test]
    fn test_household_outside_configured_blocks_is_rejected() {
        let toml_str = r#"
            [[blocks]]
            id = "A"

            [[households]]
            id = "C4"
            status = "Occupied"
        "#;
        let err = parse_config(toml_str).unwrap_err();
        assert!(matches!(err, Error::Config { message } if message.contains("C4")));
    }

    #[test]
    fn test_household_belongs_to() {
        assert!(household_belongs_to("A1", "A"));
        assert!(household_belongs_to("A10", "A"));
        assert!(!household_belongs_to("A11", "A"));
        assert!(!household_belongs_to("A0", "A"));
        assert!(!household_belongs_to("B1", "A"));
        assert!(!household_belongs_to("A", "A"));
        assert!(!household_belongs_to("A01", "A"));
        assert!(!household_belongs_to("A+1", "A"));
    }

    #[test]
    fn test_non_canonical_household_id_is_rejected() {
        let toml_str = r#"
            [[blocks]]
            id = "A"

            [[households]]
            id = "A01"
            status = "Under Renovation"
        "#;
        let err = parse_config(toml_str).unwrap_err();
        assert!(matches!(err, Error::Config { message } if message.contains("A01")));
    }

    #[test]
    fn test_invalid_readings_are_rejected() {
        for reading in [
            "water_consumption = -50.0",
            "electricity_consumption = nan",
            "water_consumption = inf",
        ] {
            let toml_str = format!(
                "[[blocks]]\nid = \"A\"\n\n[[households]]\nid = \"A2\"\nstatus = \"Occupied\"\n{reading}\n"
            );
            let err = parse_config(&toml_str).unwrap_err();
            assert!(
                matches!(&err, Error::Config { message } if message.contains("consumption reading")),
                "{reading} gave {err}"
            );
        }
    }

    #[test]
    fn test_duplicate_household_is_rejected() {
        let toml_str = r#"
            [[blocks]]
            id = "A"

            [[households]]
            id = "A2"
            status = "Occupied"

            [[households]]
            id = "A2"
            status = "Under Renovation"
        "#;
        let err = parse_config(toml_str).unwrap_err();
        assert!(matches!(err, Error::Config { message } if message.contains("more than once")));
    }

    #[test]
    fn test_negative_occupants_are_rejected() {
        let toml_str = r#"
            [[blocks]]
            id = "A"

            [[households]]
            id = "A2"
            status = "Occupied"
            occupants = -1
        "#;
        let err = parse_config(toml_str).unwrap_err();
        assert!(matches!(err, Error::Config { message } if message.contains("negative occupants")));
    }
}
