//! String-backed enumerations shared by several entities.
//!
//! Values are stored as their display text (e.g. `"Under Renovation"`) so the
//! database, the JSON surface and the dashboard all agree on one spelling.

use crate::errors::{Error, Result};
use sea_orm::{Iterable, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a single household. Exactly one value at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum HouseholdStatus {
    /// Lived in
    #[sea_orm(string_value = "Occupied")]
    Occupied,
    /// Renovation works currently running
    #[sea_orm(string_value = "Under Renovation")]
    #[serde(rename = "Under Renovation")]
    UnderRenovation,
    /// Renovation scheduled but not started
    #[sea_orm(string_value = "Upcoming Renovation")]
    #[serde(rename = "Upcoming Renovation")]
    UpcomingRenovation,
    /// Construction works currently running
    #[sea_orm(string_value = "Under Construction")]
    #[serde(rename = "Under Construction")]
    UnderConstruction,
    /// Construction scheduled but not started
    #[sea_orm(string_value = "Upcoming Construction")]
    #[serde(rename = "Upcoming Construction")]
    UpcomingConstruction,
    /// Empty lot or vacant unit
    #[sea_orm(string_value = "Unoccupied")]
    Unoccupied,
    /// Renovation stopped before completion
    #[sea_orm(string_value = "Renovation Paused")]
    #[serde(rename = "Renovation Paused")]
    RenovationPaused,
    /// Construction stopped before completion
    #[sea_orm(string_value = "Construction Paused")]
    #[serde(rename = "Construction Paused")]
    ConstructionPaused,
    /// Works done, awaiting sign-off
    #[sea_orm(string_value = "Final Inspection")]
    #[serde(rename = "Final Inspection")]
    FinalInspection,
    /// Works waiting on a permit
    #[sea_orm(string_value = "Permit Pending")]
    #[serde(rename = "Permit Pending")]
    PermitPending,
    /// Unit used for business rather than residence
    #[sea_orm(string_value = "Commercial")]
    Commercial,
}

impl HouseholdStatus {
    /// Display text, identical to the stored value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Occupied => "Occupied",
            Self::UnderRenovation => "Under Renovation",
            Self::UpcomingRenovation => "Upcoming Renovation",
            Self::UnderConstruction => "Under Construction",
            Self::UpcomingConstruction => "Upcoming Construction",
            Self::Unoccupied => "Unoccupied",
            Self::RenovationPaused => "Renovation Paused",
            Self::ConstructionPaused => "Construction Paused",
            Self::FinalInspection => "Final Inspection",
            Self::PermitPending => "Permit Pending",
            Self::Commercial => "Commercial",
        }
    }
}

impl FromStr for HouseholdStatus {
    type Err = Error;

    /// Parses the display text. An empty selection is rejected separately from an
    /// unknown value so the caller can tell the user to pick a status.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("Please select a status"));
        }
        Self::iter()
            .find(|status| status.label() == trimmed)
            .ok_or_else(|| Error::validation(format!("Unknown household status '{trimmed}'")))
    }
}

/// Billing state of a household.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PaymentStatus {
    /// Dues settled for the period
    #[sea_orm(string_value = "Paid")]
    Paid,
    /// Dues outstanding past the deadline
    #[sea_orm(string_value = "Overdue")]
    Overdue,
    /// No billing applies (e.g. unoccupied lot)
    #[sea_orm(string_value = "N/A")]
    #[serde(rename = "N/A")]
    NotApplicable,
}

/// Role carried by a user account. This is the whole authorization model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Household owner or resident
    #[sea_orm(string_value = "customer")]
    Customer,
    /// Gate guard; never attached to a household
    #[sea_orm(string_value = "guard")]
    Guard,
    /// Subdivision administrator
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Who a notification is addressed to.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Every user
    #[default]
    #[sea_orm(string_value = "all")]
    All,
    /// Residents only
    #[sea_orm(string_value = "customer")]
    Customer,
    /// Guards only
    #[sea_orm(string_value = "guard")]
    Guard,
}

impl FromStr for Audience {
    type Err = Error;

    /// Case-insensitive; an empty string means [`Audience::All`].
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        if wanted.is_empty() {
            return Ok(Self::All);
        }
        Self::iter()
            .find(|audience| audience.to_value() == wanted)
            .ok_or_else(|| Error::validation(format!("Unknown audience '{wanted}'")))
    }
}
