//! Block, household and construction endpoints used by the admin dashboard.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::{
    core::{
        block,
        construction::{self, ConstructionSummary, Registration},
        household::{self, StatusChange},
        occupancy::{self, HouseholdSlot},
        reconcile::{self, ReconcileReport},
    },
    entities::{BlockModel, HouseholdModel, HouseholdStatus, PaymentStatus},
    errors::{Error, Result},
};

/// `PUT /households/:id/status` body.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    /// Status display text, e.g. "Under Renovation"
    #[serde(default)]
    pub status: String,
}

/// `PUT /households/:id/consumption` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionForm {
    /// New water reading
    pub water_consumption: f64,
    /// New electricity reading
    pub electricity_consumption: f64,
}

/// `PUT /households/:id/consumption` response.
#[derive(Debug, Serialize)]
pub struct ConsumptionUpdate {
    /// Household with the new readings
    pub household: HouseholdModel,
    /// Owning block with refreshed totals
    pub block: BlockModel,
}

/// `GET /households/:id/dues` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dues {
    /// Household the dues are for
    pub household_id: String,
    /// Dues derived from the configured rates
    pub amount: f64,
    /// Current billing state
    pub payment_status: PaymentStatus,
}

/// `POST /postConstruction` body. Every field is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionForm {
    /// Block of the household
    #[serde(default)]
    pub block_id: String,
    /// Household under works
    #[serde(default)]
    pub household_id: String,
    /// Status the works put the household in
    #[serde(default)]
    pub construction_type: String,
    /// First day of works
    pub start_date: Option<NaiveDate>,
    /// Last day of works
    pub end_date: Option<NaiveDate>,
}

/// `GET /blocks`
pub async fn list_blocks(State(state): State<AppState>) -> Result<Json<Vec<BlockModel>>> {
    Ok(Json(block::get_all_blocks(&state.db).await?))
}

/// `GET /blocks/:id`
pub async fn get_block(
    State(state): State<AppState>,
    Path(block_id): Path<String>,
) -> Result<Json<BlockModel>> {
    Ok(Json(block::require_block(&state.db, &block_id).await?))
}

/// `GET /blocks/:id/households`: 404 for an unknown block.
pub async fn block_households(
    State(state): State<AppState>,
    Path(block_id): Path<String>,
) -> Result<Json<Vec<HouseholdModel>>> {
    block::require_block(&state.db, &block_id).await?;
    Ok(Json(block::get_households_for_block(&state.db, &block_id).await?))
}

/// `GET /blocks/:id/available`: always ten slots.
pub async fn available_households(
    State(state): State<AppState>,
    Path(block_id): Path<String>,
) -> Result<Json<Vec<HouseholdSlot>>> {
    Ok(Json(occupancy::available_households(&state.db, &block_id).await?))
}

/// `GET /households/:id`
pub async fn get_household(
    State(state): State<AppState>,
    Path(household_id): Path<String>,
) -> Result<Json<HouseholdModel>> {
    Ok(Json(household::require_household(&state.db, &household_id).await?))
}

/// `PUT /households/:id/status`: 400 when no status is selected.
pub async fn update_status(
    State(state): State<AppState>,
    Path(household_id): Path<String>,
    Json(form): Json<StatusForm>,
) -> Result<Json<StatusChange>> {
    let status: HouseholdStatus = form.status.parse()?;
    Ok(Json(
        household::update_household_status(&state.db, &household_id, status).await?,
    ))
}

/// `PUT /households/:id/consumption`
pub async fn record_consumption(
    State(state): State<AppState>,
    Path(household_id): Path<String>,
    Json(form): Json<ConsumptionForm>,
) -> Result<Json<ConsumptionUpdate>> {
    let (household, block) = household::record_consumption(
        &state.db,
        &household_id,
        form.water_consumption,
        form.electricity_consumption,
    )
    .await?;
    Ok(Json(ConsumptionUpdate { household, block }))
}

/// `GET /households/:id/dues`
pub async fn household_dues(
    State(state): State<AppState>,
    Path(household_id): Path<String>,
) -> Result<Json<Dues>> {
    let found = household::require_household(&state.db, &household_id).await?;
    Ok(Json(Dues {
        amount: household::derive_payment_amount(&found, &state.rates),
        payment_status: found.payment_status,
        household_id: found.id,
    }))
}

/// `GET /constructions`: records with their phase as of today.
pub async fn list_constructions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConstructionSummary>>> {
    let today = Utc::now().date_naive();
    let records = construction::get_all_constructions(&state.db).await?;
    Ok(Json(
        records
            .into_iter()
            .map(|record| ConstructionSummary::new(record, today))
            .collect(),
    ))
}

/// `POST /postConstruction`: records the works and applies the status change.
pub async fn post_construction(
    State(state): State<AppState>,
    Json(form): Json<ConstructionForm>,
) -> Result<(StatusCode, Json<Registration>)> {
    let (Some(start), Some(end)) = (form.start_date, form.end_date) else {
        return Err(Error::validation("Start and end dates are required"));
    };
    let construction_type: HouseholdStatus = form.construction_type.parse()?;

    let registration = construction::register_construction(
        &state.db,
        &form.block_id,
        &form.household_id,
        construction_type,
        start,
        end,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// `POST /reconcile`: recomputes drifted counters.
pub async fn run_reconcile(State(state): State<AppState>) -> Result<Json<ReconcileReport>> {
    Ok(Json(reconcile::reconcile(&state.db).await?))
}
