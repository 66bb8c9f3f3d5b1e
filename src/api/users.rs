//! User, authentication and household-assignment endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::{
    core::{
        occupancy::{self, Assignment},
        user::{self, NewUser, UserUpdate},
    },
    entities::UserModel,
    errors::Result,
};

/// `POST /login` body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Account email, matched case-insensitively
    #[serde(default)]
    pub email: String,
    /// Password as typed
    #[serde(default)]
    pub password: String,
}

/// `POST /login` and `POST /register` response.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// The authenticated or newly registered user
    pub user: UserModel,
}

/// `PUT /users/:id/household` body. An empty `householdId` unassigns.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentForm {
    /// Target block
    #[serde(default)]
    pub block_id: String,
    /// Target household, or empty to unassign
    #[serde(default)]
    pub household_id: String,
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserModel>>> {
    Ok(Json(user::get_all_users(&state.db).await?))
}

/// `POST /postadminCreateUser`: admin creates an account of any type.
pub async fn admin_create_user(
    State(state): State<AppState>,
    Json(form): Json<NewUser>,
) -> Result<(StatusCode, Json<UserModel>)> {
    let created = user::create_user(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /users/:id`
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(form): Json<UserUpdate>,
) -> Result<Json<UserModel>> {
    Ok(Json(user::update_user(&state.db, user_id, form).await?))
}

/// `DELETE /users/:id`: removes the user and releases their household.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode> {
    user::delete_user(&state.db, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /register`: self-registration as a customer.
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<NewUser>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let created = user::register_user(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(UserResponse { user: created })))
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<UserResponse>> {
    let user = user::login(&state.db, &form.email, &form.password).await?;
    Ok(Json(UserResponse { user }))
}

/// `PUT /users/:id/household`: moves the user and adjusts occupant counts.
pub async fn assign_household(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(form): Json<AssignmentForm>,
) -> Result<Json<Assignment>> {
    let assignment = occupancy::assign_user_to_household(
        &state.db,
        user_id,
        &form.block_id,
        &form.household_id,
    )
    .await?;
    Ok(Json(assignment))
}
