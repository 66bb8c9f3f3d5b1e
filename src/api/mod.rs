//! HTTP layer - the REST surface consumed by the dashboard, owner portal and login page.
//!
//! Handlers are thin: extract, call into `crate::core`, wrap the result in JSON. Errors
//! become responses through the `IntoResponse` impl in [`error`].

pub mod error;
pub mod records;
pub mod subdivision;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::subdivision::RatesConfig;

/// Shared data available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub db: DatabaseConnection,
    /// Billing rates for dues derivation
    pub rates: RatesConfig,
}

impl AppState {
    /// Creates a new `AppState` from a connection and the configured rates.
    #[must_use]
    pub const fn new(db: DatabaseConnection, rates: RatesConfig) -> Self {
        Self { db, rates }
    }
}

/// Builds the application router with tracing and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Users and auth
        .route("/users", get(users::list_users))
        .route("/postadminCreateUser", post(users::admin_create_user))
        .route(
            "/users/:id",
            put(users::update_user).delete(users::delete_user),
        )
        .route("/users/:id/household", put(users::assign_household))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        // Payments, reports, notifications, requests
        .route("/payments", get(records::list_payments))
        .route("/payments/:user_id", get(records::user_payments))
        .route("/postPayment", post(records::post_payment))
        .route("/reports", get(records::list_reports))
        .route("/reports/:user_id", get(records::user_reports))
        .route("/postReport", post(records::post_report))
        .route("/notifications", get(records::list_notifications))
        .route("/postNotification", post(records::post_notification))
        .route("/requests/:user_id", get(records::user_requests))
        .route("/postRequest", post(records::post_request))
        // Blocks, households, constructions
        .route("/blocks", get(subdivision::list_blocks))
        .route("/blocks/:id", get(subdivision::get_block))
        .route("/blocks/:id/households", get(subdivision::block_households))
        .route("/blocks/:id/available", get(subdivision::available_households))
        .route("/households/:id", get(subdivision::get_household))
        .route("/households/:id/status", put(subdivision::update_status))
        .route(
            "/households/:id/consumption",
            put(subdivision::record_consumption),
        )
        .route("/households/:id/dues", get(subdivision::household_dues))
        .route("/constructions", get(subdivision::list_constructions))
        .route("/postConstruction", post(subdivision::post_construction))
        .route("/reconcile", post(subdivision::run_reconcile))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
