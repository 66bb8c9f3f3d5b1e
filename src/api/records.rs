//! Payment, incident report, notification and service request endpoints.
//!
//! Each is a straight pass-through to the matching `core` module.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::AppState;
use crate::{
    core::{
        notification::{self, NewNotification},
        payment::{self, NewPayment},
        report::{self, NewReport},
        service_request::{self, NewServiceRequest},
    },
    entities::{NotificationModel, PaymentModel, ReportModel, ServiceRequestModel},
    errors::Result,
};

/// `GET /payments`: every payment, newest first.
pub async fn list_payments(State(state): State<AppState>) -> Result<Json<Vec<PaymentModel>>> {
    Ok(Json(payment::get_all_payments(&state.db).await?))
}

/// `GET /payments/:user_id`
pub async fn user_payments(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<PaymentModel>>> {
    Ok(Json(payment::get_payments_for_user(&state.db, user_id).await?))
}

/// `POST /postPayment`: records a payment and marks its household paid.
pub async fn post_payment(
    State(state): State<AppState>,
    Json(form): Json<NewPayment>,
) -> Result<(StatusCode, Json<PaymentModel>)> {
    let created = payment::create_payment(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /reports`
pub async fn list_reports(State(state): State<AppState>) -> Result<Json<Vec<ReportModel>>> {
    Ok(Json(report::get_all_reports(&state.db).await?))
}

/// `GET /reports/:user_id`
pub async fn user_reports(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ReportModel>>> {
    Ok(Json(report::get_reports_for_user(&state.db, user_id).await?))
}

/// `POST /postReport`
pub async fn post_report(
    State(state): State<AppState>,
    Json(form): Json<NewReport>,
) -> Result<(StatusCode, Json<ReportModel>)> {
    let created = report::create_report(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /notifications`
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<NotificationModel>>> {
    Ok(Json(notification::get_all_notifications(&state.db).await?))
}

/// `POST /postNotification`
pub async fn post_notification(
    State(state): State<AppState>,
    Json(form): Json<NewNotification>,
) -> Result<(StatusCode, Json<NotificationModel>)> {
    let created = notification::create_notification(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /requests/:user_id`
pub async fn user_requests(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ServiceRequestModel>>> {
    Ok(Json(service_request::get_requests_for_user(&state.db, user_id).await?))
}

/// `POST /postRequest`
pub async fn post_request(
    State(state): State<AppState>,
    Json(form): Json<NewServiceRequest>,
) -> Result<(StatusCode, Json<ServiceRequestModel>)> {
    let created = service_request::create_request(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
