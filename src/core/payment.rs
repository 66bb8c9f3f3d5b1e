//! Payment business logic - Recording dues and reading payment history.

use crate::{
    core::household::set_payment_status,
    entities::{Payment, PaymentStatus, User, payment},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Fields for a new payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    /// Paying user
    pub user_id: i64,
    /// Household the payment settles, if any
    #[serde(default)]
    pub household_id: Option<String>,
    /// Positive amount
    pub amount: f64,
    /// e.g. "cash" or "gcash"
    pub method: String,
    /// Receipt or transaction number
    #[serde(default)]
    pub reference: Option<String>,
}

/// Records a payment. When it names a household, that household is marked paid in the
/// same transaction.
///
/// # Errors
/// - [`Error::Validation`] if the amount is not a positive finite number or the method
///   is empty
/// - [`Error::NotFound`] if the user or household does not exist
pub async fn create_payment(db: &DatabaseConnection, new_payment: NewPayment) -> Result<payment::Model> {
    if !new_payment.amount.is_finite() || new_payment.amount <= 0.0 {
        return Err(Error::validation(format!(
            "Payment amount must be positive, got {}",
            new_payment.amount
        )));
    }
    if new_payment.method.trim().is_empty() {
        return Err(Error::validation("Payment method is required"));
    }

    let household_id = new_payment
        .household_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    let txn = db.begin().await?;

    User::find_by_id(new_payment.user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("User", new_payment.user_id))?;

    if let Some(id) = &household_id {
        set_payment_status(&txn, id, PaymentStatus::Paid).await?;
    }

    let payment = payment::ActiveModel {
        user_id: Set(new_payment.user_id),
        household_id: Set(household_id),
        amount: Set(new_payment.amount),
        method: Set(new_payment.method.trim().to_string()),
        reference: Set(new_payment.reference.filter(|r| !r.trim().is_empty())),
        paid_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(payment = payment.id, user = payment.user_id, amount = payment.amount, "Payment recorded");
    Ok(payment)
}

/// Retrieves all payments, newest first.
pub async fn get_all_payments(db: &DatabaseConnection) -> Result<Vec<payment::Model>> {
    Payment::find()
        .order_by_desc(payment::Column::PaidAt)
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves one user's payments, newest first.
pub async fn get_payments_for_user(db: &DatabaseConnection, user_id: i64) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::UserId.eq(user_id))
        .order_by_desc(payment::Column::PaidAt)
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
