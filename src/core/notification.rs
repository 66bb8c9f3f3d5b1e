//! Notification business logic - Admin announcements.

use crate::{
    entities::{Audience, Notification, notification},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Fields for a new notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    /// Headline
    pub title: String,
    /// Body text
    pub message: String,
    /// Parsed into an [`Audience`], case-insensitively; defaults to everyone
    #[serde(default)]
    pub audience: Option<String>,
}

/// Publishes a notification.
///
/// # Errors
/// - [`Error::Validation`] if the title or message is blank or the audience is unknown
pub async fn create_notification(
    db: &DatabaseConnection,
    new_notification: NewNotification,
) -> Result<notification::Model> {
    if new_notification.title.trim().is_empty() || new_notification.message.trim().is_empty() {
        return Err(Error::validation("Title and message are required"));
    }

    let audience = match new_notification.audience.as_deref() {
        Some(audience) => audience.parse::<Audience>()?,
        None => Audience::default(),
    };

    notification::ActiveModel {
        title: Set(new_notification.title.trim().to_string()),
        message: Set(new_notification.message.trim().to_string()),
        audience: Set(audience),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves all notifications, newest first.
pub async fn get_all_notifications(db: &DatabaseConnection) -> Result<Vec<notification::Model>> {
    Notification::find()
        .order_by_desc(notification::Column::CreatedAt)
        .order_by_desc(notification::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
