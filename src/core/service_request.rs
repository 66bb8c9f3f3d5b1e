//! Service request business logic - Gate passes, repairs and document requests filed
//! from the owner portal.

use crate::{
    entities::{ServiceRequest, User, service_request},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Fields for a new service request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceRequest {
    /// Requesting user
    pub user_id: i64,
    /// Kind of service, e.g. "plumbing"
    pub request_type: String,
    /// Free-text details
    #[serde(default)]
    pub details: String,
}

/// Files a request for an existing user. Details may be empty; the type may not.
pub async fn create_request(
    db: &DatabaseConnection,
    new_request: NewServiceRequest,
) -> Result<service_request::Model> {
    if new_request.request_type.trim().is_empty() {
        return Err(Error::validation("Request type is required"));
    }

    User::find_by_id(new_request.user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("User", new_request.user_id))?;

    service_request::ActiveModel {
        user_id: Set(new_request.user_id),
        request_type: Set(new_request.request_type.trim().to_string()),
        details: Set(new_request.details.trim().to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves one user's requests, newest first.
pub async fn get_requests_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<service_request::Model>> {
    ServiceRequest::find()
        .filter(service_request::Column::UserId.eq(user_id))
        .order_by_desc(service_request::Column::CreatedAt)
        .order_by_desc(service_request::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::UserType;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_and_list_requests() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_user(&db, "Ana", UserType::Customer).await?;

        let request = create_request(
            &db,
            NewServiceRequest {
                user_id: ana.id,
                request_type: "Gate pass".to_string(),
                details: "Delivery truck, Friday".to_string(),
            },
        )
        .await?;
        assert_eq!(request.request_type, "Gate pass");

        let listed = get_requests_for_user(&db, ana.id).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, request.id);
        assert!(get_requests_for_user(&db, ana.id + 1).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_request_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_request(
            &db,
            NewServiceRequest {
                user_id: 1,
                request_type: "  ".to_string(),
                details: String::new(),
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }
}
