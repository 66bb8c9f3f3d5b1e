//! User business logic - Accounts, registration and login.
//!
//! Household membership is owned by `core::occupancy`; this module only calls into it
//! where an account change implies a move (creating a user with a household, deleting an
//! occupant, turning a resident into a guard).

use crate::{
    core::occupancy::{adjust_occupants, move_occupant},
    entities::{User, UserType, user},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{debug, info};

/// Fields for a new account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Given name; required
    pub first_name: String,
    /// Family name; required
    pub last_name: String,
    /// Required; stored lowercased and unique
    pub email: String,
    /// Required; stored as given
    pub password: String,
    /// Defaults to customer
    #[serde(default = "default_user_type")]
    pub user_type: UserType,
    /// Block of the initial household
    #[serde(default)]
    pub block_id: Option<String>,
    /// Initial household, counted as an occupant
    #[serde(default)]
    pub household_id: Option<String>,
}

const fn default_user_type() -> UserType {
    UserType::Customer
}

/// Partial update of an account. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    /// New first name
    pub first_name: Option<String>,
    /// New last name
    pub last_name: Option<String>,
    /// New email; must stay unique
    pub email: Option<String>,
    /// New password
    pub password: Option<String>,
    pub user_type: Option<UserType>,
}

/// Retrieves all users ordered by last then first name.
pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::LastName)
        .order_by_asc(user::Column::FirstName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by id, returning None if not found.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

async fn find_by_email<C>(db: &C, email: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn require_field(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{name} is required")));
    }
    Ok(())
}

/// Creates an account as an administrator, optionally placing it in a household.
///
/// # Errors
/// - [`Error::Validation`] for missing names/email/password or a guard with a household
/// - [`Error::Conflict`] if the email is already registered
/// - [`Error::NotFound`] if the requested household does not exist
pub async fn create_user(db: &DatabaseConnection, new_user: NewUser) -> Result<user::Model> {
    require_field("First name", &new_user.first_name)?;
    require_field("Last name", &new_user.last_name)?;
    require_field("Email", &new_user.email)?;
    require_field("Password", &new_user.password)?;

    let email = normalize_email(&new_user.email);
    let txn = db.begin().await?;

    if find_by_email(&txn, &email).await?.is_some() {
        return Err(Error::Conflict {
            message: format!("Email '{email}' is already registered"),
        });
    }

    let user = user::ActiveModel {
        first_name: Set(new_user.first_name.trim().to_string()),
        last_name: Set(new_user.last_name.trim().to_string()),
        email: Set(email),
        password: Set(new_user.password),
        user_type: Set(new_user.user_type),
        block_id: Set(None),
        household_id: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let household_id = new_user.household_id.unwrap_or_default();
    let user = if household_id.trim().is_empty() {
        user
    } else {
        let block_id = new_user.block_id.unwrap_or_default();
        move_occupant(&txn, user, &block_id, &household_id).await?.user
    };

    txn.commit().await?;
    info!(user = user.id, kind = ?user.user_type, "User created");
    Ok(user)
}

/// Self-service registration from the login page. Always creates a customer with no
/// household; an administrator assigns the household later.
pub async fn register_user(db: &DatabaseConnection, new_user: NewUser) -> Result<user::Model> {
    create_user(
        db,
        NewUser {
            user_type: UserType::Customer,
            block_id: None,
            household_id: None,
            ..new_user
        },
    )
    .await
}

/// Applies a partial update.
///
/// Turning a resident into a guard also releases their household.
pub async fn update_user(
    db: &DatabaseConnection,
    user_id: i64,
    update: UserUpdate,
) -> Result<user::Model> {
    let txn = db.begin().await?;

    let mut user = User::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("User", user_id))?;

    if update.user_type == Some(UserType::Guard) && user.household_id.is_some() {
        user = move_occupant(&txn, user, "", "").await?.user;
    }

    let mut active: user::ActiveModel = user.into();

    if let Some(first_name) = update.first_name {
        require_field("First name", &first_name)?;
        active.first_name = Set(first_name.trim().to_string());
    }
    if let Some(last_name) = update.last_name {
        require_field("Last name", &last_name)?;
        active.last_name = Set(last_name.trim().to_string());
    }
    if let Some(email) = update.email {
        require_field("Email", &email)?;
        let email = normalize_email(&email);
        if find_by_email(&txn, &email)
            .await?
            .is_some_and(|existing| existing.id != user_id)
        {
            return Err(Error::Conflict {
                message: format!("Email '{email}' is already registered"),
            });
        }
        active.email = Set(email);
    }
    if let Some(password) = update.password {
        require_field("Password", &password)?;
        active.password = Set(password);
    }
    if let Some(user_type) = update.user_type {
        active.user_type = Set(user_type);
    }

    let user = active.update(&txn).await?;
    txn.commit().await?;
    Ok(user)
}

/// Deletes an account, releasing its household.
pub async fn delete_user(db: &DatabaseConnection, user_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let user = User::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("User", user_id))?;

    if let Some(household_id) = user.household_id.clone() {
        adjust_occupants(&txn, &household_id, -1).await?;
    }

    user.delete(&txn).await?;
    txn.commit().await?;

    info!(user = user_id, "User deleted");
    Ok(())
}

/// Checks credentials and returns the account.
///
/// Passwords are compared verbatim against the stored value.
pub async fn login(db: &DatabaseConnection, email: &str, password: &str) -> Result<user::Model> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(Error::validation("Email and password are required"));
    }

    let email = normalize_email(email);
    match find_by_email(db, &email).await? {
        Some(user) if user.password == password => {
            debug!(user = user.id, "Login succeeded");
            Ok(user)
        }
        _ => {
            debug!(email = %email, "Login rejected");
            Err(Error::Unauthorized)
        }
    }
}
