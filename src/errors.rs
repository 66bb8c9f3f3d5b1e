//! Unified error type for the subdivision desk.
//!
//! Every core operation returns [`Result`]; the HTTP layer maps each variant onto a
//! status code in [`crate::api::error`].

use thiserror::Error;

/// Errors produced by core operations, configuration loading and the HTTP layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or a value is out of range.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason, returned to the caller as-is
        message: String,
    },

    /// A referenced record does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Kind of record (e.g. "Household")
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// The request collides with existing data (e.g. duplicate email).
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable reason
        message: String,
    },

    /// Login credentials did not match.
    #[error("Invalid email or password")]
    Unauthorized,

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable reason
        message: String,
    },

    /// Underlying `SeaORM` failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (config file, socket bind).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable missing or not unicode.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`] for the given entity kind and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
