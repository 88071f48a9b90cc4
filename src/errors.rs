//! Unified error type for `AquaTrack`.
//!
//! Core functions return [`Result`] and propagate with `?`; the HTTP layer maps
//! each variant to a status code in [`crate::api::error`].

use thiserror::Error;

/// All failures the service can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Inbound data failed validation
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field (wire name)
        field: String,
        /// Human-readable reason
        message: String,
    },

    /// Customer does not exist or belongs to another account
    #[error("Customer not found: {id}")]
    CustomerNotFound {
        /// Requested customer ID
        id: i64,
    },

    /// Order does not exist or belongs to another account
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// Requested order ID
        id: i64,
    },

    /// Write would violate a uniqueness rule
    #[error("Conflict: {message}")]
    Conflict {
        /// What collided
        message: String,
    },

    /// No valid session was presented
    #[error("Unauthorized")]
    Unauthorized,

    /// The presented session has expired
    #[error("Session expired")]
    SessionExpired,

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (config file, socket binding)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// HTTP server failure
    #[error("Server error: {message}")]
    Server {
        /// What went wrong
        message: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Validation`] on `field`.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
