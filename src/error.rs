//! Error types for the non-network parts of the client.
//!
//! Remote failures deliberately do not appear here: the service clients
//! swallow transport and status errors and return falsy values, and the
//! session layer converts those into user-visible message strings. The
//! typed errors below cover local storage and client-side validation,
//! both of which are reported before any network call happens.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the local identity store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not determine a data directory")]
    NoDataDir,

    #[error("Failed to create data directory {0}")]
    CreateDir(PathBuf),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client-side field checks, reported without a network round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title and description are required")]
    MissingTaskFields,

    #[error("Invalid hour or minute")]
    InvalidTime,

    #[error("The reminder date cannot be in the past")]
    ReminderInPast,

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("All fields are required")]
    MissingRegistrationFields,

    #[error("Passwords do not match")]
    PasswordMismatch,
}
