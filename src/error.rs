#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use thiserror::Error;

/// Error code constants for type-safe error handling
pub mod code {
    pub const NOTFOUND: &str = "NOTFOUND";
    pub const INVALID: &str = "INVALID";
    pub const CONFLICT: &str = "CONFLICT";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const DEPENDENCY: &str = "DEPENDENCY";
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const INTERNAL: &str = "INTERNAL";
}

#[derive(Error, Debug)]
pub enum BarberError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Subscription error: {0}")]
    SubscriptionError(String),

    #[error("Status update rejected: {0}")]
    WriteRejected(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BarberError {
    /// Wraps a failed database call. Pool acquire timeouts become
    /// [`BarberError::Timeout`] so they surface as `TIMEOUT`.
    #[must_use]
    pub fn database(context: &str, error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut => Self::Timeout(format!("{context}: {error}")),
            _ => Self::DatabaseError(format!("{context}: {error}")),
        }
    }

    /// Returns the protocol error code for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) | Self::InvalidQuery(_) => code::INVALID,
            Self::DatabaseError(_) | Self::Internal(_) => code::INTERNAL,
            Self::SubscriptionError(_) => code::DEPENDENCY,
            Self::Timeout(_) => code::TIMEOUT,
            Self::WriteRejected(_) => code::CONFLICT,
            Self::NotFound(_) => code::NOTFOUND,
            Self::Unauthorized(_) => code::UNAUTHORIZED,
        }
    }

    /// Returns the exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigError(_) | Self::InvalidQuery(_) => 2,
            Self::DatabaseError(_) => 3,
            Self::SubscriptionError(_) => 4,
            Self::WriteRejected(_) => 5,
            Self::NotFound(_) => 6,
            Self::Unauthorized(_) => 7,
            Self::Timeout(_) => 8,
            Self::Internal(_) => 10,
        }
    }
}

/// Protocol error codes as documented in the CLI
pub const ERROR_CODES: &[(&str, &str, &str)] = &[
    (
        code::NOTFOUND,
        "Appointment or customer was not found",
        "List appointments and verify the identifier",
    ),
    (
        code::INVALID,
        "Invalid request or configuration",
        "Check filter names, order keys and .barber/config.toml",
    ),
    (
        code::CONFLICT,
        "Status update was rejected",
        "Refresh the appointment list; the stored status is authoritative",
    ),
    (
        code::UNAUTHORIZED,
        "No staff session available",
        "Set staff_uid in .barber/config.toml or BARBER_STAFF_UID",
    ),
    (
        code::DEPENDENCY,
        "Live feed or system dependency unavailable",
        "Verify the database is reachable and subscribe again",
    ),
    (
        code::TIMEOUT,
        "Operation timed out",
        "Increase connect_timeout_ms and retry",
    ),
    (
        code::INTERNAL,
        "Unexpected internal failure",
        "Inspect logs and retry command",
    ),
];

/// Get error code details (description and fix) for a given error code
#[must_use]
pub fn get_error_info(error_code: &str) -> Option<(&'static str, &'static str)> {
    ERROR_CODES
        .iter()
        .find(|(code, _, _)| *code == error_code)
        .map(|(_, desc, fix)| (*desc, *fix))
}

pub type Result<T> = std::result::Result<T, BarberError>;

#[cfg(test)]
mod tests {
    use super::{code, get_error_info, BarberError};

    #[test]
    fn every_error_code_has_documentation() {
        let errors = [
            BarberError::ConfigError("x".to_string()),
            BarberError::DatabaseError("x".to_string()),
            BarberError::SubscriptionError("x".to_string()),
            BarberError::WriteRejected("x".to_string()),
            BarberError::NotFound("x".to_string()),
            BarberError::InvalidQuery("x".to_string()),
            BarberError::Unauthorized("x".to_string()),
            BarberError::Timeout("x".to_string()),
            BarberError::Internal("x".to_string()),
        ];

        for error in errors {
            assert!(
                get_error_info(error.code()).is_some(),
                "missing docs for {}",
                error.code()
            );
        }
    }

    #[test]
    fn write_rejection_is_a_conflict_not_a_crash() {
        let error = BarberError::WriteRejected("timeout".to_string());
        assert_eq!(error.code(), code::CONFLICT);
        assert_eq!(error.exit_code(), 5);
    }

    #[test]
    fn pool_timeout_maps_to_timeout_code() {
        let error = BarberError::database("Failed to connect", &sqlx::Error::PoolTimedOut);
        assert!(matches!(error, BarberError::Timeout(_)));
        assert_eq!(error.code(), code::TIMEOUT);
        assert_eq!(error.exit_code(), 8);

        let other = BarberError::database("Failed to connect", &sqlx::Error::PoolClosed);
        assert_eq!(other.code(), code::INTERNAL);
        assert!(other.to_string().contains("Failed to connect"));
    }

    #[test]
    fn unknown_code_has_no_info() {
        assert!(get_error_info("NOPE").is_none());
    }
}
