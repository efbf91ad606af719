//! Error types for dialect setup and connection access.

use std::time::Duration;

/// Errors reported by a raw vendor connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The backend rejected a statement.
    #[error("{message}")]
    Sql {
        /// Vendor error code (e.g. `ORA-00942`), when the driver reports one.
        code: Option<String>,
        /// Driver message.
        message: String,
    },

    /// The round-trip did not finish within the probe timeout.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// The connection does not expose the requested feature.
    #[error("Unsupported connection operation: {0}")]
    Unsupported(String),

    /// The connection cannot be unwrapped to a native handle.
    #[error("Cannot obtain native connection: {0}")]
    Unwrap(String),

    /// The connection has been closed.
    #[error("Connection is closed")]
    Closed,
}

impl ConnectionError {
    /// Creates a SQL error carrying a vendor code.
    pub fn sql(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Sql {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// Returns the vendor code, looking at the message prefix when the driver
    /// did not report one separately.
    #[must_use]
    pub fn vendor_code(&self) -> Option<&str> {
        match self {
            Self::Sql {
                code: Some(code), ..
            } => Some(code.as_str()),
            Self::Sql {
                code: None,
                message,
            } => message.split(':').next().filter(|prefix| {
                prefix.len() > 4
                    && prefix
                        .get(..4)
                        .is_some_and(|head| head.eq_ignore_ascii_case("ORA-"))
            }),
            _ => None,
        }
    }
}

/// Errors that can occur while configuring a dialect.
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    /// Something required before the dialect can work at all failed.
    #[error("Unexpected error while setting up {dialect} connection: {source}")]
    UnexpectedSetup {
        /// Dialect short name.
        dialect: &'static str,
        /// Underlying connection failure.
        #[source]
        source: ConnectionError,
    },

    /// Settings could not be parsed.
    #[error("Invalid dialect settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
