//! Generated actions.
//!
//! Actions are the output of generation. Executing them against a live
//! backend is the caller's concern.

use std::fmt;

/// An ordered, executable unit of work.
pub trait Action: fmt::Debug + Send + Sync {
    /// Human-readable description used for logging and explain output.
    fn describe(&self) -> String;
}

/// A SQL statement ready to be sent to the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlAction {
    sql: String,
    end_delimiter: String,
}

impl SqlAction {
    /// Creates an action terminated by `;`.
    pub fn new(sql: impl Into<String>) -> Self {
        Self::with_delimiter(sql, ";")
    }

    /// Creates an action with an explicit end delimiter.
    pub fn with_delimiter(sql: impl Into<String>, end_delimiter: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            end_delimiter: end_delimiter.into(),
        }
    }

    /// Returns the SQL without its delimiter.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the end delimiter.
    #[must_use]
    pub fn end_delimiter(&self) -> &str {
        &self.end_delimiter
    }
}

impl Action for SqlAction {
    fn describe(&self) -> String {
        format!("{}{}", self.sql, self.end_delimiter)
    }
}

impl fmt::Display for SqlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sql, self.end_delimiter)
    }
}
