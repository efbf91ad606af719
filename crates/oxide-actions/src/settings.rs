//! Dialect settings.
//!
//! Settings are plain data with serde defaults so they can be embedded in a
//! larger configuration file or built programmatically.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default upper bound for a single capability probe.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 30_000;

/// Default name of the change log tracking table.
pub const DEFAULT_CHANGELOG_TABLE: &str = "DATABASECHANGELOG";

/// Default name of the change log lock table.
pub const DEFAULT_CHANGELOG_LOCK_TABLE: &str = "DATABASECHANGELOGLOCK";

/// Tunables shared by every dialect implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectSettings {
    /// Upper bound for a single capability probe round-trip, in milliseconds.
    pub probe_timeout_ms: u64,
    /// Whether to ask the driver for extended remarks at connect time.
    pub remarks_reporting: bool,
    /// Change log tracking table owned by the migration tool.
    pub changelog_table: String,
    /// Change log lock table owned by the migration tool.
    pub changelog_lock_table: String,
}

impl Default for DialectSettings {
    fn default() -> Self {
        Self {
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            remarks_reporting: true,
            changelog_table: DEFAULT_CHANGELOG_TABLE.to_string(),
            changelog_lock_table: DEFAULT_CHANGELOG_LOCK_TABLE.to_string(),
        }
    }
}

impl DialectSettings {
    /// Creates settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the probe timeout.
    #[must_use]
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Enables or disables remarks reporting.
    #[must_use]
    pub fn remarks_reporting(mut self, enabled: bool) -> Self {
        self.remarks_reporting = enabled;
        self
    }

    /// Overrides the tracking table names.
    #[must_use]
    pub fn changelog_tables(
        mut self,
        changelog: impl Into<String>,
        lock: impl Into<String>,
    ) -> Self {
        self.changelog_table = changelog.into();
        self.changelog_lock_table = lock.into();
        self
    }

    /// Returns the probe timeout as a `Duration`.
    #[must_use]
    pub fn probe_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DialectError;

    #[test]
    fn test_defaults() {
        let settings = DialectSettings::default();
        assert_eq!(settings.probe_timeout_duration(), Duration::from_secs(30));
        assert!(settings.remarks_reporting);
        assert_eq!(settings.changelog_table, "DATABASECHANGELOG");
        assert_eq!(settings.changelog_lock_table, "DATABASECHANGELOGLOCK");
    }

    #[test]
    fn test_from_json_partial() {
        let settings =
            DialectSettings::from_json(r#"{"probe_timeout_ms": 500, "remarks_reporting": false}"#)
                .unwrap();
        assert_eq!(settings.probe_timeout_duration(), Duration::from_millis(500));
        assert!(!settings.remarks_reporting);
        assert_eq!(settings.changelog_table, DEFAULT_CHANGELOG_TABLE);
    }

    #[test]
    fn test_from_json_invalid() {
        let result = DialectSettings::from_json(r#"{"probe_timeout_ms": "soon"}"#);
        assert!(matches!(result, Err(DialectError::Settings(_))));
    }

    #[test]
    fn test_builder() {
        let settings = DialectSettings::new()
            .probe_timeout(Duration::from_secs(2))
            .remarks_reporting(false)
            .changelog_tables("APP_LOG", "APP_LOG_LOCK");
        assert_eq!(settings.probe_timeout_ms, 2_000);
        assert!(!settings.remarks_reporting);
        assert_eq!(settings.changelog_table, "APP_LOG");
        assert_eq!(settings.changelog_lock_table, "APP_LOG_LOCK");
    }
}
