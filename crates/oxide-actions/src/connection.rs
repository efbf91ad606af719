//! Connection boundary.
//!
//! The dialect never talks to a driver directly. A [`DatabaseConnection`] is
//! either offline (no backend, used to render SQL) or live, in which case a
//! [`ConnectionAdapter`] chosen when the connection was built knows how to
//! reach the vendor-native handle behind any pooling or proxy layer.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ConnectionError;

/// Result type for raw connection calls.
pub type ConnectionResult<T> = std::result::Result<T, ConnectionError>;

/// A vendor-native connection handle.
///
/// Calls block until the backend answers. Implementations must honour the
/// `timeout` passed to every method and return [`ConnectionError::Timeout`]
/// when it elapses.
pub trait RawConnection: Send + Sync {
    /// Returns the comma-separated keyword list reported by the driver.
    fn sql_keywords(&self, timeout: Duration) -> ConnectionResult<String>;

    /// Enables or disables extended remarks in metadata results.
    fn set_remarks_reporting(&self, enabled: bool, timeout: Duration) -> ConnectionResult<()>;

    /// Returns the server's major version.
    fn database_major_version(&self, timeout: Duration) -> ConnectionResult<u32>;

    /// Executes a statement, discarding any rows.
    fn execute(&self, sql: &str, timeout: Duration) -> ConnectionResult<()>;

    /// Runs a query and returns the first column of every row.
    fn query_strings(&self, sql: &str, timeout: Duration) -> ConnectionResult<Vec<String>>;

    /// Runs a query and returns the first column of the first row.
    fn query_string(&self, sql: &str, timeout: Duration) -> ConnectionResult<Option<String>> {
        Ok(self.query_strings(sql, timeout)?.into_iter().next())
    }
}

/// Reaches the native handle behind a live connection.
pub trait ConnectionAdapter: Send + Sync {
    /// Returns the connection URL.
    fn url(&self) -> &str;

    /// Returns the user the connection is authenticated as.
    fn user_name(&self) -> Option<&str>;

    /// Returns the native handle.
    fn unwrap_raw(&self) -> ConnectionResult<Arc<dyn RawConnection>>;
}

/// Adapter for a connection that already is the native handle.
pub struct DirectConnection {
    url: String,
    user_name: Option<String>,
    raw: Arc<dyn RawConnection>,
}

impl DirectConnection {
    /// Wraps a native handle.
    pub fn new(url: impl Into<String>, raw: Arc<dyn RawConnection>) -> Self {
        Self {
            url: url.into(),
            user_name: None,
            raw,
        }
    }

    /// Sets the authenticated user.
    #[must_use]
    pub fn user(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }
}

impl ConnectionAdapter for DirectConnection {
    fn url(&self) -> &str {
        &self.url
    }

    fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    fn unwrap_raw(&self) -> ConnectionResult<Arc<dyn RawConnection>> {
        Ok(Arc::clone(&self.raw))
    }
}

/// A simulated connection with no backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfflineConnection {
    /// Connection URL, e.g. `offline:oracle`.
    pub url: String,
    /// Simulated user.
    pub user_name: Option<String>,
    /// Simulated default catalog.
    pub catalog: Option<String>,
}

impl OfflineConnection {
    /// Creates an offline connection.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets the simulated user.
    #[must_use]
    pub fn user(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    /// Sets the simulated default catalog.
    #[must_use]
    pub fn catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }
}

/// A connection handed to a dialect.
pub enum DatabaseConnection {
    /// No backend; capability probes are skipped.
    Offline(OfflineConnection),
    /// A live backend reached through an adapter.
    Live(Box<dyn ConnectionAdapter>),
}

impl DatabaseConnection {
    /// Creates a live connection from an adapter.
    pub fn live(adapter: impl ConnectionAdapter + 'static) -> Self {
        Self::Live(Box::new(adapter))
    }

    /// Returns true for simulated connections.
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        matches!(self, Self::Offline(_))
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Offline(conn) => &conn.url,
            Self::Live(adapter) => adapter.url(),
        }
    }

    /// Returns the connection user.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        match self {
            Self::Offline(conn) => conn.user_name.as_deref(),
            Self::Live(adapter) => adapter.user_name(),
        }
    }
}

impl From<OfflineConnection> for DatabaseConnection {
    fn from(conn: OfflineConnection) -> Self {
        Self::Offline(conn)
    }
}

impl fmt::Debug for DatabaseConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline(conn) => f.debug_tuple("Offline").field(conn).finish(),
            Self::Live(adapter) => f
                .debug_struct("Live")
                .field("url", &adapter.url())
                .field("user_name", &adapter.user_name())
                .finish(),
        }
    }
}
