#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use oxide_actions::connection::ConnectionResult;
use oxide_actions::prelude::*;
use tracing::Level;

/// Routes dialect logs to the test harness output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

/// A fake native connection with scripted answers and call counters.
pub struct ScriptedConnection {
    pub keywords: ConnectionResult<String>,
    pub major_version: ConnectionResult<u32>,
    pub recycle_bin: ConnectionResult<()>,
    pub user_types: ConnectionResult<Vec<String>>,
    pub current_schema: ConnectionResult<Vec<String>>,
    pub remarks: ConnectionResult<()>,
    pub probe_delay: Duration,
    pub probe_calls: AtomicUsize,
    pub version_calls: AtomicUsize,
    pub type_calls: AtomicUsize,
    pub remarks_calls: AtomicUsize,
    pub timeouts: Mutex<Vec<Duration>>,
}

impl Default for ScriptedConnection {
    fn default() -> Self {
        Self {
            keywords: Ok(String::new()),
            major_version: Ok(19),
            recycle_bin: Ok(()),
            user_types: Ok(Vec::new()),
            current_schema: Ok(vec!["APP".to_string()]),
            remarks: Ok(()),
            probe_delay: Duration::ZERO,
            probe_calls: AtomicUsize::new(0),
            version_calls: AtomicUsize::new(0),
            type_calls: AtomicUsize::new(0),
            remarks_calls: AtomicUsize::new(0),
            timeouts: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedConnection {
    pub fn probes(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    pub fn version_probes(&self) -> usize {
        self.version_calls.load(Ordering::SeqCst)
    }

    pub fn type_queries(&self) -> usize {
        self.type_calls.load(Ordering::SeqCst)
    }

    pub fn remarks_requests(&self) -> usize {
        self.remarks_calls.load(Ordering::SeqCst)
    }

    fn record_timeout(&self, timeout: Duration) {
        self.timeouts.lock().unwrap().push(timeout);
    }
}

impl RawConnection for ScriptedConnection {
    fn sql_keywords(&self, timeout: Duration) -> ConnectionResult<String> {
        self.record_timeout(timeout);
        self.keywords.clone()
    }

    fn set_remarks_reporting(&self, _enabled: bool, timeout: Duration) -> ConnectionResult<()> {
        self.record_timeout(timeout);
        self.remarks_calls.fetch_add(1, Ordering::SeqCst);
        self.remarks.clone()
    }

    fn database_major_version(&self, timeout: Duration) -> ConnectionResult<u32> {
        self.record_timeout(timeout);
        self.version_calls.fetch_add(1, Ordering::SeqCst);
        self.major_version.clone()
    }

    fn execute(&self, sql: &str, timeout: Duration) -> ConnectionResult<()> {
        assert!(sql.contains("dba_recyclebin"), "unexpected statement: {sql}");
        self.record_timeout(timeout);
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.probe_delay);
        self.recycle_bin.clone()
    }

    fn query_strings(&self, sql: &str, timeout: Duration) -> ConnectionResult<Vec<String>> {
        self.record_timeout(timeout);
        if sql.contains("USER_TYPES") {
            self.type_calls.fetch_add(1, Ordering::SeqCst);
            self.user_types.clone()
        } else if sql.contains("current_schema") {
            self.current_schema.clone()
        } else {
            Err(ConnectionError::Unsupported(sql.to_string()))
        }
    }
}

/// An adapter whose native handle cannot be reached.
pub struct OpaquePool;

impl ConnectionAdapter for OpaquePool {
    fn url(&self) -> &str {
        "jdbc:pool:oracle"
    }

    fn user_name(&self) -> Option<&str> {
        Some("APP")
    }

    fn unwrap_raw(&self) -> ConnectionResult<Arc<dyn RawConnection>> {
        Err(ConnectionError::Unwrap("pool does not expose its delegate".into()))
    }
}

/// Binds a fresh Oracle dialect to a scripted live connection.
pub fn live_oracle(raw: &Arc<ScriptedConnection>, user: &str) -> OracleDialect {
    let dialect = OracleDialect::new();
    connect(&dialect, raw, user);
    dialect
}

/// Rebinds a dialect to a scripted live connection.
pub fn connect(dialect: &OracleDialect, raw: &Arc<ScriptedConnection>, user: &str) {
    let handle: Arc<dyn RawConnection> = Arc::clone(raw) as Arc<dyn RawConnection>;
    dialect
        .set_connection(DatabaseConnection::live(
            DirectConnection::new("jdbc:oracle:thin:@localhost:1521/XE", handle).user(user),
        ))
        .unwrap_or_else(|e| panic!("Failed to connect: {e}"));
}

pub fn ora_00942() -> ConnectionError {
    ConnectionError::sql("ORA-00942", "table or view does not exist")
}
