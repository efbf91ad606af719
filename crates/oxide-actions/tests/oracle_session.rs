//! Integration tests for the Oracle dialect bound to a live connection.
//!
//! A scripted native connection stands in for the driver so probe counts,
//! failures and timeouts can be observed.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{OpaquePool, ScriptedConnection, connect, init_tracing, live_oracle, ora_00942};
use oxide_actions::prelude::*;

// =============================================================================
// Connection setup
// =============================================================================

#[test]
fn test_driver_keywords_are_merged() {
    init_tracing();
    let raw = Arc::new(ScriptedConnection {
        keywords: Ok("ACCESS, audit,COMPRESS".to_string()),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    assert!(dialect.is_reserved_word("access"));
    assert!(dialect.is_reserved_word("Audit"));
    assert!(dialect.is_reserved_word("compress"));
    assert!(dialect.is_reserved_word("user"));
    assert!(!dialect.is_reserved_word("orders"));
    assert_eq!(dialect.escape_object_name("audit"), "\"audit\"");
}

#[test]
fn test_keyword_failure_keeps_static_words() {
    init_tracing();
    let raw = Arc::new(ScriptedConnection {
        keywords: Err(ConnectionError::Unsupported("getSQLKeywords".into())),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    assert!(!dialect.is_offline());
    assert!(dialect.is_reserved_word("SESSION"));
    assert!(!dialect.is_reserved_word("ACCESS"));
}

#[test]
fn test_unreachable_native_handle_is_fatal() {
    init_tracing();
    let dialect = OracleDialect::new();
    let err = dialect
        .set_connection(DatabaseConnection::live(OpaquePool))
        .unwrap_err();

    assert!(matches!(
        err,
        DialectError::UnexpectedSetup {
            dialect: "oracle",
            source: ConnectionError::Unwrap(_),
        }
    ));
    assert!(err
        .to_string()
        .starts_with("Unexpected error while setting up oracle connection"));
    assert!(dialect.is_offline());
}

#[test]
fn test_remarks_failure_is_ignored() {
    init_tracing();
    let raw = Arc::new(ScriptedConnection {
        remarks: Err(ConnectionError::Closed),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    assert_eq!(raw.remarks_requests(), 1);
    assert!(!dialect.is_offline());
}

#[test]
fn test_remarks_reporting_can_be_disabled() {
    let raw = Arc::new(ScriptedConnection::default());
    let dialect = OracleDialect::with_settings(DialectSettings::new().remarks_reporting(false));
    connect(&dialect, &raw, "APP");

    assert_eq!(raw.remarks_requests(), 0);
}

#[test]
fn test_connection_metadata() {
    let raw = Arc::new(ScriptedConnection::default());
    let dialect = live_oracle(&raw, "APP");

    assert_eq!(dialect.connection_user().as_deref(), Some("APP"));
    assert_eq!(dialect.connection_schema_name().as_deref(), Some("APP"));
}

#[test]
fn test_schema_lookup_failure_yields_none() {
    let raw = Arc::new(ScriptedConnection {
        current_schema: Err(ConnectionError::Timeout(Duration::from_secs(30))),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    assert_eq!(dialect.connection_schema_name(), None);
}

// =============================================================================
// Recycle bin probe
// =============================================================================

#[test]
fn test_recycle_bin_probe_runs_once() {
    init_tracing();
    let raw = Arc::new(ScriptedConnection::default());
    let dialect = live_oracle(&raw, "APP");

    assert!(dialect.can_access_dba_recycle_bin());
    assert!(dialect.can_access_dba_recycle_bin());
    assert_eq!(raw.probes(), 1);
}

#[test]
fn test_recycle_bin_probe_runs_once_across_threads() {
    let raw = Arc::new(ScriptedConnection {
        probe_delay: Duration::from_millis(20),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| dialect.can_access_dba_recycle_bin()))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
    assert_eq!(raw.probes(), 1);
}

#[test]
fn test_missing_view_caches_no_access() {
    init_tracing();
    let raw = Arc::new(ScriptedConnection {
        recycle_bin: Err(ora_00942()),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    assert!(!dialect.can_access_dba_recycle_bin());
    assert!(!dialect.can_access_dba_recycle_bin());
    assert_eq!(raw.probes(), 1);
}

#[test]
fn test_vendor_code_from_message_prefix() {
    let raw = Arc::new(ScriptedConnection {
        recycle_bin: Err(ConnectionError::Sql {
            code: None,
            message: "ORA-00942: table or view does not exist".into(),
        }),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    assert!(!dialect.can_access_dba_recycle_bin());
    assert_eq!(raw.probes(), 1);
}

#[test]
fn test_unexpected_probe_error_caches_no_access() {
    init_tracing();
    let raw = Arc::new(ScriptedConnection {
        recycle_bin: Err(ConnectionError::Timeout(Duration::from_secs(30))),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    assert!(!dialect.can_access_dba_recycle_bin());
    assert!(!dialect.can_access_dba_recycle_bin());
    assert_eq!(raw.probes(), 1);
}

#[test]
fn test_offline_never_probes() {
    let dialect = OracleDialect::new();
    dialect
        .set_connection(OfflineConnection::new("offline:oracle").into())
        .unwrap();

    assert!(!dialect.can_access_dba_recycle_bin());
    assert!(!dialect.can_access_dba_recycle_bin());
}

#[test]
fn test_reconnect_invalidates_cached_probes() {
    let first = Arc::new(ScriptedConnection {
        recycle_bin: Err(ora_00942()),
        major_version: Ok(11),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&first, "APP");
    assert!(!dialect.can_access_dba_recycle_bin());
    assert!(!dialect.supports_auto_increment());

    let second = Arc::new(ScriptedConnection::default());
    connect(&dialect, &second, "APP");
    assert!(dialect.can_access_dba_recycle_bin());
    assert!(dialect.supports_auto_increment());

    assert_eq!(first.probes(), 1);
    assert_eq!(second.probes(), 1);
}

#[test]
fn test_probe_timeout_is_passed_to_driver() {
    let raw = Arc::new(ScriptedConnection::default());
    let dialect = OracleDialect::with_settings(
        DialectSettings::new().probe_timeout(Duration::from_secs(5)),
    );
    connect(&dialect, &raw, "APP");

    dialect.can_access_dba_recycle_bin();
    dialect.supports_auto_increment();
    let _ = dialect.user_defined_types();
    let _ = dialect.connection_schema_name();

    // keywords, remarks, recycle bin, version, user types, current schema
    let timeouts = raw.timeouts.lock().unwrap();
    assert_eq!(timeouts.len(), 6);
    assert!(timeouts.iter().all(|t| *t == Duration::from_secs(5)));
}

// =============================================================================
// Version gating and user types
// =============================================================================

#[test]
fn test_auto_increment_requires_version_12() {
    for (version, expected) in [(Ok(11), false), (Ok(12), true), (Ok(21), true)] {
        let raw = Arc::new(ScriptedConnection {
            major_version: version,
            ..ScriptedConnection::default()
        });
        let dialect = live_oracle(&raw, "APP");
        assert_eq!(dialect.supports_auto_increment(), expected);
    }
}

#[test]
fn test_unknown_version_disables_auto_increment() {
    let raw = Arc::new(ScriptedConnection {
        major_version: Err(ConnectionError::Closed),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    assert!(!dialect.supports_auto_increment());
    assert!(!dialect.supports_auto_increment());
    assert_eq!(raw.version_probes(), 1);
}

#[test]
fn test_user_defined_types_are_memoized() {
    let raw = Arc::new(ScriptedConnection {
        user_types: Ok(vec!["ADDRESS_T".into(), "PHONE_T".into()]),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    let types = dialect.user_defined_types();
    assert!(types.contains("ADDRESS_T"));
    assert!(types.contains("PHONE_T"));
    assert_eq!(dialect.user_defined_types(), types);
    assert_eq!(raw.type_queries(), 1);
}

#[test]
fn test_user_defined_types_failure_is_empty() {
    let raw = Arc::new(ScriptedConnection {
        user_types: Err(ConnectionError::Closed),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    assert!(dialect.user_defined_types().is_empty());
}

// =============================================================================
// Validation and system objects
// =============================================================================

#[test]
fn test_validate_warns_without_recycle_bin_access() {
    let raw = Arc::new(ScriptedConnection {
        recycle_bin: Err(ora_00942()),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    let result = dialect.validate();
    assert!(!result.has_errors());
    assert_eq!(result.warnings().len(), 1);
    assert!(result.warnings()[0].contains("GRANT SELECT ON SYS.DBA_RECYCLEBIN TO APP;"));
}

#[test]
fn test_validate_passes_with_recycle_bin_access() {
    let raw = Arc::new(ScriptedConnection::default());
    let dialect = live_oracle(&raw, "APP");

    let result = dialect.validate();
    assert!(!result.has_errors());
    assert!(!result.has_warnings());
}

#[test]
fn test_recycled_objects_with_access() {
    let raw = Arc::new(ScriptedConnection::default());
    let dialect = live_oracle(&raw, "APP");

    let index = DatabaseObject::new(ObjectKind::Index, "BIN$k2==$0").in_schema("HR");
    let key = DatabaseObject::new(ObjectKind::PrimaryKey, "BIN$k3==$0").in_schema("HR");
    let table = DatabaseObject::table("BIN$t1==$0").in_schema("HR");

    assert!(!dialect.is_system_object(&index));
    assert!(!dialect.is_system_object(&key));
    assert!(dialect.is_system_object(&table));
}

#[test]
fn test_recycled_objects_without_access() {
    let raw = Arc::new(ScriptedConnection {
        recycle_bin: Err(ora_00942()),
        ..ScriptedConnection::default()
    });
    let dialect = live_oracle(&raw, "APP");

    let own = DatabaseObject::new(ObjectKind::UniqueConstraint, "BIN$u1==$0").in_schema("app");
    let foreign = DatabaseObject::new(ObjectKind::UniqueConstraint, "BIN$u1==$0").in_schema("HR");

    assert!(!dialect.is_system_object(&own));
    assert!(dialect.is_system_object(&foreign));
}
