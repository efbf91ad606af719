//! Oracle dialect.
//!
//! Static facts live on the dialect itself. Everything learned from a live
//! connection (driver keywords, server version, privilege probes) lives in a
//! per-connection session that is replaced wholesale on reconnect, so every
//! cached fact is invalidated at the same time.

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, LazyLock, OnceLock, PoisonError, RwLock};

use regex::Regex;
use tracing::{debug, info, warn};

use super::generic::{self, DateShape};
use super::object::{DatabaseFunction, DatabaseObject, ObjectKind};
use super::system_objects::{self, Verdict, ORACLE_NAME_RULES, ORACLE_SYSTEM_SCHEMAS};
use super::Dialect;
use crate::connection::{DatabaseConnection, RawConnection};
use crate::error::{ConnectionError, DialectError, Result};
use crate::settings::DialectSettings;
use crate::validation::ValidationErrors;

const SHORT_NAME: &str = "oracle";

/// Reserved words the Oracle driver does not report.
pub const STATIC_RESERVED_WORDS: &[&str] = &[
    "GROUP", "USER", "SESSION", "PASSWORD", "RESOURCE", "START", "SIZE", "UID", "DESC",
];

/// First major version with identity columns.
pub const AUTO_INCREMENT_MIN_MAJOR_VERSION: u32 = 12;

/// Longest table name that fits in a `PK_` constraint name.
const MAX_PK_TABLE_NAME_LENGTH: usize = 27;

/// Error code for "table or view does not exist".
const TABLE_DOES_NOT_EXIST: &str = "ORA-00942";

const RECYCLE_BIN_PROBE_SQL: &str = "select 1 from dba_recyclebin where 0=1";
const USER_TYPES_SQL: &str = "SELECT TYPE_NAME FROM USER_TYPES";
const CURRENT_SCHEMA_SQL: &str = "select sys_context( 'userenv', 'current_schema' ) from dual";

static QUOTED_QUALIFIED_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^."]*)\.([^."]*)""#).expect("Invalid sequence name regex")
});

/// State bound to one connection.
struct Session {
    connection: DatabaseConnection,
    raw: Option<Arc<dyn RawConnection>>,
    reserved_words: HashSet<String>,
    major_version: OnceLock<Option<u32>>,
    recycle_bin_access: OnceLock<bool>,
    user_defined_types: OnceLock<BTreeSet<String>>,
}

impl Session {
    fn new(
        connection: DatabaseConnection,
        raw: Option<Arc<dyn RawConnection>>,
        reserved_words: HashSet<String>,
    ) -> Self {
        Self {
            connection,
            raw,
            reserved_words,
            major_version: OnceLock::new(),
            recycle_bin_access: OnceLock::new(),
            user_defined_types: OnceLock::new(),
        }
    }

    /// Returns the native handle for live connections.
    fn live(&self) -> Option<&Arc<dyn RawConnection>> {
        if self.connection.is_offline() {
            None
        } else {
            self.raw.as_ref()
        }
    }
}

/// Oracle dialect.
pub struct OracleDialect {
    settings: DialectSettings,
    session: RwLock<Option<Arc<Session>>>,
}

impl Default for OracleDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl OracleDialect {
    /// Creates an unconnected Oracle dialect with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(DialectSettings::default())
    }

    /// Creates an unconnected Oracle dialect.
    #[must_use]
    pub fn with_settings(settings: DialectSettings) -> Self {
        Self {
            settings,
            session: RwLock::new(None),
        }
    }

    /// Binds the dialect to a connection.
    ///
    /// Reserved words are finalized here: the static list merged with the
    /// keywords the driver reports. For live connections the native handle
    /// must be reachable; failing that is fatal. Keyword retrieval and
    /// remarks reporting are optional and only logged when they fail.
    /// Any previous session and its cached probes are discarded.
    pub fn set_connection(&self, connection: DatabaseConnection) -> Result<()> {
        let mut reserved_words: HashSet<String> = STATIC_RESERVED_WORDS
            .iter()
            .map(|word| (*word).to_string())
            .collect();

        let raw = match &connection {
            DatabaseConnection::Offline(_) => None,
            DatabaseConnection::Live(adapter) => {
                let raw = adapter
                    .unwrap_raw()
                    .map_err(|source| DialectError::UnexpectedSetup {
                        dialect: SHORT_NAME,
                        source,
                    })?;
                Some(raw)
            }
        };

        if let Some(raw) = &raw {
            let timeout = self.settings.probe_timeout_duration();
            match raw.sql_keywords(timeout) {
                Ok(keywords) => reserved_words.extend(split_keywords(&keywords)),
                Err(e) => info!(error = %e, "Could not get SQL keywords from Oracle driver"),
            }

            if self.settings.remarks_reporting {
                if let Err(e) = raw.set_remarks_reporting(true, timeout) {
                    info!(error = %e, "Could not enable remarks reporting on Oracle connection");
                }
            }
        }

        info!(
            dialect = SHORT_NAME,
            url = %connection.url(),
            offline = connection.is_offline(),
            reserved_words = reserved_words.len(),
            "Dialect connected"
        );

        let session = Arc::new(Session::new(connection, raw, reserved_words));
        *self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    fn session(&self) -> Option<Arc<Session>> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true when bound to an offline connection or not bound at all.
    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.session()
            .map_or(true, |s| s.connection.is_offline())
    }

    /// Returns the user of the bound connection.
    #[must_use]
    pub fn connection_user(&self) -> Option<String> {
        self.session()
            .and_then(|s| s.connection.user_name().map(str::to_string))
    }

    /// Returns the schema the connection resolves unqualified names in.
    ///
    /// Offline connections report their simulated catalog. Lookup failures
    /// are logged and yield `None`.
    #[must_use]
    pub fn connection_schema_name(&self) -> Option<String> {
        let session = self.session()?;
        if let DatabaseConnection::Offline(offline) = &session.connection {
            return offline.catalog.clone();
        }
        let raw = session.live()?;
        match raw.query_string(CURRENT_SCHEMA_SQL, self.settings.probe_timeout_duration()) {
            Ok(schema) => schema,
            Err(e) => {
                info!(error = %e, "Error getting default schema");
                None
            }
        }
    }

    /// Returns the user-defined type names of the connection user.
    ///
    /// Queried once per connection; failures yield an empty set.
    #[must_use]
    pub fn user_defined_types(&self) -> BTreeSet<String> {
        let Some(session) = self.session() else {
            return BTreeSet::new();
        };
        let Some(raw) = session.live() else {
            return BTreeSet::new();
        };
        session
            .user_defined_types
            .get_or_init(|| {
                match raw.query_strings(USER_TYPES_SQL, self.settings.probe_timeout_duration()) {
                    Ok(types) => types.into_iter().collect(),
                    Err(e) => {
                        debug!(error = %e, "Could not list user-defined types");
                        BTreeSet::new()
                    }
                }
            })
            .clone()
    }

    /// Explains how to grant the recycle-bin privilege.
    #[must_use]
    pub fn dba_recycle_bin_warning(&self) -> String {
        let user = self
            .connection_user()
            .unwrap_or_else(|| "<connection user>".to_string());
        format!(
            "The DBA_RECYCLEBIN view must be readable so that constraints dropped and \
             restored from the recycle bin can be handled automatically. Oracle does not \
             restore the original table names referenced by such constraints; the \
             information in DBA_RECYCLEBIN is used to correct them.\n\
             \n\
             The connection user ({user}) needs \"SELECT ON SYS.DBA_RECYCLEBIN\" before this \
             can be done. Run the following SQL and try again:\n\
             \n\
             \x20    GRANT SELECT ON SYS.DBA_RECYCLEBIN TO {user};"
        )
    }

    fn probe_recycle_bin(&self, raw: &dyn RawConnection) -> bool {
        match raw.execute(RECYCLE_BIN_PROBE_SQL, self.settings.probe_timeout_duration()) {
            Ok(()) => true,
            Err(e) if is_missing_table(&e) => {
                debug!("dba_recyclebin is not visible to the connection user");
                false
            }
            Err(e) => {
                warn!(error = %e, "Cannot check dba_recyclebin access");
                false
            }
        }
    }

    fn server_major_version(&self) -> Option<u32> {
        let session = self.session()?;
        let raw = session.live()?;
        let timeout = self.settings.probe_timeout_duration();
        *session
            .major_version
            .get_or_init(|| match raw.database_major_version(timeout) {
                Ok(version) => Some(version),
                Err(e) => {
                    info!(error = %e, "Could not determine Oracle server version");
                    None
                }
            })
    }

    fn is_system_schema(name: Option<&str>) -> bool {
        name.is_some_and(|name| ORACLE_SYSTEM_SCHEMAS.contains(&name))
    }

    /// A `BIN$` object is filtered by the metadata query when the recycle
    /// bin is readable or the object lives in the connection user's schema.
    fn recycled_object_is_system(&self, object: &DatabaseObject) -> bool {
        let mut filtered_by_metadata_query = self.can_access_dba_recycle_bin();
        if !filtered_by_metadata_query {
            let schema = object.schema_name().unwrap_or_default().trim();
            filtered_by_metadata_query = self
                .connection_user()
                .is_some_and(|user| schema.eq_ignore_ascii_case(&user));
        }
        system_objects::recycled_object_is_system(object.kind, filtered_by_metadata_query)
    }
}

/// Returns true for "table or view does not exist", whatever the code's case.
fn is_missing_table(error: &ConnectionError) -> bool {
    error
        .vendor_code()
        .is_some_and(|code| code.eq_ignore_ascii_case(TABLE_DOES_NOT_EXIST))
}

/// Splits a driver keyword list on commas followed by optional whitespace.
fn split_keywords(keywords: &str) -> impl Iterator<Item = String> + '_ {
    keywords
        .split(',')
        .map(|word| word.trim_start().to_uppercase())
        .filter(|word| !word.is_empty())
}

impl Dialect for OracleDialect {
    fn short_name(&self) -> &'static str {
        SHORT_NAME
    }

    fn product_name(&self) -> &'static str {
        "Oracle"
    }

    fn default_port(&self) -> Option<u16> {
        Some(1521)
    }

    fn settings(&self) -> &DialectSettings {
        &self.settings
    }

    fn is_reserved_word(&self, name: &str) -> bool {
        let upper = name.to_uppercase();
        match self.session() {
            Some(session) => session.reserved_words.contains(&upper),
            None => STATIC_RESERVED_WORDS.contains(&upper.as_str()),
        }
    }

    fn supports_sequences(&self) -> bool {
        true
    }

    /// Oracle users double as schemas; there is no separate schema level.
    fn supports_schemas(&self) -> bool {
        false
    }

    fn supports_auto_increment(&self) -> bool {
        self.server_major_version()
            .is_some_and(|major| major >= AUTO_INCREMENT_MIN_MAJOR_VERSION)
    }

    fn supports_initially_deferrable_columns(&self) -> bool {
        true
    }

    fn supports_tablespaces(&self) -> bool {
        true
    }

    fn supports_restrict_foreign_keys(&self) -> bool {
        false
    }

    fn unquoted_identifiers_uppercased(&self) -> bool {
        true
    }

    fn generate_primary_key_name(&self, table_name: &str) -> String {
        let upper: String = table_name
            .to_uppercase()
            .chars()
            .take(MAX_PK_TABLE_NAME_LENGTH)
            .collect();
        format!("PK_{upper}")
    }

    fn date_literal(&self, iso: &str) -> String {
        let Some(shape) = DateShape::classify(iso) else {
            return format!("UNSUPPORTED:{iso}");
        };
        let literal = generic::date_literal(iso);
        match shape {
            DateShape::DateOnly => format!("to_date({literal}, 'YYYY-MM-DD')"),
            DateShape::TimeOnly => format!("to_date({literal}, 'HH24:MI:SS')"),
            DateShape::Timestamp => {
                format!("to_timestamp({literal}, 'YYYY-MM-DD HH24:MI:SS.FF')")
            }
            DateShape::DateTime => format!("to_date({literal}, 'YYYY-MM-DD HH24:MI:SS')"),
        }
    }

    fn current_date_time_function(&self) -> &str {
        "SYSTIMESTAMP"
    }

    fn sequence_next_value_sql(&self, sequence: &str) -> String {
        format!("{sequence}.nextval")
    }

    fn sequence_current_value_sql(&self, sequence: &str) -> String {
        format!("{sequence}.currval")
    }

    fn generate_database_function_value(&self, function: &DatabaseFunction) -> String {
        match function {
            DatabaseFunction::Expression(value) if value.eq_ignore_ascii_case("current_timestamp") => {
                value.clone()
            }
            DatabaseFunction::SequenceNextValue(_) | DatabaseFunction::SequenceCurrentValue(_) => {
                // "schema.seq".nextval -> "schema"."seq".nextval
                let quoted = generic::database_function_value(self, function);
                QUOTED_QUALIFIED_SEQUENCE
                    .replacen(&quoted, 1, r#""$1"."$2""#)
                    .into_owned()
            }
            DatabaseFunction::Expression(_) => generic::database_function_value(self, function),
        }
    }

    fn data_type_max_parameters(&self, data_type: &str) -> u32 {
        if data_type.eq_ignore_ascii_case("BINARY_FLOAT")
            || data_type.eq_ignore_ascii_case("BINARY_DOUBLE")
        {
            0
        } else {
            2
        }
    }

    fn is_system_object(&self, object: &DatabaseObject) -> bool {
        if self.is_tracking_object(object) {
            return false;
        }

        if object.kind == ObjectKind::Schema {
            if Self::is_system_schema(object.name.as_deref())
                || Self::is_system_schema(object.catalog_name())
            {
                return true;
            }
        } else if object
            .schema_object()
            .is_some_and(|schema| self.is_system_object(&schema))
        {
            return true;
        }

        if object.kind == ObjectKind::Catalog {
            if Self::is_system_schema(object.name.as_deref()) {
                return true;
            }
        } else if let Some(name) = object.name.as_deref() {
            if let Some(rule) = system_objects::first_match(ORACLE_NAME_RULES, name) {
                let is_system = match rule.verdict {
                    Verdict::System => true,
                    Verdict::RecycleBin => self.recycled_object_is_system(object),
                };
                debug!(
                    name = %name,
                    reason = rule.reason,
                    is_system,
                    "Matched system object rule"
                );
                return is_system;
            }
        }

        generic::is_system_object(self, object)
    }

    fn can_access_dba_recycle_bin(&self) -> bool {
        let Some(session) = self.session() else {
            return false;
        };
        let Some(raw) = session.live() else {
            return false;
        };
        *session
            .recycle_bin_access
            .get_or_init(|| self.probe_recycle_bin(raw.as_ref()))
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.is_offline() {
            info!("Cannot validate offline database");
            return errors;
        }

        if !self.can_access_dba_recycle_bin() {
            errors.add_warning(self.dba_recycle_bin_warning());
        }

        errors
    }
}
