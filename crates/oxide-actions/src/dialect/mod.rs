//! Database dialect capabilities.
//!
//! A dialect supplies every vendor fact a generator needs: quoting, literal
//! syntax, feature flags and system object classification. Generators only
//! ever see `&dyn Dialect`, so they branch on capabilities and never on the
//! vendor.

pub mod generic;
pub mod object;
mod oracle;
pub mod system_objects;

pub use object::{DatabaseFunction, DatabaseObject, ObjectKind, SchemaRef};
pub use oracle::OracleDialect;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::settings::DialectSettings;
use crate::validation::ValidationErrors;

/// Vendor capability contract consumed by generators.
pub trait Dialect: Send + Sync {
    /// Returns the short dialect name (e.g. `oracle`).
    fn short_name(&self) -> &'static str;

    /// Returns the product name reported by the database.
    fn product_name(&self) -> &'static str;

    /// Returns the default server port.
    fn default_port(&self) -> Option<u16> {
        None
    }

    /// Returns true if a connection reporting `product_name` belongs to this dialect.
    fn matches_product(&self, product_name: &str) -> bool {
        product_name.eq_ignore_ascii_case(self.product_name())
    }

    /// Returns the dialect settings.
    fn settings(&self) -> &DialectSettings;

    /// Returns true if `name` is a reserved word, ignoring case.
    fn is_reserved_word(&self, name: &str) -> bool;

    /// Returns whether sequences are supported.
    fn supports_sequences(&self) -> bool;

    /// Returns whether schemas are supported.
    fn supports_schemas(&self) -> bool {
        true
    }

    /// Returns whether auto-increment columns are supported.
    fn supports_auto_increment(&self) -> bool {
        true
    }

    /// Returns whether columns can be declared `INITIALLY DEFERRED`.
    fn supports_initially_deferrable_columns(&self) -> bool {
        false
    }

    /// Returns whether tablespaces are supported.
    fn supports_tablespaces(&self) -> bool {
        false
    }

    /// Returns whether `ON DELETE RESTRICT` is supported.
    fn supports_restrict_foreign_keys(&self) -> bool {
        true
    }

    /// Returns the identifier quote character.
    fn quote_char(&self) -> char {
        '"'
    }

    /// Quotes an identifier, doubling embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let q = self.quote_char();
        let escaped = name.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }

    /// Quotes `name` only when it cannot be used bare.
    fn escape_object_name(&self, name: &str) -> String {
        if generic::needs_quoting(name, |word| self.is_reserved_word(word)) {
            self.quote_identifier(name)
        } else {
            name.to_string()
        }
    }

    /// Returns true if the engine stores unquoted identifiers upper-cased.
    fn unquoted_identifiers_uppercased(&self) -> bool {
        false
    }

    /// Normalizes an unquoted identifier the way the engine stores it.
    fn correct_object_name(&self, name: &str) -> String {
        if self.unquoted_identifiers_uppercased() {
            name.to_uppercase()
        } else {
            name.to_string()
        }
    }

    /// Escapes an optionally schema-qualified name.
    fn qualified_name(&self, schema: Option<&str>, name: &str) -> String {
        match schema {
            Some(schema) => format!(
                "{}.{}",
                self.escape_object_name(schema),
                self.escape_object_name(name)
            ),
            None => self.escape_object_name(name),
        }
    }

    /// Derives a primary key constraint name from a table name.
    fn generate_primary_key_name(&self, table_name: &str) -> String {
        format!("PK_{}", table_name.to_uppercase())
    }

    /// Converts an ISO-8601 string into a literal for this dialect.
    fn date_literal(&self, iso: &str) -> String {
        generic::date_literal(iso)
    }

    /// Renders a date value as a literal.
    fn date_value_literal(&self, date: NaiveDate) -> String {
        self.date_literal(&date.format("%Y-%m-%d").to_string())
    }

    /// Renders a time value as a literal. Fractional seconds are dropped.
    fn time_value_literal(&self, time: NaiveTime) -> String {
        self.date_literal(&time.format("%H:%M:%S").to_string())
    }

    /// Renders a date-time value as a literal.
    fn date_time_value_literal(&self, value: NaiveDateTime) -> String {
        self.date_literal(&value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }

    /// Returns the function returning the current date and time.
    fn current_date_time_function(&self) -> &str {
        "CURRENT_TIMESTAMP"
    }

    /// Formats the next value of an already escaped sequence name.
    fn sequence_next_value_sql(&self, sequence: &str) -> String {
        format!("NEXT VALUE FOR {sequence}")
    }

    /// Formats the current value of an already escaped sequence name.
    fn sequence_current_value_sql(&self, sequence: &str) -> String {
        format!("CURRENT VALUE FOR {sequence}")
    }

    /// Renders a function used as a value.
    fn generate_database_function_value(&self, function: &DatabaseFunction) -> String {
        generic::database_function_value(self, function)
    }

    /// Returns how many parameters a data type accepts, e.g. 2 for `NUMBER(p, s)`.
    fn data_type_max_parameters(&self, _data_type: &str) -> u32 {
        2
    }

    /// Returns true for the migration tool's own tracking objects.
    fn is_tracking_object(&self, object: &DatabaseObject) -> bool {
        generic::is_tracking_object(self.settings(), object)
    }

    /// Tables owned by the engine.
    fn system_tables(&self) -> &[&'static str] {
        &[]
    }

    /// Views owned by the engine.
    fn system_views(&self) -> &[&'static str] {
        &[]
    }

    /// Returns true if the object is internal to the engine.
    fn is_system_object(&self, object: &DatabaseObject) -> bool {
        !self.is_tracking_object(object) && generic::is_system_object(self, object)
    }

    /// Returns whether the connection user can read the recycle bin view.
    fn can_access_dba_recycle_bin(&self) -> bool {
        false
    }

    /// Checks that the dialect and its connection are usable.
    fn validate(&self) -> ValidationErrors {
        ValidationErrors::new()
    }
}
