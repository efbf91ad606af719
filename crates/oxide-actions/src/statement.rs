//! Vendor-neutral statements.
//!
//! A statement describes one requested database operation. It carries no
//! behaviour beyond inspection; generators turn it into actions.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminator used to select the generators that apply to a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StatementKind(&'static str);

impl StatementKind {
    /// Kind of [`RawSqlStatement`].
    pub const RAW_SQL: Self = Self("raw_sql");
    /// Kind of [`AddPrimaryKeyStatement`].
    pub const ADD_PRIMARY_KEY: Self = Self("add_primary_key");
    /// Kind of [`CreateSequenceStatement`].
    pub const CREATE_SEQUENCE: Self = Self("create_sequence");

    /// Creates a kind for a statement defined outside this crate.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the kind name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// An opaque, immutable description of one requested operation.
pub trait Statement: fmt::Debug + Send + Sync {
    /// Returns the statement kind.
    fn kind(&self) -> StatementKind;

    /// Returns `self` for downcasting to the concrete statement.
    fn as_any(&self) -> &dyn Any;
}

impl<'a> dyn Statement + 'a {
    /// Downcasts to a concrete statement type.
    #[must_use]
    pub fn downcast_ref<T: Statement + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Raw SQL passed through to the database unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSqlStatement {
    /// SQL text.
    pub sql: String,
    /// Delimiter appended when the SQL is described.
    pub end_delimiter: String,
}

impl RawSqlStatement {
    /// Creates a raw SQL statement terminated by `;`.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            end_delimiter: ";".to_string(),
        }
    }

    /// Sets the end delimiter.
    #[must_use]
    pub fn end_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.end_delimiter = delimiter.into();
        self
    }
}

impl Statement for RawSqlStatement {
    fn kind(&self) -> StatementKind {
        StatementKind::RAW_SQL
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Adds a primary key constraint to an existing table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddPrimaryKeyStatement {
    /// Owning schema, if qualified.
    pub schema_name: Option<String>,
    /// Table name.
    pub table_name: String,
    /// Key columns, in key order.
    pub column_names: Vec<String>,
    /// Explicit constraint name. Derived from the table name when absent.
    pub constraint_name: Option<String>,
    /// Tablespace for the backing index.
    pub tablespace: Option<String>,
}

impl AddPrimaryKeyStatement {
    /// Creates a statement for the given table and columns.
    pub fn new<I, S>(table_name: impl Into<String>, column_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table_name: table_name.into(),
            column_names: column_names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Qualifies the table with a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema_name = Some(schema.into());
        self
    }

    /// Sets an explicit constraint name.
    #[must_use]
    pub fn constraint_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }

    /// Places the backing index in a tablespace.
    #[must_use]
    pub fn tablespace(mut self, tablespace: impl Into<String>) -> Self {
        self.tablespace = Some(tablespace.into());
        self
    }
}

impl Statement for AddPrimaryKeyStatement {
    fn kind(&self) -> StatementKind {
        StatementKind::ADD_PRIMARY_KEY
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Creates a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateSequenceStatement {
    /// Owning schema, if qualified.
    pub schema_name: Option<String>,
    /// Sequence name.
    pub sequence_name: String,
    /// First value handed out.
    pub start_value: Option<i64>,
    /// Step between values.
    pub increment_by: Option<i64>,
}

impl CreateSequenceStatement {
    /// Creates a statement for the given sequence.
    pub fn new(sequence_name: impl Into<String>) -> Self {
        Self {
            sequence_name: sequence_name.into(),
            ..Self::default()
        }
    }

    /// Qualifies the sequence with a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema_name = Some(schema.into());
        self
    }

    /// Sets the start value.
    #[must_use]
    pub const fn start_value(mut self, value: i64) -> Self {
        self.start_value = Some(value);
        self
    }

    /// Sets the increment.
    #[must_use]
    pub const fn increment_by(mut self, value: i64) -> Self {
        self.increment_by = Some(value);
        self
    }
}

impl Statement for CreateSequenceStatement {
    fn kind(&self) -> StatementKind {
        StatementKind::CREATE_SEQUENCE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        assert_ne!(StatementKind::RAW_SQL, StatementKind::ADD_PRIMARY_KEY);
        assert_ne!(StatementKind::ADD_PRIMARY_KEY, StatementKind::CREATE_SEQUENCE);
        assert_eq!(StatementKind::new("raw_sql"), StatementKind::RAW_SQL);
        assert_eq!(StatementKind::CREATE_SEQUENCE.to_string(), "create_sequence");
    }

    #[test]
    fn test_downcast() {
        let statement: Box<dyn Statement> =
            Box::new(AddPrimaryKeyStatement::new("orders", ["id"]).schema("SHOP"));
        assert_eq!(statement.kind(), StatementKind::ADD_PRIMARY_KEY);

        let pk = statement
            .downcast_ref::<AddPrimaryKeyStatement>()
            .expect("add primary key statement");
        assert_eq!(pk.schema_name.as_deref(), Some("SHOP"));
        assert_eq!(pk.column_names, vec!["id".to_string()]);
        assert!(statement.downcast_ref::<RawSqlStatement>().is_none());
    }

    #[test]
    fn test_sequence_builder() {
        let seq = CreateSequenceStatement::new("order_seq")
            .start_value(100)
            .increment_by(5);
        assert_eq!(seq.start_value, Some(100));
        assert_eq!(seq.increment_by, Some(5));
        assert_eq!(seq.schema_name, None);
    }
}
