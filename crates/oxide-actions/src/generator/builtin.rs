//! Generators for the statements shipped with the crate.
//!
//! Each one is vendor-neutral: it asks the dialect for capabilities and
//! naming rules instead of checking which database it talks to.

use super::Generator;
use crate::action::{Action, SqlAction};
use crate::environment::ExecutionEnvironment;
use crate::statement::{
    AddPrimaryKeyStatement, CreateSequenceStatement, RawSqlStatement, Statement, StatementKind,
};
use crate::validation::ValidationErrors;

/// Passes raw SQL through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawSqlGenerator;

impl Generator for RawSqlGenerator {
    fn name(&self) -> &'static str {
        "raw_sql"
    }

    fn supports(&self, statement: &dyn Statement, _env: &ExecutionEnvironment) -> bool {
        statement.kind() == StatementKind::RAW_SQL
    }

    fn validate(&self, statement: &dyn Statement, _env: &ExecutionEnvironment) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let Some(raw) = statement.downcast_ref::<RawSqlStatement>() {
            errors.check_required_field("sql", Some(raw.sql.as_str()));
        }
        errors
    }

    fn generate(&self, statement: &dyn Statement, _env: &ExecutionEnvironment) -> Vec<Box<dyn Action>> {
        let Some(raw) = statement.downcast_ref::<RawSqlStatement>() else {
            return Vec::new();
        };
        vec![Box::new(SqlAction::with_delimiter(
            raw.sql.clone(),
            raw.end_delimiter.clone(),
        ))]
    }
}

/// Emits `ALTER TABLE ... ADD CONSTRAINT ... PRIMARY KEY`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddPrimaryKeyGenerator;

impl Generator for AddPrimaryKeyGenerator {
    fn name(&self) -> &'static str {
        "add_primary_key"
    }

    fn supports(&self, statement: &dyn Statement, _env: &ExecutionEnvironment) -> bool {
        statement.kind() == StatementKind::ADD_PRIMARY_KEY
    }

    fn validate(&self, statement: &dyn Statement, env: &ExecutionEnvironment) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let Some(pk) = statement.downcast_ref::<AddPrimaryKeyStatement>() else {
            return errors;
        };
        errors.check_required_field("tableName", Some(pk.table_name.as_str()));
        if pk.column_names.iter().all(|c| c.trim().is_empty()) {
            errors.add_error("columnNames is required");
        }
        if pk.tablespace.is_some() && !env.dialect().supports_tablespaces() {
            errors.add_warning(format!(
                "tablespace is not supported on {}",
                env.dialect().short_name()
            ));
        }
        errors
    }

    fn generate(&self, statement: &dyn Statement, env: &ExecutionEnvironment) -> Vec<Box<dyn Action>> {
        let Some(pk) = statement.downcast_ref::<AddPrimaryKeyStatement>() else {
            return Vec::new();
        };
        let dialect = env.dialect();

        let constraint = pk
            .constraint_name
            .clone()
            .unwrap_or_else(|| dialect.generate_primary_key_name(&pk.table_name));
        let columns = pk
            .column_names
            .iter()
            .map(|c| dialect.escape_object_name(c))
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} PRIMARY KEY ({})",
            dialect.qualified_name(pk.schema_name.as_deref(), &pk.table_name),
            dialect.escape_object_name(&constraint),
            columns
        );
        if let Some(tablespace) = &pk.tablespace {
            if dialect.supports_tablespaces() {
                sql.push_str(&format!(
                    " USING INDEX TABLESPACE {}",
                    dialect.escape_object_name(tablespace)
                ));
            }
        }

        vec![Box::new(SqlAction::new(sql))]
    }
}

/// Emits `CREATE SEQUENCE`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateSequenceGenerator;

impl Generator for CreateSequenceGenerator {
    fn name(&self) -> &'static str {
        "create_sequence"
    }

    fn supports(&self, statement: &dyn Statement, _env: &ExecutionEnvironment) -> bool {
        statement.kind() == StatementKind::CREATE_SEQUENCE
    }

    fn validate(&self, statement: &dyn Statement, env: &ExecutionEnvironment) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let Some(seq) = statement.downcast_ref::<CreateSequenceStatement>() else {
            return errors;
        };
        if !env.dialect().supports_sequences() {
            errors.add_error(format!(
                "sequences are not supported on {}",
                env.dialect().short_name()
            ));
        }
        errors.check_required_field("sequenceName", Some(seq.sequence_name.as_str()));
        errors
    }

    fn generate(&self, statement: &dyn Statement, env: &ExecutionEnvironment) -> Vec<Box<dyn Action>> {
        let Some(seq) = statement.downcast_ref::<CreateSequenceStatement>() else {
            return Vec::new();
        };
        let dialect = env.dialect();

        let mut sql = format!(
            "CREATE SEQUENCE {}",
            dialect.qualified_name(seq.schema_name.as_deref(), &seq.sequence_name)
        );
        if let Some(start) = seq.start_value {
            sql.push_str(&format!(" START WITH {start}"));
        }
        if let Some(increment) = seq.increment_by {
            sql.push_str(&format!(" INCREMENT BY {increment}"));
        }

        vec![Box::new(SqlAction::new(sql))]
    }
}
