//! Vendor-neutral behaviour shared by every dialect.
//!
//! The [`Dialect`] trait's default methods call into these functions, and
//! vendor implementations call them again when they only refine the generic
//! result.

use std::sync::LazyLock;

use regex::Regex;

use super::object::{DatabaseFunction, DatabaseObject, ObjectKind};
use super::Dialect;
use crate::settings::DialectSettings;

static DATE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid date regex"));

static TIME_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}$").expect("Invalid time regex"));

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}[T ][0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]+$").expect("Invalid timestamp regex")
});

static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}[T ][0-9]{2}:[0-9]{2}:[0-9]{2}$").expect("Invalid date-time regex")
});

/// Marker prefix returned for strings that are not ISO-8601 dates.
pub const BAD_DATE_FORMAT: &str = "BAD_DATE_FORMAT:";

/// The recognised ISO-8601 shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShape {
    /// `YYYY-MM-DD`
    DateOnly,
    /// `hh:mm:ss`
    TimeOnly,
    /// `YYYY-MM-DDThh:mm:ss.fff`
    Timestamp,
    /// `YYYY-MM-DDThh:mm:ss`
    DateTime,
}

impl DateShape {
    /// Classifies an ISO-8601 string. Returns `None` for anything else.
    #[must_use]
    pub fn classify(iso: &str) -> Option<Self> {
        if DATE_ONLY.is_match(iso) {
            Some(Self::DateOnly)
        } else if TIME_ONLY.is_match(iso) {
            Some(Self::TimeOnly)
        } else if TIMESTAMP.is_match(iso) {
            Some(Self::Timestamp)
        } else if DATE_TIME.is_match(iso) {
            Some(Self::DateTime)
        } else {
            None
        }
    }
}

/// Generic string literal for an ISO-8601 value.
///
/// Date and time values are quoted as-is; date-times use a space instead of
/// `T`. Unrecognised input yields `BAD_DATE_FORMAT:<input>`.
#[must_use]
pub fn date_literal(iso: &str) -> String {
    match DateShape::classify(iso) {
        Some(DateShape::DateOnly | DateShape::TimeOnly) => format!("'{iso}'"),
        Some(DateShape::Timestamp | DateShape::DateTime) => {
            format!("'{}'", iso.replacen('T', " ", 1))
        }
        None => format!("{BAD_DATE_FORMAT}{iso}"),
    }
}

/// Returns true if an identifier must be quoted to be used verbatim.
pub fn needs_quoting(name: &str, is_reserved: impl Fn(&str) -> bool) -> bool {
    name.starts_with(|c: char| c.is_ascii_digit())
        || name.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
        || is_reserved(name)
}

/// Returns true for function expressions meaning "now".
pub fn is_current_time_function(value: &str, current_date_time_function: &str) -> bool {
    let lower = value.to_lowercase();
    lower.starts_with("current_timestamp")
        || lower.starts_with("current_datetime")
        || value.eq_ignore_ascii_case(current_date_time_function)
}

/// Generic rendering of a function value.
pub fn database_function_value<D: Dialect + ?Sized>(
    dialect: &D,
    function: &DatabaseFunction,
) -> String {
    match function {
        DatabaseFunction::Expression(value) => {
            if is_current_time_function(value, dialect.current_date_time_function()) {
                dialect.current_date_time_function().to_string()
            } else {
                value.clone()
            }
        }
        DatabaseFunction::SequenceNextValue(sequence) => {
            dialect.sequence_next_value_sql(&dialect.escape_object_name(sequence))
        }
        DatabaseFunction::SequenceCurrentValue(sequence) => {
            dialect.sequence_current_value_sql(&dialect.escape_object_name(sequence))
        }
    }
}

/// Returns true if the object is one of the migration tool's own tracking
/// tables, or belongs to one.
#[must_use]
pub fn is_tracking_object(settings: &DialectSettings, object: &DatabaseObject) -> bool {
    let is_tracking_table = |name: &str| {
        name.eq_ignore_ascii_case(&settings.changelog_table)
            || name.eq_ignore_ascii_case(&settings.changelog_lock_table)
    };
    match object.kind {
        ObjectKind::Table => object.name.as_deref().is_some_and(is_tracking_table),
        ObjectKind::Column | ObjectKind::Index | ObjectKind::PrimaryKey => {
            object.relation.as_deref().is_some_and(is_tracking_table)
        }
        _ => false,
    }
}

/// Generic system object check.
pub fn is_system_object<D: Dialect + ?Sized>(dialect: &D, object: &DatabaseObject) -> bool {
    if object
        .schema_name()
        .is_some_and(|schema| schema.eq_ignore_ascii_case("information_schema"))
    {
        return true;
    }
    let Some(name) = object.name.as_deref() else {
        return false;
    };
    match object.kind {
        ObjectKind::Table => dialect.system_tables().contains(&name),
        ObjectKind::View => dialect.system_views().contains(&name),
        _ => false,
    }
}
