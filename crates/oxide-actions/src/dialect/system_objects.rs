//! Name-based system object rules.
//!
//! Vendors create internal artifacts next to user objects (recycle-bin
//! copies, queue tables, materialized view logs). They are recognised by
//! name through an ordered rule table; the first matching rule decides.

use super::object::ObjectKind;

/// How a name is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePattern {
    /// Name starts with the prefix.
    Prefix(&'static str),
    /// Name equals the value exactly.
    Exact(&'static str),
    /// Name starts with one of the prefixes and ends with the suffix.
    PrefixSuffix {
        /// Accepted prefixes.
        prefixes: &'static [&'static str],
        /// Required suffix.
        suffix: &'static str,
    },
}

impl NamePattern {
    /// Returns true if the name matches.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Prefix(prefix) => name.starts_with(prefix),
            Self::Exact(value) => name == *value,
            Self::PrefixSuffix { prefixes, suffix } => {
                prefixes.iter().any(|p| name.starts_with(p)) && name.ends_with(suffix)
            }
        }
    }
}

/// Outcome of a matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The object is a system object.
    System,
    /// The object was renamed into the recycle bin; see [`recycled_object_is_system`].
    RecycleBin,
}

/// One entry of a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRule {
    /// Pattern to match.
    pub pattern: NamePattern,
    /// Verdict when the pattern matches.
    pub verdict: Verdict,
    /// What the rule recognises, for logs.
    pub reason: &'static str,
}

impl NameRule {
    const fn system(pattern: NamePattern, reason: &'static str) -> Self {
        Self {
            pattern,
            verdict: Verdict::System,
            reason,
        }
    }
}

/// Oracle's internal object rules, in evaluation order.
pub const ORACLE_NAME_RULES: &[NameRule] = &[
    NameRule {
        pattern: NamePattern::Prefix("BIN$"),
        verdict: Verdict::RecycleBin,
        reason: "dropped object in the recycle bin",
    },
    NameRule::system(NamePattern::Prefix("AQ$"), "advanced queuing table"),
    NameRule::system(NamePattern::Prefix("DR$"), "text index table"),
    NameRule::system(NamePattern::Prefix("SYS_IOT_OVER"), "index-organized overflow table"),
    NameRule::system(
        NamePattern::PrefixSuffix {
            prefixes: &["MDRT_", "MDRS_"],
            suffix: "$",
        },
        "spatial index table",
    ),
    NameRule::system(NamePattern::Prefix("MLOG$_"), "materialized view log"),
    NameRule::system(NamePattern::Prefix("RUPD$_"), "materialized view log update table"),
    NameRule::system(NamePattern::Prefix("WM$_"), "workspace manager backup table"),
    NameRule::system(NamePattern::Exact("CREATE$JAVA$LOB$TABLE"), "java object table"),
    NameRule::system(NamePattern::Exact("JAVA$CLASS$MD5$TABLE"), "java class hash table"),
    NameRule::system(NamePattern::Prefix("ISEQ$$_"), "identity column sequence"),
];

/// Oracle schemas and catalogs that belong to the engine.
pub const ORACLE_SYSTEM_SCHEMAS: &[&str] = &["SYSTEM", "SYS", "CTXSYS", "XDB"];

/// Returns the first rule matching `name`.
#[must_use]
pub fn first_match<'a>(rules: &'a [NameRule], name: &str) -> Option<&'a NameRule> {
    rules.iter().find(|rule| rule.pattern.matches(name))
}

/// Decides whether a recycle-bin object is a system object.
///
/// Metadata queries already exclude recycled tables when the recycle bin is
/// readable or the schema is the connection user's own. Primary keys,
/// indexes and unique constraints keep their `BIN$` name after a table is
/// restored, so in that case they are user objects.
#[must_use]
pub fn recycled_object_is_system(kind: ObjectKind, filtered_by_metadata_query: bool) -> bool {
    if !filtered_by_metadata_query {
        return true;
    }
    !matches!(
        kind,
        ObjectKind::PrimaryKey | ObjectKind::Index | ObjectKind::UniqueConstraint
    )
}
