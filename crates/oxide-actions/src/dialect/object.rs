//! Database objects and function values seen by dialects.

use serde::{Deserialize, Serialize};

/// The kind of a database object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// A catalog.
    Catalog,
    /// A schema.
    Schema,
    /// A table.
    Table,
    /// A view.
    View,
    /// A column of a table or view.
    Column,
    /// An index.
    Index,
    /// A primary key constraint.
    PrimaryKey,
    /// A unique constraint.
    UniqueConstraint,
    /// A foreign key constraint.
    ForeignKey,
    /// A sequence.
    Sequence,
}

/// Reference to the schema an object lives in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaRef {
    /// Catalog name.
    pub catalog: Option<String>,
    /// Schema name.
    pub name: Option<String>,
}

impl SchemaRef {
    /// Creates a reference to a named schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            catalog: None,
            name: Some(name.into()),
        }
    }

    /// Sets the catalog.
    #[must_use]
    pub fn catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }
}

/// A database object as reported by snapshot or metadata queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseObject {
    /// Object kind.
    pub kind: ObjectKind,
    /// Object name.
    pub name: Option<String>,
    /// Owning schema.
    pub schema: Option<SchemaRef>,
    /// Table the object belongs to (columns, indexes, constraints).
    pub relation: Option<String>,
}

impl DatabaseObject {
    /// Creates an object of the given kind.
    pub fn new(kind: ObjectKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            schema: None,
            relation: None,
        }
    }

    /// Creates a table.
    pub fn table(name: impl Into<String>) -> Self {
        Self::new(ObjectKind::Table, name)
    }

    /// Creates a schema, optionally inside a catalog.
    pub fn schema(catalog: Option<&str>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: ObjectKind::Schema,
            name: Some(name.clone()),
            schema: Some(SchemaRef {
                catalog: catalog.map(str::to_string),
                name: Some(name),
            }),
            relation: None,
        }
    }

    /// Creates a catalog.
    pub fn catalog(name: impl Into<String>) -> Self {
        Self::new(ObjectKind::Catalog, name)
    }

    /// Places the object in a schema.
    #[must_use]
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(SchemaRef::new(schema));
        self
    }

    /// Places the object in a schema reference.
    #[must_use]
    pub fn in_schema_ref(mut self, schema: SchemaRef) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Attaches the object to a table.
    #[must_use]
    pub fn on_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    /// Returns the owning schema name.
    #[must_use]
    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_ref().and_then(|s| s.name.as_deref())
    }

    /// Returns the owning catalog name.
    #[must_use]
    pub fn catalog_name(&self) -> Option<&str> {
        self.schema.as_ref().and_then(|s| s.catalog.as_deref())
    }

    /// Returns the owning schema as an object of its own.
    #[must_use]
    pub fn schema_object(&self) -> Option<Self> {
        let schema = self.schema.as_ref()?;
        Some(Self {
            kind: ObjectKind::Schema,
            name: schema.name.clone(),
            schema: Some(schema.clone()),
            relation: None,
        })
    }
}

/// A function call used as a value, e.g. a column default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseFunction {
    /// A function expression such as `current_timestamp` or `sysdate`.
    Expression(String),
    /// Next value of a sequence, optionally schema-qualified (`schema.seq`).
    SequenceNextValue(String),
    /// Current value of a sequence, optionally schema-qualified.
    SequenceCurrentValue(String),
}
