//! Dialect-aware action generation for database change management.
//!
//! `oxide-actions` turns vendor-neutral statements ("add a primary key",
//! "create a sequence") into the concrete SQL actions a particular database
//! needs, where:
//! - Every generator that supports a statement contributes actions
//! - Priority decides where each contribution lands, never whether it runs
//! - Dialects expose capabilities so generators never branch on the vendor
//!
//! # Architecture
//!
//! - **Statements** - Requested operations such as `AddPrimaryKeyStatement`
//! - **Generators** - Turn statements into actions for one dialect
//! - **Chain** - The ordered pool of generators for one statement
//! - **Dialect** - Vendor capabilities, quoting and system object rules
//! - **Connection** - The blocking handle a dialect probes the server through
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use oxide_actions::prelude::*;
//!
//! let dialect = OracleDialect::new();
//! dialect
//!     .set_connection(OfflineConnection::new("offline:oracle").user("APP").into())
//!     .unwrap();
//! let env = ExecutionEnvironment::new(Arc::new(dialect));
//!
//! let registry = GeneratorRegistry::with_builtin_generators();
//! let statement = AddPrimaryKeyStatement::new("orders", ["id"]);
//! assert!(!registry.validate(&statement, &env).has_errors());
//!
//! let sql: Vec<String> = registry
//!     .generate_actions(&statement, &env)
//!     .iter()
//!     .map(|action| action.describe())
//!     .collect();
//! assert_eq!(sql, ["ALTER TABLE orders ADD CONSTRAINT PK_ORDERS PRIMARY KEY (id);"]);
//! ```

pub mod action;
pub mod connection;
pub mod dialect;
pub mod environment;
pub mod error;
pub mod generator;
pub mod settings;
pub mod statement;
pub mod validation;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::action::{Action, SqlAction};
    pub use crate::connection::{
        ConnectionAdapter, DatabaseConnection, DirectConnection, OfflineConnection, RawConnection,
    };
    pub use crate::dialect::{
        DatabaseFunction, DatabaseObject, Dialect, ObjectKind, OracleDialect, SchemaRef,
    };
    pub use crate::environment::ExecutionEnvironment;
    pub use crate::error::{ConnectionError, DialectError, Result};
    pub use crate::generator::{
        Generator, GeneratorChain, GeneratorRegistry, PRIORITY_DATABASE, PRIORITY_DEFAULT,
    };
    pub use crate::settings::DialectSettings;
    pub use crate::statement::{
        AddPrimaryKeyStatement, CreateSequenceStatement, RawSqlStatement, Statement,
        StatementKind,
    };
    pub use crate::validation::ValidationErrors;
}
