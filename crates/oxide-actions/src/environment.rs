//! Execution environment for one generation pass.

use std::fmt;
use std::sync::Arc;

use crate::dialect::Dialect;

/// Binds a generation request to exactly one dialect.
#[derive(Clone)]
pub struct ExecutionEnvironment {
    dialect: Arc<dyn Dialect>,
}

impl ExecutionEnvironment {
    /// Creates an environment for the given dialect.
    pub fn new(dialect: Arc<dyn Dialect>) -> Self {
        Self { dialect }
    }

    /// Returns the bound dialect.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }
}

impl fmt::Debug for ExecutionEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionEnvironment")
            .field("dialect", &self.dialect.short_name())
            .finish()
    }
}
