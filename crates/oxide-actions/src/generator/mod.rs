//! Action generators and the chain that runs them.
//!
//! A chain is a multi-contributor pipeline: every generator in the pool
//! contributes its actions, and priority only decides where each
//! contribution lands in the concatenated result.

mod builtin;
mod registry;

pub use builtin::{AddPrimaryKeyGenerator, CreateSequenceGenerator, RawSqlGenerator};
pub use registry::GeneratorRegistry;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::action::Action;
use crate::environment::ExecutionEnvironment;
use crate::statement::Statement;
use crate::validation::ValidationErrors;

/// Priority of generic, vendor-neutral generators.
pub const PRIORITY_DEFAULT: i32 = 1;

/// Priority of generators specific to one dialect.
pub const PRIORITY_DATABASE: i32 = 5;

/// Turns statements into actions.
pub trait Generator: Send + Sync {
    /// Returns a name for logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the priority. Higher runs first. Read once at registration.
    fn priority(&self) -> i32 {
        PRIORITY_DEFAULT
    }

    /// Returns true if the generator applies to the statement and dialect.
    fn supports(&self, statement: &dyn Statement, env: &ExecutionEnvironment) -> bool;

    /// Checks the statement against the dialect.
    fn validate(&self, _statement: &dyn Statement, _env: &ExecutionEnvironment) -> ValidationErrors {
        ValidationErrors::new()
    }

    /// Produces actions for the statement, in execution order.
    fn generate(&self, statement: &dyn Statement, env: &ExecutionEnvironment) -> Vec<Box<dyn Action>>;
}

/// A generator with its priority and registration sequence fixed.
#[derive(Clone)]
pub struct RankedGenerator {
    priority: i32,
    sequence: u64,
    generator: Arc<dyn Generator>,
}

impl RankedGenerator {
    /// Captures the generator's priority.
    pub fn new(sequence: u64, generator: Arc<dyn Generator>) -> Self {
        Self {
            priority: generator.priority(),
            sequence,
            generator,
        }
    }

    /// Returns the captured priority.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the registration sequence.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the generator.
    #[must_use]
    pub fn generator(&self) -> &Arc<dyn Generator> {
        &self.generator
    }
}

impl fmt::Debug for RankedGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankedGenerator")
            .field("name", &self.generator.name())
            .field("priority", &self.priority)
            .field("sequence", &self.sequence)
            .finish()
    }
}

/// Chain order: higher priority first, then earlier registration first.
///
/// Two entries with distinct sequences never compare equal.
#[must_use]
pub fn chain_order(a: &RankedGenerator, b: &RankedGenerator) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.sequence.cmp(&b.sequence))
}

/// An ordered pool of generators resolved for one statement and dialect.
///
/// The pool is either absent (no chain was assembled) or present, possibly
/// empty. The two are observably different in [`GeneratorChain::generate_actions`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorChain {
    generators: Option<Vec<RankedGenerator>>,
}

impl GeneratorChain {
    /// Creates a chain with no pool.
    #[must_use]
    pub const fn absent() -> Self {
        Self { generators: None }
    }

    /// Creates a chain from generators. Equal priorities keep the given order.
    pub fn new<I>(generators: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Generator>>,
    {
        Self::from_ranked(
            generators
                .into_iter()
                .zip(0u64..)
                .map(|(generator, sequence)| RankedGenerator::new(sequence, generator))
                .collect(),
        )
    }

    /// Creates a chain from already ranked generators.
    #[must_use]
    pub fn from_ranked(mut generators: Vec<RankedGenerator>) -> Self {
        generators.sort_by(chain_order);
        Self {
            generators: Some(generators),
        }
    }

    /// Returns true if no pool was assembled.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.generators.is_none()
    }

    /// Returns the number of generators in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if the pool is absent or has no generators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the generators in chain order.
    pub fn generators(&self) -> impl Iterator<Item = &RankedGenerator> {
        self.generators.iter().flatten()
    }

    /// Runs every generator and concatenates their actions in chain order.
    ///
    /// Returns `None` when the pool is absent. Validation is not consulted;
    /// callers that want to stop on errors must call [`Self::validate`] first.
    #[must_use]
    pub fn generate_actions(
        &self,
        statement: &dyn Statement,
        env: &ExecutionEnvironment,
    ) -> Option<Vec<Box<dyn Action>>> {
        let generators = self.generators.as_ref()?;
        let mut actions = Vec::new();
        for ranked in generators {
            let produced = ranked.generator.generate(statement, env);
            debug!(
                generator = ranked.generator.name(),
                priority = ranked.priority,
                statement = %statement.kind(),
                actions = produced.len(),
                "Generated actions"
            );
            actions.extend(produced);
        }
        Some(actions)
    }

    /// Merges the validation results of every generator in chain order.
    #[must_use]
    pub fn validate(&self, statement: &dyn Statement, env: &ExecutionEnvironment) -> ValidationErrors {
        let mut result = ValidationErrors::new();
        for ranked in self.generators() {
            result.extend(ranked.generator.validate(statement, env));
        }
        result
    }
}
