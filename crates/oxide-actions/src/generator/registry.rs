//! Registry of available generators.

use std::sync::Arc;

use tracing::debug;

use super::builtin::{AddPrimaryKeyGenerator, CreateSequenceGenerator, RawSqlGenerator};
use super::{Generator, GeneratorChain, RankedGenerator};
use crate::action::Action;
use crate::environment::ExecutionEnvironment;
use crate::statement::Statement;
use crate::validation::ValidationErrors;

/// Holds every registered generator and assembles chains from them.
///
/// Registration order is recorded and breaks ties between generators of
/// equal priority.
#[derive(Debug, Default, Clone)]
pub struct GeneratorRegistry {
    entries: Vec<RankedGenerator>,
    next_sequence: u64,
}

impl GeneratorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the generators shipped with the crate.
    #[must_use]
    pub fn with_builtin_generators() -> Self {
        let mut registry = Self::new();
        registry.register(RawSqlGenerator);
        registry.register(AddPrimaryKeyGenerator);
        registry.register(CreateSequenceGenerator);
        registry
    }

    /// Registers a generator.
    pub fn register(&mut self, generator: impl Generator + 'static) -> &mut Self {
        self.register_arc(Arc::new(generator))
    }

    /// Registers a shared generator.
    pub fn register_arc(&mut self, generator: Arc<dyn Generator>) -> &mut Self {
        let ranked = RankedGenerator::new(self.next_sequence, generator);
        debug!(
            generator = ranked.generator().name(),
            priority = ranked.priority(),
            sequence = ranked.sequence(),
            "Registered generator"
        );
        self.next_sequence += 1;
        self.entries.push(ranked);
        self
    }

    /// Returns the number of registered generators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assembles the chain of generators supporting the statement.
    ///
    /// The chain is always present; it is empty when nothing applies.
    #[must_use]
    pub fn chain_for(&self, statement: &dyn Statement, env: &ExecutionEnvironment) -> GeneratorChain {
        let matching: Vec<RankedGenerator> = self
            .entries
            .iter()
            .filter(|ranked| ranked.generator().supports(statement, env))
            .cloned()
            .collect();
        debug!(
            statement = %statement.kind(),
            dialect = env.dialect().short_name(),
            generators = matching.len(),
            "Assembled generator chain"
        );
        GeneratorChain::from_ranked(matching)
    }

    /// Returns true if any generator supports the statement.
    #[must_use]
    pub fn has_generator(&self, statement: &dyn Statement, env: &ExecutionEnvironment) -> bool {
        self.entries
            .iter()
            .any(|ranked| ranked.generator().supports(statement, env))
    }

    /// Generates the actions for a statement.
    #[must_use]
    pub fn generate_actions(
        &self,
        statement: &dyn Statement,
        env: &ExecutionEnvironment,
    ) -> Vec<Box<dyn Action>> {
        self.chain_for(statement, env)
            .generate_actions(statement, env)
            .unwrap_or_default()
    }

    /// Validates a statement against every supporting generator.
    #[must_use]
    pub fn validate(&self, statement: &dyn Statement, env: &ExecutionEnvironment) -> ValidationErrors {
        self.chain_for(statement, env).validate(statement, env)
    }
}
