use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::model::{AnswerValue, Column, CompiledSnippet, FilterGroup};

mod answers;
mod assemble;
mod clauses;
mod grid;
mod reference;

pub use answers::{AnswerSet, answers_to_clauses};
pub use grid::{GridCombined, GridCondition, GridFilter, GridJoinOperator, grid_to_clauses,
               parse_grid_model};
pub use reference::{ReferenceClause, ReferenceClauseResolver, resolve_all};

/// Compiles filter state into RowScript snippets. Pure and synchronous: each
/// call recomputes the result from its inputs and mutates nothing.
pub struct SnippetBuilder {
    config: EngineConfig,
}

impl Default for SnippetBuilder {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SnippetBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compile a filter group against the active table. `match_count` is the
    /// preview's count for the identical filter, or `None` when the preview
    /// has not run yet.
    pub fn compile(
        &self,
        table: &str,
        columns: &[Column],
        group: &FilterGroup,
        match_count: Option<usize>,
    ) -> CompiledSnippet {
        assemble::assemble(table, columns, group, match_count, &self.config)
    }

    /// Compile a guided answer set. Answers lower into a flat AND-chain and
    /// then go through the same compiler as every other front end.
    pub fn compile_answers(
        &self,
        table: &str,
        columns: &[Column],
        answers: &[(String, AnswerValue)],
        match_count: Option<usize>,
    ) -> CompiledSnippet {
        let group = FilterGroup {
            clauses: answers_to_clauses(answers),
            ..FilterGroup::default()
        };
        self.compile(table, columns, &group, match_count)
    }

    /// Compile a grid-native filter model.
    pub fn compile_grid(
        &self,
        table: &str,
        columns: &[Column],
        model: &BTreeMap<String, GridFilter>,
        match_count: Option<usize>,
    ) -> CompiledSnippet {
        let group = FilterGroup {
            clauses: grid_to_clauses(model),
            ..FilterGroup::default()
        };
        self.compile(table, columns, &group, match_count)
    }

    /// Compile a grid filter model straight from the UI's JSON payload.
    pub fn compile_grid_json(
        &self,
        table: &str,
        columns: &[Column],
        json: &str,
        match_count: Option<usize>,
    ) -> Result<CompiledSnippet> {
        let model = parse_grid_model(json)?;
        Ok(self.compile_grid(table, columns, &model, match_count))
    }
}
