pub mod compiler;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod preview;
pub mod safety;

pub use compiler::SnippetBuilder;
pub use config::EngineConfig;
pub use error::RowscriptError;
pub use extract::extract_cell;
pub use model::{
    AnswerValue, CellExtraction, Column, ColumnType, CompiledSnippet, DistinctValues, FilterClause,
    FilterGroup, FilterOperator, LogicalJoin, OutputMode, PreviewResult, ResolvedReferenceClause,
    ResultShape, Row, SelectionPolicy, SortDirection, SortRule,
};
pub use preview::{distinct_values, distinct_values_capped, preview_answers, preview_group};
