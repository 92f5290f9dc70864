use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared type of a table column. Supplied by the table-metadata
/// provider and treated as authoritative; the engine never infers types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Number,
    Boolean,
    Date,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

/// Look up a column's declared type, defaulting to text for unknown names.
pub fn column_type_of(columns: &[Column], name: &str) -> ColumnType {
    columns
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.column_type)
        .unwrap_or(ColumnType::Text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    NotEqual,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Blank,
    NotBlank,
}

impl FilterOperator {
    /// Presence checks never take a literal.
    pub fn takes_value(&self) -> bool {
        !matches!(self, FilterOperator::Blank | FilterOperator::NotBlank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalJoin {
    #[default]
    And,
    Or,
}

/// One column/operator/value condition. `logical` joins the clause to the
/// previous one in the chain and is ignored on the first clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterClause {
    pub column: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub logical: LogicalJoin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortRule {
    pub column: String,
    pub direction: SortDirection,
}

/// Which record(s) satisfy a single-record request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    #[default]
    All,
    First,
    Last,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    #[default]
    Record,
    Field,
}

/// Output of the external reference-clause resolver. The engine treats the
/// expression as opaque pre-resolved text and only merges the warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedReferenceClause {
    pub expression: String,
    #[serde(default)]
    pub logical: LogicalJoin,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// The top-level filter request assembled by the UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterGroup {
    #[serde(default)]
    pub clauses: Vec<FilterClause>,
    #[serde(default)]
    pub sort: Vec<SortRule>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Free-text search applied in the preview only; never embedded in the
    /// generated snippet.
    pub quick_search: Option<String>,
    #[serde(default)]
    pub selection_policy: SelectionPolicy,
    #[serde(default)]
    pub output_mode: OutputMode,
    pub output_field: Option<String>,
    #[serde(default)]
    pub resolved_reference_clauses: Vec<ResolvedReferenceClause>,
    /// When set, compilation short-circuits to a placeholder snippet.
    pub blocked_reason: Option<String>,
}

/// A guided Q&A answer for one column. An answer set filters identically to
/// the flat AND-chain of clauses it lowers into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    Any,
    Empty,
    Literal(String),
}

impl AnswerValue {
    /// Parse the sentinel spellings used by the answer form.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "ANY" => AnswerValue::Any,
            "EMPTY" => AnswerValue::Empty,
            other => AnswerValue::Literal(other.to_string()),
        }
    }
}

/// Whether a statement yields exactly one record or a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultShape {
    Row,
    Rows,
}

/// Result of one compilation pass. Recomputed from scratch on every input
/// change; the engine caches nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledSnippet {
    pub snippet: String,
    pub shape: ResultShape,
    pub warnings: Vec<String>,
}

/// One row of the in-memory snapshot supplied by the row-data provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(default)]
    pub data: BTreeMap<String, Value>,
}

/// Filtered preview over the loaded rows.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewResult {
    pub filtered_rows: Vec<Row>,
    pub match_count: usize,
}

/// Distinct values for one column, capped so pickers stay bounded. The cap
/// travels with the result so truncation is never silent.
#[derive(Debug, Clone, Serialize)]
pub struct DistinctValues {
    pub values: Vec<String>,
    pub truncated: bool,
    pub cap: usize,
}

/// Output of single-cell extraction.
#[derive(Debug, Clone, Serialize)]
pub struct CellExtraction {
    pub query: String,
    pub summary: String,
    pub prefill_answer_value: String,
}
