//! Grid-native front end.
//!
//! Spreadsheet grids ship a per-column filter model as loosely-typed JSON.
//! It is modeled here as a tagged union per operator family and lowered into
//! the canonical clause list, so the grid path and the answer path share one
//! compiler and cannot drift apart semantically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RowscriptError};
use crate::model::{FilterClause, FilterOperator, LogicalJoin};

/// Filter model for one grid column: either a single condition or exactly
/// two conditions combined with a binary operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridFilter {
    Combined(GridCombined),
    Single(GridCondition),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCombined {
    pub operator: GridJoinOperator,
    pub condition1: GridCondition,
    pub condition2: GridCondition,
}

/// The grid spells combine operators in uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GridJoinOperator {
    And,
    Or,
}

impl From<GridJoinOperator> for LogicalJoin {
    fn from(op: GridJoinOperator) -> Self {
        match op {
            GridJoinOperator::And => LogicalJoin::And,
            GridJoinOperator::Or => LogicalJoin::Or,
        }
    }
}

/// One grid condition, tagged by operator family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "filterType", rename_all = "camelCase")]
pub enum GridCondition {
    Text {
        #[serde(rename = "type")]
        kind: FilterOperator,
        filter: Option<String>,
    },
    Number {
        #[serde(rename = "type")]
        kind: FilterOperator,
        filter: Option<f64>,
    },
}

impl GridCondition {
    fn operator(&self) -> FilterOperator {
        match self {
            GridCondition::Text { kind, .. } | GridCondition::Number { kind, .. } => *kind,
        }
    }

    /// The condition's literal, empty when the operator is a presence check.
    /// Grids keep stale `filter` text around after switching to blank /
    /// notBlank; it must not leak into the clause.
    fn value(&self) -> String {
        if !self.operator().takes_value() {
            return String::new();
        }
        match self {
            GridCondition::Text { filter, .. } => filter.clone().unwrap_or_default(),
            GridCondition::Number { filter, .. } => {
                filter.map(|n| format!("{n}")).unwrap_or_default()
            }
        }
    }

    fn to_clause(&self, column: &str, logical: LogicalJoin) -> FilterClause {
        FilterClause {
            column: column.to_string(),
            operator: self.operator(),
            value: self.value(),
            logical,
        }
    }
}

/// Parse the grid's JSON filter model (an object keyed by column name).
pub fn parse_grid_model(json: &str) -> Result<BTreeMap<String, GridFilter>> {
    serde_json::from_str(json)
        .map_err(|e| RowscriptError::Payload(format!("invalid grid filter model: {e}")))
}

/// Lower the grid model into the canonical clause list. Columns contribute
/// in map order; a combined entry yields two clauses, the second carrying
/// the combine operator as its join.
pub fn grid_to_clauses(model: &BTreeMap<String, GridFilter>) -> Vec<FilterClause> {
    let mut clauses = Vec::new();
    for (column, filter) in model {
        match filter {
            GridFilter::Single(cond) => {
                clauses.push(cond.to_clause(column, LogicalJoin::And));
            }
            GridFilter::Combined(combined) => {
                clauses.push(combined.condition1.to_clause(column, LogicalJoin::And));
                clauses.push(
                    combined
                        .condition2
                        .to_clause(column, combined.operator.into()),
                );
            }
        }
    }
    clauses
}
