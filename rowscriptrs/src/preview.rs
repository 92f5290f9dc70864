//! Local preview interpreter.
//!
//! Mirrors the compiler's filter semantics over the rows already loaded in
//! the UI, so match counts, distinct values and example results are available
//! before a snippet ever reaches the runtime. The match count returned here
//! is the one fed back into shape inference; both come from the same
//! predicate, so "shape says ROW" and "one row in preview" cannot disagree.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde_json::Value;

use crate::config::EngineConfig;
use crate::model::{
    AnswerValue, Column, ColumnType, DistinctValues, FilterClause, FilterGroup, FilterOperator,
    LogicalJoin, PreviewResult, Row, column_type_of,
};
use crate::safety::normalize_bool;

/// Filter rows with a guided answer set. Equivalent by construction to
/// lowering the answers into clauses and calling [`preview_group`].
pub fn preview_answers(
    rows: &[Row],
    answers: &[(String, AnswerValue)],
    columns: &[Column],
) -> PreviewResult {
    let filtered: Vec<Row> = rows
        .iter()
        .filter(|row| row_matches_answers(row, answers, columns))
        .cloned()
        .collect();
    tracing::debug!(total = rows.len(), matched = filtered.len(), "previewed answer set");
    PreviewResult {
        match_count: filtered.len(),
        filtered_rows: filtered,
    }
}

/// Filter rows with a filter group's clause chain plus its quick search.
/// Quick search narrows the preview only; it never reaches the snippet.
pub fn preview_group(rows: &[Row], group: &FilterGroup, columns: &[Column]) -> PreviewResult {
    let needle = group
        .quick_search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let filtered: Vec<Row> = rows
        .iter()
        .filter(|row| {
            row_matches_clauses(row, &group.clauses, columns)
                && needle
                    .as_deref()
                    .map_or(true, |n| row_matches_quick_search(row, n))
        })
        .cloned()
        .collect();
    tracing::debug!(total = rows.len(), matched = filtered.len(), "previewed filter group");
    PreviewResult {
        match_count: filtered.len(),
        filtered_rows: filtered,
    }
}

/// Whole-row answer matching: conjunction over all non-`Any` answers.
pub fn row_matches_answers(
    row: &Row,
    answers: &[(String, AnswerValue)],
    columns: &[Column],
) -> bool {
    answers.iter().all(|(column, answer)| match answer {
        AnswerValue::Any => true,
        AnswerValue::Empty => is_empty_cell(cell(row, column)),
        AnswerValue::Literal(value) => {
            value_equals(cell(row, column), value, column_type_of(columns, column))
        }
    })
}

/// Fold the clause chain left to right through each clause's join. The chain
/// is flat; there is no precedence between AND and OR.
pub fn row_matches_clauses(row: &Row, clauses: &[FilterClause], columns: &[Column]) -> bool {
    let mut iter = clauses.iter();
    let Some(first) = iter.next() else {
        return true;
    };
    let mut acc = clause_matches(row, first, columns);
    for clause in iter {
        let matched = clause_matches(row, clause, columns);
        acc = match clause.logical {
            LogicalJoin::And => acc && matched,
            LogicalJoin::Or => acc || matched,
        };
    }
    acc
}

fn row_matches_quick_search(row: &Row, lowered_needle: &str) -> bool {
    row.data
        .values()
        .any(|v| cell_text(Some(v)).to_lowercase().contains(lowered_needle))
}

fn clause_matches(row: &Row, clause: &FilterClause, columns: &[Column]) -> bool {
    let value = cell(row, &clause.column);
    let column_type = column_type_of(columns, &clause.column);
    match clause.operator {
        FilterOperator::Equals => value_equals(value, &clause.value, column_type),
        FilterOperator::NotEqual => !value_equals(value, &clause.value, column_type),
        FilterOperator::Contains => cell_text(value).contains(&clause.value),
        FilterOperator::NotContains => !cell_text(value).contains(&clause.value),
        FilterOperator::StartsWith => cell_text(value).starts_with(&clause.value),
        FilterOperator::EndsWith => cell_text(value).ends_with(&clause.value),
        // Blank cells never satisfy an ordering comparison
        FilterOperator::GreaterThan => {
            !is_empty_cell(value) && compare(value, &clause.value) == Ordering::Greater
        }
        FilterOperator::LessThan => {
            !is_empty_cell(value) && compare(value, &clause.value) == Ordering::Less
        }
        FilterOperator::GreaterThanOrEqual => {
            !is_empty_cell(value) && compare(value, &clause.value) != Ordering::Less
        }
        FilterOperator::LessThanOrEqual => {
            !is_empty_cell(value) && compare(value, &clause.value) != Ordering::Greater
        }
        FilterOperator::Blank => is_empty_cell(value),
        FilterOperator::NotBlank => !is_empty_cell(value),
    }
}

fn cell<'a>(row: &'a Row, column: &str) -> Option<&'a Value> {
    row.data.get(column)
}

fn is_empty_cell(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Serialize a cell the way the UI shows it: strings verbatim, scalars via
/// display, missing and null as the empty string.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

fn cell_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

fn cell_bool(value: Option<&Value>) -> Option<bool> {
    match value {
        Some(Value::Bool(b)) => Some(*b),
        other => normalize_bool(&cell_text(other)),
    }
}

/// Type-aware equality. Numeric columns compare numerically, boolean columns
/// normalize both sides first; either side failing to normalize drops down
/// to a case-normalized string comparison.
fn value_equals(cell_value: Option<&Value>, answer: &str, column_type: ColumnType) -> bool {
    match column_type {
        ColumnType::Number => {
            if let (Some(a), Ok(b)) = (cell_number(cell_value), answer.trim().parse::<f64>()) {
                return a == b;
            }
        }
        ColumnType::Boolean => {
            if let (Some(a), Some(b)) = (cell_bool(cell_value), normalize_bool(answer)) {
                return a == b;
            }
        }
        ColumnType::Text | ColumnType::Date => {}
    }
    cell_text(cell_value).to_lowercase() == answer.to_lowercase()
}

/// Ordering used by the comparison operators: numeric when both sides parse,
/// case-normalized lexicographic otherwise.
fn compare(cell_value: Option<&Value>, answer: &str) -> Ordering {
    if let (Some(a), Ok(b)) = (cell_number(cell_value), answer.trim().parse::<f64>()) {
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }
    cell_text(cell_value)
        .to_lowercase()
        .cmp(&answer.to_lowercase())
}

/// Collect unique column values for a value picker, capped at the engine's
/// configured `distinct_value_cap`.
pub fn distinct_values(rows: &[Row], column: &str, config: &EngineConfig) -> DistinctValues {
    distinct_values_capped(rows, column, config.distinct_value_cap)
}

/// Collect up to `cap` unique non-empty serialized values for one column, in
/// row order, then sort them numeric-aware and case-insensitively. The cap
/// travels with the result so truncation is never silent.
pub fn distinct_values_capped(rows: &[Row], column: &str, cap: usize) -> DistinctValues {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    let mut truncated = false;
    for row in rows {
        let text = cell_text(cell(row, column));
        if text.is_empty() || !seen.insert(text.clone()) {
            continue;
        }
        if values.len() == cap {
            truncated = true;
            break;
        }
        values.push(text);
    }
    values.sort_by(|a, b| natural_cmp(a, b));
    DistinctValues {
        values,
        truncated,
        cap,
    }
}

/// Numeric-sensitive, case-insensitive comparison: digit runs compare as
/// numbers, everything else compares as lowercased text.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ac = a.chars().peekable();
    let mut bc = b.chars().peekable();
    loop {
        match (ac.peek().copied(), bc.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let mut xs = String::new();
                while let Some(&c) = ac.peek() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    xs.push(c);
                    ac.next();
                }
                let mut ys = String::new();
                while let Some(&c) = bc.peek() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    ys.push(c);
                    bc.next();
                }
                let xn: u128 = xs.parse().unwrap_or(u128::MAX);
                let yn: u128 = ys.parse().unwrap_or(u128::MAX);
                match xn.cmp(&yn) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            (Some(x), Some(y)) => {
                let xl = x.to_lowercase().next().unwrap_or(x);
                let yl = y.to_lowercase().next().unwrap_or(y);
                match xl.cmp(&yl) {
                    Ordering::Equal => {
                        ac.next();
                        bc.next();
                    }
                    other => return other,
                }
            }
        }
    }
}
