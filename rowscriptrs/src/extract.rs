//! Single-cell extraction.
//!
//! Clicking one cell produces a statement that re-selects the originating
//! row and binds the cell's column to a named value. Selection prefers a
//! stable key column over the clicked column itself, so the statement keeps
//! working after the clicked value is edited.

use serde_json::Value;

use crate::config::EngineConfig;
use crate::model::{CellExtraction, Column, ColumnType, Row, column_type_of};
use crate::safety::{format_table_name, is_identifier, to_literal, to_variable_name, type_keyword};

/// Synthesize an extraction statement for one cell of `row`.
pub fn extract_cell(
    table: &str,
    columns: &[Column],
    row: &Row,
    target_column: &str,
    config: &EngineConfig,
) -> CellExtraction {
    let table_name = format_table_name(table, &config.fallback_table_name);
    let var = &config.row_var_single;
    let target_value = cell_text(row, target_column);

    let key = pick_key_column(columns, row);
    let filter_column = match &key {
        Some(key_column) => key_column.name.as_str(),
        // No usable key: fall back to the clicked column's own value
        None if is_identifier(target_column) => target_column,
        None => "",
    };

    let mut query = format!("[ROW {var} FROM {table_name}");
    let mut summary = format!("Selects a row of {table_name}");
    if !filter_column.is_empty() {
        let filter_type = column_type_of(columns, filter_column);
        let literal = to_literal(&cell_text(row, filter_column), filter_type);
        query.push_str(&format!(" WHERE {filter_column} = {literal}"));
        summary = format!("Selects the {table_name} row where {filter_column} = {literal}");
    }
    query.push(']');

    if is_identifier(target_column) {
        let keyword = type_keyword(column_type_of(columns, target_column));
        let binding = to_variable_name(target_column, &config.fallback_binding_name);
        query.push_str(&format!("\n{keyword} {binding} = {var}.{target_column}"));
        summary.push_str(&format!(" and reads {target_column}"));
    }

    tracing::debug!(
        table = %table_name,
        target = %target_column,
        key = filter_column,
        "synthesized cell extraction"
    );

    CellExtraction {
        query,
        summary,
        prefill_answer_value: target_value,
    }
}

/// Score every column holding a non-empty value in this row and pick the
/// best key. Exact `id`/`_id` beats `*id` suffixes, which beat names
/// containing `key`; number and text types get a small edge. Ties keep the
/// earliest declared column.
fn pick_key_column<'a>(columns: &'a [Column], row: &Row) -> Option<&'a Column> {
    let mut best: Option<(&Column, u32)> = None;
    for column in columns {
        if !is_identifier(&column.name) || cell_text(row, &column.name).is_empty() {
            continue;
        }
        let lower = column.name.to_lowercase();
        let mut score = if lower == "id" || lower == "_id" {
            100
        } else if lower.ends_with("id") {
            60
        } else if lower.contains("key") {
            40
        } else {
            0
        };
        if score == 0 {
            continue;
        }
        if matches!(column.column_type, ColumnType::Number | ColumnType::Text) {
            score += 5;
        }
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((column, score));
        }
    }
    best.map(|(column, _)| column)
}

fn cell_text(row: &Row, column: &str) -> String {
    match row.data.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}
