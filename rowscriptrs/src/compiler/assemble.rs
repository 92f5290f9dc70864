//! Shape inference and statement assembly.
//!
//! Combines the compiled WHERE expression with ORDER BY, LIMIT/OFFSET and
//! the selection policy into a complete RowScript statement, deciding
//! whether it requests one record or a set.

use crate::config::EngineConfig;
use crate::model::{
    Column, CompiledSnippet, FilterGroup, OutputMode, ResultShape, SelectionPolicy, SortDirection,
    SortRule, column_type_of,
};
use crate::safety::{format_table_name, is_identifier, to_variable_name, type_keyword};

use super::clauses::{compile_clauses, join_fragments};

pub(crate) fn assemble(
    table: &str,
    columns: &[Column],
    group: &FilterGroup,
    match_count: Option<usize>,
    config: &EngineConfig,
) -> CompiledSnippet {
    if let Some(reason) = &group.blocked_reason {
        return CompiledSnippet {
            snippet: format!("// blocked: {reason}"),
            shape: ResultShape::Rows,
            warnings: vec![format!("compilation blocked: {reason}")],
        };
    }

    tracing::debug!(
        table = %table,
        clauses = group.clauses.len(),
        references = group.resolved_reference_clauses.len(),
        policy = ?group.selection_policy,
        "assembling snippet"
    );

    let mut warnings = Vec::new();
    let mut fragments = compile_clauses(&group.clauses, columns, &mut warnings);

    // Pre-resolved reference fragments join the chain after local clauses;
    // the boundary between the two is an ordinary join point.
    for reference in &group.resolved_reference_clauses {
        warnings.extend(reference.warnings.iter().cloned());
        if !reference.expression.trim().is_empty() {
            fragments.push((reference.logical, reference.expression.clone()));
        }
    }
    let where_expr = join_fragments(&fragments);

    let shape = infer_shape(group.selection_policy, match_count, &mut warnings);
    let sorts = surviving_sorts(&group.sort, &mut warnings);
    let table_name = format_table_name(table, &config.fallback_table_name);

    let snippet = match shape {
        ResultShape::Row => {
            row_statement(&table_name, group, &where_expr, &sorts, columns, config, &mut warnings)
        }
        ResultShape::Rows => {
            rows_statement(&table_name, group, &where_expr, &sorts, config, &mut warnings)
        }
    };

    CompiledSnippet {
        snippet,
        shape,
        warnings,
    }
}

/// A non-`all` policy always pins a single record. Under `all`, only a known
/// match count of exactly 1 does.
fn infer_shape(
    policy: SelectionPolicy,
    match_count: Option<usize>,
    warnings: &mut Vec<String>,
) -> ResultShape {
    if policy != SelectionPolicy::All {
        return ResultShape::Row;
    }
    match match_count {
        Some(1) => ResultShape::Row,
        Some(_) => ResultShape::Rows,
        None => {
            warnings.push(
                "match count unknown; apply filters so exactly one row matches to get a \
                 single-record statement"
                    .to_string(),
            );
            ResultShape::Rows
        }
    }
}

fn surviving_sorts(sorts: &[SortRule], warnings: &mut Vec<String>) -> Vec<SortRule> {
    sorts
        .iter()
        .filter(|rule| {
            if is_identifier(&rule.column) {
                true
            } else {
                warnings.push(format!(
                    "sort on \"{}\" skipped: column name is not a safe identifier",
                    rule.column
                ));
                false
            }
        })
        .cloned()
        .collect()
}

/// Render an ORDER BY fragment. With `flip` set every direction reverses, so
/// a trailing-N request reads as "largest N under reversed order".
pub(crate) fn render_order_by(sorts: &[SortRule], flip: bool) -> String {
    let rendered: Vec<String> = sorts
        .iter()
        .map(|rule| {
            let direction = match (rule.direction, flip) {
                (SortDirection::Asc, false) | (SortDirection::Desc, true) => "ASC",
                (SortDirection::Desc, false) | (SortDirection::Asc, true) => "DESC",
            };
            format!("{} {direction}", rule.column)
        })
        .collect();
    rendered.join(", ")
}

fn row_statement(
    table: &str,
    group: &FilterGroup,
    where_expr: &str,
    sorts: &[SortRule],
    columns: &[Column],
    config: &EngineConfig,
    warnings: &mut Vec<String>,
) -> String {
    let var = &config.row_var_single;
    let modifier = match group.selection_policy {
        SelectionPolicy::All => "",
        SelectionPolicy::First => "FIRST ",
        SelectionPolicy::Last => "LAST ",
        SelectionPolicy::Random => "RANDOM ",
    };

    let mut statement = format!("[ROW {var} FROM {modifier}{table}");
    if !where_expr.is_empty() {
        statement.push_str(&format!(" WHERE {where_expr}"));
    }
    if !sorts.is_empty() {
        statement.push_str(&format!(" ORDER BY {}", render_order_by(sorts, false)));
    }
    statement.push(']');

    if group.output_mode == OutputMode::Field {
        match &group.output_field {
            Some(field) if is_identifier(field) => {
                let keyword = type_keyword(column_type_of(columns, field));
                let binding = to_variable_name(field, &config.fallback_binding_name);
                statement.push_str(&format!("\n{keyword} {binding} = {var}.{field}"));
            }
            Some(field) => warnings.push(format!(
                "field binding for \"{field}\" skipped: name is not a safe identifier"
            )),
            None => warnings.push("field output requested but no field was chosen".to_string()),
        }
    }
    statement
}

fn rows_statement(
    table: &str,
    group: &FilterGroup,
    where_expr: &str,
    sorts: &[SortRule],
    config: &EngineConfig,
    warnings: &mut Vec<String>,
) -> String {
    let var = &config.row_var_set;
    let mut statement = format!("[ROWS {var} FROM {table}");
    if !where_expr.is_empty() {
        statement.push_str(&format!(" WHERE {where_expr}"));
    }
    if !sorts.is_empty() {
        let flip = group.selection_policy == SelectionPolicy::Last;
        statement.push_str(&format!(" ORDER BY {}", render_order_by(sorts, flip)));
    }
    if let Some(limit) = group.limit {
        // Non-positive limits fall back to 1
        statement.push_str(&format!(" LIMIT {}", limit.max(1)));
    }
    if let Some(offset) = group.offset {
        if offset > 0 {
            statement.push_str(&format!(" OFFSET {offset}"));
        }
    }
    statement.push(']');

    if group.output_mode == OutputMode::Field {
        warnings.push(
            "field output needs a single-record statement; narrow the filter first".to_string(),
        );
    }
    statement
}
