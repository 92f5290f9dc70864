//! Clause compiler: lowers ordered filter clauses into one WHERE expression.

use crate::model::{Column, FilterClause, FilterOperator, LogicalJoin, column_type_of};
use crate::safety::{is_identifier, to_literal};

/// Render a single clause as an expression fragment. Returns `None` when the
/// column name is not a safe identifier; such clauses are dropped upstream.
pub(crate) fn clause_expression(clause: &FilterClause, columns: &[Column]) -> Option<String> {
    if !is_identifier(&clause.column) {
        return None;
    }
    let col = clause.column.as_str();
    let lit = || to_literal(&clause.value, column_type_of(columns, col));
    let expr = match clause.operator {
        FilterOperator::Equals => format!("{col} = {}", lit()),
        FilterOperator::NotEqual => format!("{col} != {}", lit()),
        FilterOperator::Contains => format!("{col} CONTAINS {}", lit()),
        FilterOperator::NotContains => format!("NOT ({col} CONTAINS {})", lit()),
        FilterOperator::StartsWith => format!("{col} STARTS WITH {}", lit()),
        FilterOperator::EndsWith => format!("{col} ENDS WITH {}", lit()),
        FilterOperator::GreaterThan => format!("{col} > {}", lit()),
        FilterOperator::LessThan => format!("{col} < {}", lit()),
        FilterOperator::GreaterThanOrEqual => format!("{col} >= {}", lit()),
        FilterOperator::LessThanOrEqual => format!("{col} <= {}", lit()),
        FilterOperator::Blank => format!("{col} IS EMPTY"),
        FilterOperator::NotBlank => format!("{col} IS NOT EMPTY"),
    };
    Some(expr)
}

/// Join surviving fragments into one flat chain. The first fragment is
/// emitted bare; every later one is prefixed with its own join keyword.
/// Dropped clauses never consume a join slot.
pub(crate) fn join_fragments(fragments: &[(LogicalJoin, String)]) -> String {
    let mut out = String::new();
    for (idx, (logical, expr)) in fragments.iter().enumerate() {
        if idx > 0 {
            out.push_str(match logical {
                LogicalJoin::And => " AND ",
                LogicalJoin::Or => " OR ",
            });
        }
        out.push_str(expr);
    }
    out
}

/// Compile clauses in input order, collecting safety warnings for dropped
/// ones. Returns the surviving fragments still carrying their joins so the
/// assembler can append reference fragments under the same rule.
pub(crate) fn compile_clauses(
    clauses: &[FilterClause],
    columns: &[Column],
    warnings: &mut Vec<String>,
) -> Vec<(LogicalJoin, String)> {
    let mut fragments = Vec::with_capacity(clauses.len());
    for clause in clauses {
        match clause_expression(clause, columns) {
            Some(expr) => fragments.push((clause.logical, expr)),
            None => warnings.push(format!(
                "filter on \"{}\" skipped: column name is not a safe identifier",
                clause.column
            )),
        }
    }
    fragments
}
