//! Answer-form front end.
//!
//! The guided Q&A filter collects one answer per column. Lowering turns the
//! answer set into the canonical clause list so the one clause compiler (and
//! the preview interpreter mirroring it) defines the semantics for both
//! front ends.

use crate::model::{AnswerValue, FilterClause, FilterOperator, LogicalJoin};

/// One answer per column, in column declaration order.
pub type AnswerSet = Vec<(String, AnswerValue)>;

/// Lower answers into a flat AND-chain. `Any` contributes no clause, `Empty`
/// becomes a presence check, a literal becomes an equality clause.
pub fn answers_to_clauses(answers: &[(String, AnswerValue)]) -> Vec<FilterClause> {
    answers
        .iter()
        .filter_map(|(column, answer)| {
            let (operator, value) = match answer {
                AnswerValue::Any => return None,
                AnswerValue::Empty => (FilterOperator::Blank, String::new()),
                AnswerValue::Literal(v) => (FilterOperator::Equals, v.clone()),
            };
            Some(FilterClause {
                column: column.clone(),
                operator,
                value,
                logical: LogicalJoin::And,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowers_sentinels_and_literals() {
        let answers = vec![
            ("status".to_string(), AnswerValue::Literal("active".to_string())),
            ("nickname".to_string(), AnswerValue::Empty),
            ("age".to_string(), AnswerValue::Any),
        ];
        let clauses = answers_to_clauses(&answers);
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].column, "status");
        assert_eq!(clauses[0].operator, FilterOperator::Equals);
        assert_eq!(clauses[0].value, "active");
        assert_eq!(clauses[1].column, "nickname");
        assert_eq!(clauses[1].operator, FilterOperator::Blank);
        assert!(clauses.iter().all(|c| c.logical == LogicalJoin::And));
    }

    #[test]
    fn all_any_lowers_to_no_clauses() {
        let answers = vec![
            ("a".to_string(), AnswerValue::Any),
            ("b".to_string(), AnswerValue::Any),
        ];
        assert!(answers_to_clauses(&answers).is_empty());
    }
}
