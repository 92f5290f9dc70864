//! Integration tests for the wire contract of generated snippets.
//!
//! The emitted text must stay byte-stable for a given input; these tests
//! pin whole snippets rather than substrings.

use rowscript::{
    Column, ColumnType, FilterClause, FilterGroup, FilterOperator, LogicalJoin, OutputMode,
    ResultShape, SelectionPolicy, SnippetBuilder, SortDirection, SortRule,
};

fn columns() -> Vec<Column> {
    vec![
        Column {
            name: "status".to_string(),
            column_type: ColumnType::Text,
        },
        Column {
            name: "age".to_string(),
            column_type: ColumnType::Number,
        },
        Column {
            name: "signup".to_string(),
            column_type: ColumnType::Date,
        },
    ]
}

fn clause(column: &str, operator: FilterOperator, value: &str, logical: LogicalJoin) -> FilterClause {
    FilterClause {
        column: column.to_string(),
        operator,
        value: value.to_string(),
        logical,
    }
}

#[test]
fn renders_and_chain_over_users() {
    let builder = SnippetBuilder::default();
    let group = FilterGroup {
        clauses: vec![
            clause("status", FilterOperator::Equals, "active", LogicalJoin::And),
            clause("age", FilterOperator::GreaterThan, "18", LogicalJoin::And),
        ],
        ..FilterGroup::default()
    };
    let result = builder.compile("users", &columns(), &group, Some(5));
    assert_eq!(
        result.snippet,
        "[ROWS many FROM Users WHERE status = \"active\" AND age > 18]"
    );
    assert_eq!(result.shape, ResultShape::Rows);
    assert!(result.warnings.is_empty());
}

#[test]
fn first_policy_without_sort_emits_no_order_by() {
    let builder = SnippetBuilder::default();
    let group = FilterGroup {
        clauses: vec![clause(
            "status",
            FilterOperator::Equals,
            "active",
            LogicalJoin::And,
        )],
        selection_policy: SelectionPolicy::First,
        ..FilterGroup::default()
    };
    let result = builder.compile("users", &columns(), &group, None);
    assert_eq!(
        result.snippet,
        "[ROW one FROM FIRST Users WHERE status = \"active\"]"
    );
    assert_eq!(result.shape, ResultShape::Row);
}

#[test]
fn unsafe_column_is_dropped_and_the_rest_still_compiles() {
    let builder = SnippetBuilder::default();
    let group = FilterGroup {
        clauses: vec![
            clause("bad col", FilterOperator::Equals, "x", LogicalJoin::And),
            clause("age", FilterOperator::LessThan, "65", LogicalJoin::And),
        ],
        ..FilterGroup::default()
    };
    let result = builder.compile("users", &columns(), &group, Some(2));
    assert_eq!(result.snippet, "[ROWS many FROM Users WHERE age < 65]");
    assert!(result.warnings.iter().any(|w| w.contains("bad col")));
    assert!(!result.snippet.contains("bad col"));
}

#[test]
fn adversarial_names_never_appear_verbatim() {
    let builder = SnippetBuilder::default();
    let hostile = "x\"; DELETE ROWS";
    let group = FilterGroup {
        clauses: vec![clause(hostile, FilterOperator::Equals, "1", LogicalJoin::And)],
        sort: vec![SortRule {
            column: hostile.to_string(),
            direction: SortDirection::Asc,
        }],
        ..FilterGroup::default()
    };
    let result = builder.compile("users", &columns(), &group, Some(3));
    assert!(!result.snippet.contains(hostile));
    assert_eq!(result.snippet, "[ROWS many FROM Users]");
    // One warning for the clause, one for the sort rule
    assert_eq!(
        result.warnings.iter().filter(|w| w.contains(hostile)).count(),
        2
    );
}

#[test]
fn shape_matches_policy_and_match_count_everywhere() {
    let builder = SnippetBuilder::default();
    let policies = [
        SelectionPolicy::All,
        SelectionPolicy::First,
        SelectionPolicy::Last,
        SelectionPolicy::Random,
    ];
    for policy in policies {
        for count in [None, Some(0), Some(1), Some(7)] {
            let group = FilterGroup {
                selection_policy: policy,
                ..FilterGroup::default()
            };
            let result = builder.compile("users", &columns(), &group, count);
            let expect_row = policy != SelectionPolicy::All || count == Some(1);
            assert_eq!(
                result.shape,
                if expect_row { ResultShape::Row } else { ResultShape::Rows },
                "policy {policy:?}, count {count:?}"
            );
        }
    }
}

#[test]
fn unknown_match_count_under_all_warns() {
    let builder = SnippetBuilder::default();
    let result = builder.compile("users", &columns(), &FilterGroup::default(), None);
    assert_eq!(result.shape, ResultShape::Rows);
    assert!(result.warnings.iter().any(|w| w.contains("match count unknown")));
}

#[test]
fn join_token_count_is_survivors_minus_one() {
    let builder = SnippetBuilder::default();
    let group = FilterGroup {
        clauses: vec![
            clause("status", FilterOperator::Equals, "a", LogicalJoin::And),
            clause("bad col", FilterOperator::Equals, "b", LogicalJoin::Or),
            clause("age", FilterOperator::GreaterThan, "1", LogicalJoin::Or),
            clause("signup", FilterOperator::NotBlank, "", LogicalJoin::And),
        ],
        ..FilterGroup::default()
    };
    let result = builder.compile("users", &columns(), &group, Some(4));
    let joins =
        result.snippet.matches(" AND ").count() + result.snippet.matches(" OR ").count();
    // 3 surviving clauses
    assert_eq!(joins, 2);
    assert_eq!(
        result.snippet,
        "[ROWS many FROM Users WHERE status = \"a\" OR age > 1 AND signup IS NOT EMPTY]"
    );
}

#[test]
fn full_rows_statement_with_sort_limit_offset() {
    let builder = SnippetBuilder::default();
    let group = FilterGroup {
        clauses: vec![clause(
            "signup",
            FilterOperator::GreaterThanOrEqual,
            "2024-01-01",
            LogicalJoin::And,
        )],
        sort: vec![
            SortRule {
                column: "signup".to_string(),
                direction: SortDirection::Desc,
            },
            SortRule {
                column: "age".to_string(),
                direction: SortDirection::Asc,
            },
        ],
        limit: Some(25),
        offset: Some(50),
        ..FilterGroup::default()
    };
    let result = builder.compile("user accounts", &columns(), &group, Some(100));
    assert_eq!(
        result.snippet,
        "[ROWS many FROM UserAccounts WHERE signup >= \"2024-01-01\" \
         ORDER BY signup DESC, age ASC LIMIT 25 OFFSET 50]"
    );
}

#[test]
fn field_output_on_single_row() {
    let builder = SnippetBuilder::default();
    let group = FilterGroup {
        clauses: vec![clause(
            "status",
            FilterOperator::Equals,
            "active",
            LogicalJoin::And,
        )],
        selection_policy: SelectionPolicy::Random,
        output_mode: OutputMode::Field,
        output_field: Some("signup".to_string()),
        ..FilterGroup::default()
    };
    let result = builder.compile("users", &columns(), &group, None);
    assert_eq!(
        result.snippet,
        "[ROW one FROM RANDOM Users WHERE status = \"active\"]\nDATE signup = one.signup"
    );
}

#[test]
fn quick_search_is_never_embedded() {
    let builder = SnippetBuilder::default();
    let group = FilterGroup {
        quick_search: Some("needle".to_string()),
        ..FilterGroup::default()
    };
    let result = builder.compile("users", &columns(), &group, Some(3));
    assert!(!result.snippet.contains("needle"));
}

#[test]
fn blocked_group_produces_placeholder() {
    let builder = SnippetBuilder::default();
    let group = FilterGroup {
        clauses: vec![clause(
            "status",
            FilterOperator::Equals,
            "active",
            LogicalJoin::And,
        )],
        blocked_reason: Some("no table selected".to_string()),
        ..FilterGroup::default()
    };
    let result = builder.compile("users", &columns(), &group, Some(1));
    assert_eq!(result.snippet, "// blocked: no table selected");
    assert!(result.warnings.iter().any(|w| w.contains("no table selected")));
}

#[test]
fn identical_input_is_byte_stable() {
    let builder = SnippetBuilder::default();
    let group = FilterGroup {
        clauses: vec![
            clause("status", FilterOperator::Contains, "a\\b \"c\"", LogicalJoin::And),
            clause("age", FilterOperator::NotEqual, "3.5", LogicalJoin::Or),
        ],
        sort: vec![SortRule {
            column: "age".to_string(),
            direction: SortDirection::Asc,
        }],
        limit: Some(3),
        ..FilterGroup::default()
    };
    let first = builder.compile("users", &columns(), &group, Some(9));
    let second = builder.compile("users", &columns(), &group, Some(9));
    assert_eq!(first.snippet, second.snippet);
    assert_eq!(
        first.snippet,
        "[ROWS many FROM Users WHERE status CONTAINS \"a\\\\b \\\"c\\\"\" OR age != 3.5 \
         ORDER BY age ASC LIMIT 3]"
    );
}
