//! Literal and identifier safety layer.
//!
//! Every literal or identifier that reaches a generated snippet is emitted
//! through this module, so there is exactly one place capable of introducing
//! unsafe text. Columns that fail [`is_identifier`] must be dropped by the
//! caller with a warning; they are never quoted or escaped into a snippet.

use crate::model::ColumnType;

/// Render a raw answer value as a RowScript literal for the declared type.
///
/// Number parsing is tolerant: an unparsable value degrades to `0` without a
/// warning. Booleans normalize `{true,1,yes}` / `{false,0,no}`, anything
/// else is `false`. Text and date values are quoted with `\` and `"` escaped.
pub fn to_literal(value: &str, column_type: ColumnType) -> String {
    match column_type {
        ColumnType::Number => match value.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => {
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    format!("{}", n as i64)
                } else {
                    format!("{n}")
                }
            }
            _ => "0".to_string(),
        },
        ColumnType::Boolean => normalize_bool(value).unwrap_or(false).to_string(),
        ColumnType::Text | ColumnType::Date => quote_text(value),
    }
}

/// Normalize a boolean spelling. `None` means the value has no boolean
/// reading at all; [`to_literal`] maps that to `false`, the preview
/// interpreter falls back to string comparison instead.
pub fn normalize_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn quote_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '\\' || ch == '"' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// True iff `name` matches `^[A-Za-z_][A-Za-z0-9_]*$` and is safe to
/// interpolate verbatim. This is the engine's sole injection-safety check.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Best-effort conversion of a column name into a value-binding name.
/// Never used for safety-critical identifiers.
pub fn to_variable_name(text: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
        }
    }
    // Drop everything before the first letter so the result starts
    // identifier-shaped no matter how digits and separators interleave.
    let name: String = out
        .chars()
        .skip_while(|c| !c.is_ascii_alphabetic())
        .collect();
    let name = name.trim_end_matches('_').to_string();
    if name.is_empty() {
        fallback.to_string()
    } else {
        name
    }
}

/// Normalize a raw table name into the fixed capitalized-words form the
/// runtime expects (`"user accounts"` becomes `UserAccounts`).
pub fn format_table_name(raw: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    if out.is_empty() {
        fallback.to_string()
    } else {
        out
    }
}

/// Declared-type keyword for a field-extraction binding line.
pub fn type_keyword(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::Text => "TEXT",
        ColumnType::Number => "NUMBER",
        ColumnType::Boolean => "BOOLEAN",
        ColumnType::Date => "DATE",
    }
}
