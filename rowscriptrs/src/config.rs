//! Configuration for the filter engine.
//!
//! The original call sites baked fallback table and variable names into the
//! snippet builders; here every default lives in one explicit, TOML-loadable
//! configuration object passed into the entry points.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RowscriptError};

/// Engine configuration with documented defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Row variable bound by single-record statements (default: "one").
    pub row_var_single: String,
    /// Row variable bound by record-set statements (default: "many").
    pub row_var_set: String,
    /// Binding name used when a column name reduces to nothing (default: "value").
    pub fallback_binding_name: String,
    /// Table name used when the caller supplies an empty one (default: "Table").
    pub fallback_table_name: String,
    /// Maximum distinct values collected per column in previews (default: 200).
    pub distinct_value_cap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            row_var_single: "one".to_string(),
            row_var_set: "many".to_string(),
            fallback_binding_name: "value".to_string(),
            fallback_table_name: "Table".to_string(),
            distinct_value_cap: 200,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RowscriptError::Config(format!("failed to read config file: {e}")))?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| RowscriptError::Config(format!("failed to parse config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.row_var_single, "one");
        assert_eq!(cfg.row_var_set, "many");
        assert_eq!(cfg.distinct_value_cap, 200);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
row_var_single = "record"
distinct_value_cap = 50
"#;
        let cfg = EngineConfig::from_toml(toml).unwrap();
        assert_eq!(cfg.row_var_single, "record");
        assert_eq!(cfg.distinct_value_cap, 50);
        // Unspecified fields keep their defaults
        assert_eq!(cfg.row_var_set, "many");
        assert_eq!(cfg.fallback_table_name, "Table");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fallback_table_name = \"Sheet\"").unwrap();
        let cfg = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.fallback_table_name, "Sheet");
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(EngineConfig::from_toml("distinct_value_cap = \"lots\"").is_err());
    }
}
