//! Expense type catalogue loading from config.toml
//!
//! The expense types listed in config.toml are seeded into the database at
//! startup so users can classify expenses before any are created by hand.
//! Each entry says whether the type is essential; only discretionary types
//! feed the ant expense snapshot and avoided-expense accounting.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_VAR: &str = "ANT_SAVINGS_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Expense types to seed
    #[serde(default)]
    pub expense_types: Vec<ExpenseTypeConfig>,
}

/// Configuration for a single expense type
#[derive(Debug, Deserialize, Clone)]
pub struct ExpenseTypeConfig {
    /// Name of the expense type
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Whether this is a base expense (rent, utilities) rather than an ant expense
    #[serde(default)]
    pub is_essential: bool,
}

/// Loads expense type configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses the contents of a config.toml file
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from `$ANT_SAVINGS_CONFIG`, or ./config.toml when unset
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_expense_type_config() {
        let toml_str = r#"
            [[expense_types]]
            name = "Rent"
            is_essential = true

            [[expense_types]]
            name = "Coffee"
            description = "Takeaway coffee"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.expense_types.len(), 2);
        assert_eq!(config.expense_types[0].name, "Rent");
        assert!(config.expense_types[0].is_essential);
        assert!(config.expense_types[0].description.is_none());

        assert_eq!(config.expense_types[1].name, "Coffee");
        assert!(!config.expense_types[1].is_essential);
        assert_eq!(
            config.expense_types[1].description.as_deref(),
            Some("Takeaway coffee")
        );
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.expense_types.is_empty());
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = parse_config("[[expense_types]]\nis_essential = true\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("definitely/not/here/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
