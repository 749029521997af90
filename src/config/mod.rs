/// Database configuration and connection management
pub mod database;

/// Expense type catalogue loading from config.toml
pub mod expense_types;
