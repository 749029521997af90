//! Expense type entity - Classifies spending as essential or discretionary.
//!
//! Essential ("base") types such as rent or utilities never count toward the
//! ant expense snapshot and can never be recorded as avoided.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense type database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_types")]
pub struct Model {
    /// Unique identifier for the expense type
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g., "Coffee", "Rent")
    #[sea_orm(unique)]
    pub name: String,
    /// Optional longer explanation
    pub description: Option<String>,
    /// Whether this is a base expense exempt from avoided-expense accounting
    pub is_essential: bool,
}

/// Defines relationships between `ExpenseType` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One expense type classifies many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One expense type classifies many avoided expenses
    #[sea_orm(has_many = "super::avoided_expense::Entity")]
    AvoidedExpenses,
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::avoided_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AvoidedExpenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
