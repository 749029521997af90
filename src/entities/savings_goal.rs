//! Savings goal entity - A target amount to save by avoiding ant expenses.
//!
//! A goal carries a snapshot of the discretionary spending in the month before it
//! starts (`prior_period_ant_expense_total`), which bounds its target. Its lifecycle
//! is tracked by [`GoalState`]; only ACTIVE goals accept changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a savings goal, stored as its upper-case name.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalState {
    /// Accepting avoided expenses, editable and deletable
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Avoided total reached the target; terminal
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Abandoned by its owner; terminal
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl fmt::Display for GoalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        })
    }
}

/// Savings goal database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "savings_goals")]
pub struct Model {
    /// Unique identifier for the goal
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owning user
    pub user_id: i64,
    /// Human-readable goal name (e.g., "Holiday fund")
    pub name: String,
    /// Amount to save
    pub target_amount: f64,
    /// First day of the saving period
    pub start_date: Date,
    /// Last day of the saving period
    pub end_date: Date,
    /// Current lifecycle state
    pub state: GoalState,
    /// Discretionary spending in the month before `start_date`, captured on create/update
    pub prior_period_ant_expense_total: f64,
    /// When the goal was created
    pub registered_at: DateTimeUtc,
}

/// Defines relationships between `SavingsGoal` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each goal belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// One goal owns many avoided expenses
    #[sea_orm(has_many = "super::avoided_expense::Entity")]
    AvoidedExpenses,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::avoided_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AvoidedExpenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
