//! Avoided expense entity - Discretionary spending a user chose to skip.
//!
//! Each record belongs to exactly one savings goal and is removed with it.
//! The sum of a goal's avoided expenses is its progress.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Avoided expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "avoided_expenses")]
pub struct Model {
    /// Unique identifier for the avoided expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the savings goal this counts toward
    pub goal_id: i64,
    /// ID of the (discretionary) expense type that was avoided
    pub expense_type_id: i64,
    /// Amount saved (always positive)
    pub amount: f64,
    /// What was skipped
    pub description: String,
    /// Free-form pointer to proof of the saving, e.g. a receipt reference
    pub evidence_ref: Option<String>,
    /// Calendar day the saving was recorded
    pub recorded_on: Date,
}

/// Defines relationships between `AvoidedExpense` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each avoided expense belongs to one savings goal
    #[sea_orm(
        belongs_to = "super::savings_goal::Entity",
        from = "Column::GoalId",
        to = "super::savings_goal::Column::Id",
        on_delete = "Cascade"
    )]
    SavingsGoal,
    /// Each avoided expense has one expense type
    #[sea_orm(
        belongs_to = "super::expense_type::Entity",
        from = "Column::ExpenseTypeId",
        to = "super::expense_type::Column::Id"
    )]
    ExpenseType,
}

impl Related<super::savings_goal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavingsGoal.def()
    }
}

impl Related<super::expense_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
