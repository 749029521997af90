//! Expense entity - Spending a user actually made.
//!
//! Discretionary expenses in the month before a goal starts form the goal's
//! `prior_period_ant_expense_total` snapshot.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who spent the money
    pub user_id: i64,
    /// ID of the expense type classifying this expense
    pub expense_type_id: i64,
    /// Amount spent (always positive)
    pub amount: f64,
    /// Human-readable description of the expense
    pub description: String,
    /// Calendar day the money was spent
    pub spent_on: Date,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each expense has one expense type
    #[sea_orm(
        belongs_to = "super::expense_type::Entity",
        from = "Column::ExpenseTypeId",
        to = "super::expense_type::Column::Id"
    )]
    ExpenseType,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::expense_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
