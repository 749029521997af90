//! User entity - The owner of expenses and savings goals.
//!
//! Authentication lives outside this crate; a user here is only the identity
//! every goal and expense hangs off.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Contact email, unique across users
    #[sea_orm(unique)]
    pub email: String,
    /// When the user registered
    pub registered_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One user has many savings goals
    #[sea_orm(has_many = "super::savings_goal::Entity")]
    SavingsGoals,
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::savings_goal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavingsGoals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
