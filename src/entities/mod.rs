//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod avoided_expense;
pub mod expense;
pub mod expense_type;
pub mod savings_goal;
pub mod user;

// Re-export specific types to avoid conflicts
pub use avoided_expense::{
    Column as AvoidedExpenseColumn, Entity as AvoidedExpense, Model as AvoidedExpenseModel,
};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use expense_type::{
    Column as ExpenseTypeColumn, Entity as ExpenseType, Model as ExpenseTypeModel,
};
pub use savings_goal::{
    Column as SavingsGoalColumn, Entity as SavingsGoal, GoalState, Model as SavingsGoalModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
