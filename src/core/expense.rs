//! Expense business logic - Handles logging and querying actual spending.
//!
//! Expenses are the historical record a savings goal is measured against: the
//! discretionary ones in the month before a goal starts become its snapshot.
//! All functions are async and return Result types for error handling.

use crate::{
    core::{expense_type::get_expense_type_by_id, user::require_user},
    entities::{Expense, ExpenseType, expense, expense_type},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*, sea_query::Expr};

/// Records an expense for a user.
///
/// Validates that the amount is a positive finite number, the description is not
/// blank, and both the user and the expense type exist.
///
/// # Arguments
/// * `user_id` - The user who spent the money
/// * `expense_type_id` - Classification of the expense
/// * `amount` - Amount spent (must be positive)
/// * `description` - What the money was spent on
/// * `spent_on` - Calendar day of the expense
pub async fn create_expense(
    db: &DatabaseConnection,
    user_id: i64,
    expense_type_id: i64,
    amount: f64,
    description: String,
    spent_on: NaiveDate,
) -> Result<expense::Model> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let description = description.trim();
    if description.is_empty() {
        return Err(Error::invalid_argument("Expense description cannot be empty"));
    }

    require_user(db, user_id).await?;
    get_expense_type_by_id(db, expense_type_id)
        .await?
        .ok_or(Error::ExpenseTypeNotFound {
            id: expense_type_id,
        })?;

    let expense = expense::ActiveModel {
        user_id: Set(user_id),
        expense_type_id: Set(expense_type_id),
        amount: Set(amount),
        description: Set(description.to_string()),
        spent_on: Set(spent_on),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = expense.insert(db).await?;
    Ok(result)
}

/// Retrieves a specific expense by its unique ID.
pub async fn get_expense_by_id(
    db: &DatabaseConnection,
    expense_id: i64,
) -> Result<Option<expense::Model>> {
    Expense::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all expenses of a user, newest first.
pub async fn get_expenses_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .order_by_desc(expense::Column::SpentOn)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the expenses of a user spent in `[from, to)`, newest first.
pub async fn get_expenses_for_user_in_period(
    db: &DatabaseConnection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::SpentOn.gte(from))
        .filter(expense::Column::SpentOn.lt(to))
        .order_by_desc(expense::Column::SpentOn)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an expense owned by `owner_id`.
///
/// Goal snapshots already taken are not recomputed; they reflect spending at the
/// time the goal was created or last edited.
pub async fn delete_expense(
    db: &DatabaseConnection,
    expense_id: i64,
    owner_id: i64,
) -> Result<()> {
    let expense = get_expense_by_id(db, expense_id)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    if expense.user_id != owner_id {
        return Err(Error::PermissionDenied {
            resource: "expense",
            id: expense_id,
            user_id: owner_id,
        });
    }

    expense.delete(db).await?;
    Ok(())
}

/// Sums the discretionary (non-essential) expenses of a user spent between `from`
/// and `to`, both days included.
///
/// Returns 0.0 when there are none.
pub async fn sum_discretionary_expenses<C>(
    db: &C,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<f64>
where
    C: ConnectionTrait,
{
    let total: Option<Option<f64>> = Expense::find()
        .inner_join(ExpenseType)
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense_type::Column::IsEssential.eq(false))
        .filter(expense::Column::SpentOn.between(from, to))
        .select_only()
        .column_as(Expr::col((Expense, expense::Column::Amount)).sum(), "total")
        .into_tuple()
        .one(db)
        .await?;

    Ok(total.flatten().unwrap_or(0.0))
}
