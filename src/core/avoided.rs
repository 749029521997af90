//! Avoided expense business logic - recording savings against a goal.
//!
//! Recording an avoided expense is the only way a goal makes progress. The record
//! is inserted and the goal's completion check runs in the same transaction, so a
//! reader never sees the new total without the state change it causes.

use crate::{
    core::{
        expense_type::get_expense_type_by_id,
        goal::{check_and_complete_goal, require_goal},
        today,
    },
    entities::{AvoidedExpense, GoalState, avoided_expense},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Records discretionary spending the user skipped and counts it toward a goal.
///
/// Checks run in this order, each failing before anything is written:
/// 1. `amount` is a positive finite number ([`Error::InvalidAmount`])
/// 2. `description` is not blank ([`Error::InvalidArgument`])
/// 3. the goal exists ([`Error::GoalNotFound`])
/// 4. the goal is ACTIVE ([`Error::InvalidState`])
/// 5. the expense type exists ([`Error::ExpenseTypeNotFound`])
/// 6. the expense type is not essential ([`Error::EssentialExpenseType`])
///
/// On success the goal is completed if the new total reaches its target.
///
/// # Arguments
/// * `goal_id` - Goal the saving counts toward
/// * `expense_type_id` - Discretionary expense type that was avoided
/// * `amount` - Amount saved
/// * `description` - What was skipped
/// * `evidence_ref` - Optional pointer to proof, e.g. a receipt reference
#[instrument(skip(db, description, evidence_ref))]
pub async fn record_avoided_expense(
    db: &DatabaseConnection,
    goal_id: i64,
    expense_type_id: i64,
    amount: f64,
    description: String,
    evidence_ref: Option<String>,
) -> Result<avoided_expense::Model> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let description = description.trim();
    if description.is_empty() {
        return Err(Error::invalid_argument(
            "Avoided expense description cannot be empty",
        ));
    }

    let txn = db.begin().await?;

    let goal = require_goal(&txn, goal_id).await?;
    if goal.state != GoalState::Active {
        return Err(Error::InvalidState {
            goal_id,
            state: goal.state,
        });
    }

    let expense_type = get_expense_type_by_id(&txn, expense_type_id)
        .await?
        .ok_or(Error::ExpenseTypeNotFound {
            id: expense_type_id,
        })?;
    if expense_type.is_essential {
        return Err(Error::EssentialExpenseType {
            name: expense_type.name,
        });
    }

    let avoided = avoided_expense::ActiveModel {
        goal_id: Set(goal_id),
        expense_type_id: Set(expense_type_id),
        amount: Set(amount),
        description: Set(description.to_string()),
        evidence_ref: Set(evidence_ref.filter(|e| !e.trim().is_empty())),
        recorded_on: Set(today()),
        ..Default::default()
    };

    let result = avoided.insert(&txn).await?;
    let goal = check_and_complete_goal(&txn, goal_id).await?;

    txn.commit().await?;

    info!(
        avoided_expense_id = result.id,
        state = %goal.state,
        "Recorded avoided expense"
    );
    Ok(result)
}

/// Retrieves the avoided expenses of a goal, oldest first.
pub async fn get_avoided_expenses_for_goal(
    db: &DatabaseConnection,
    goal_id: i64,
) -> Result<Vec<avoided_expense::Model>> {
    AvoidedExpense::find()
        .filter(avoided_expense::Column::GoalId.eq(goal_id))
        .order_by_asc(avoided_expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
