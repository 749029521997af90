//! Savings goal business logic - the goal lifecycle.
//!
//! A goal is created ACTIVE with a snapshot of the owner's discretionary spending
//! in the month before it starts, and its target may never exceed that snapshot.
//! It completes automatically once the avoided expenses recorded against it reach
//! the target. Only ACTIVE goals can be edited, cancelled, or deleted, and only by
//! their owner. Every mutation runs in a single database transaction and all
//! validation happens before the first write.

use crate::{
    core::{expense::sum_discretionary_expenses, today, user::require_user},
    entities::{AvoidedExpense, GoalState, SavingsGoal, avoided_expense, savings_goal},
    errors::{Error, Result},
};
use chrono::{Months, NaiveDate};
use sea_orm::{
    ActiveEnum, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*, sea_query::Expr,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Editable fields of a savings goal, as supplied by the caller on create and update.
///
/// Dates are optional so a request with a missing date reaches validation and is
/// rejected with [`Error::InvalidArgument`] instead of failing to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalFields {
    /// Goal name
    pub name: String,
    /// Amount to save
    pub target_amount: f64,
    /// First day of the saving period
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the saving period
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Goal fields that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedGoal {
    /// Trimmed, non-blank name
    pub name: String,
    /// Positive finite target
    pub target_amount: f64,
    /// Start date, not before today
    pub start_date: NaiveDate,
    /// End date, not before the start date
    pub end_date: NaiveDate,
}

/// Checks goal fields against the rules shared by create and update.
///
/// Dates must both be present, the start date may not be after the end date nor
/// before `today`, the target must be a positive finite number, and the name must
/// not be blank.
pub fn validate_goal_fields(fields: &GoalFields, today: NaiveDate) -> Result<ValidatedGoal> {
    let (Some(start_date), Some(end_date)) = (fields.start_date, fields.end_date) else {
        return Err(Error::invalid_argument("Start and end dates are required"));
    };

    if start_date > end_date {
        return Err(Error::invalid_argument(format!(
            "Start date {start_date} is after end date {end_date}"
        )));
    }

    if start_date < today {
        return Err(Error::invalid_argument(format!(
            "Start date {start_date} is before today ({today})"
        )));
    }

    if !fields.target_amount.is_finite() || fields.target_amount <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: fields.target_amount,
        });
    }

    let name = fields.name.trim();
    if name.is_empty() {
        return Err(Error::invalid_argument("Goal name cannot be empty"));
    }

    Ok(ValidatedGoal {
        name: name.to_string(),
        target_amount: fields.target_amount,
        start_date,
        end_date,
    })
}

/// The window whose discretionary spending bounds a goal starting on `start_date`:
/// the month leading up to it, as the inclusive range
/// `[start_date - 1 month, start_date]`. Spending on the start day itself counts.
pub fn prior_period(start_date: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let from = start_date
        .checked_sub_months(Months::new(1))
        .ok_or_else(|| {
            Error::invalid_argument(format!("Start date {start_date} is out of range"))
        })?;
    Ok((from, start_date))
}

/// Computes the snapshot for `owner_id` and checks the target against it.
async fn baseline_for<C>(db: &C, owner_id: i64, goal: &ValidatedGoal) -> Result<f64>
where
    C: ConnectionTrait,
{
    let (from, to) = prior_period(goal.start_date)?;
    let baseline = sum_discretionary_expenses(db, owner_id, from, to).await?;
    debug!(owner_id, %from, %to, baseline, "Computed prior period ant expense total");

    if goal.target_amount > baseline {
        return Err(Error::TargetExceedsBaseline {
            target: goal.target_amount,
            baseline,
        });
    }

    Ok(baseline)
}

/// Loads a goal and checks that `owner_id` may change it: it must exist, belong to
/// the caller, and still be ACTIVE.
async fn require_mutable_goal<C>(
    db: &C,
    goal_id: i64,
    owner_id: i64,
) -> Result<savings_goal::Model>
where
    C: ConnectionTrait,
{
    let goal = require_goal(db, goal_id).await?;

    if goal.user_id != owner_id {
        return Err(Error::PermissionDenied {
            resource: "savings goal",
            id: goal_id,
            user_id: owner_id,
        });
    }

    if goal.state != GoalState::Active {
        return Err(Error::InvalidState {
            goal_id,
            state: goal.state,
        });
    }

    Ok(goal)
}

/// Finds a goal by ID, returning None if absent.
pub async fn find_goal_by_id<C>(db: &C, goal_id: i64) -> Result<Option<savings_goal::Model>>
where
    C: ConnectionTrait,
{
    SavingsGoal::find_by_id(goal_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a goal by ID, failing with [`Error::GoalNotFound`] if absent.
pub async fn require_goal<C>(db: &C, goal_id: i64) -> Result<savings_goal::Model>
where
    C: ConnectionTrait,
{
    find_goal_by_id(db, goal_id)
        .await?
        .ok_or(Error::GoalNotFound { id: goal_id })
}

/// Retrieves a goal by ID, returning None if absent.
pub async fn get_goal_by_id(
    db: &DatabaseConnection,
    goal_id: i64,
) -> Result<Option<savings_goal::Model>> {
    find_goal_by_id(db, goal_id).await
}

/// Retrieves every goal of a user, oldest first.
pub async fn get_goals_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<savings_goal::Model>> {
    SavingsGoal::find()
        .filter(savings_goal::Column::UserId.eq(user_id))
        .order_by_asc(savings_goal::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the goals of a user in a given state, oldest first.
pub async fn get_goals_for_user_by_state(
    db: &DatabaseConnection,
    user_id: i64,
    state: GoalState,
) -> Result<Vec<savings_goal::Model>> {
    SavingsGoal::find()
        .filter(savings_goal::Column::UserId.eq(user_id))
        .filter(savings_goal::Column::State.eq(state))
        .order_by_asc(savings_goal::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every ACTIVE goal across all users, oldest first.
pub async fn get_active_goals(db: &DatabaseConnection) -> Result<Vec<savings_goal::Model>> {
    SavingsGoal::find()
        .filter(savings_goal::Column::State.eq(GoalState::Active))
        .order_by_asc(savings_goal::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums the avoided expenses recorded against a goal. Returns 0.0 when there are none.
pub async fn sum_avoided_expenses<C>(db: &C, goal_id: i64) -> Result<f64>
where
    C: ConnectionTrait,
{
    // SUM over no rows is NULL
    let total: Option<Option<f64>> = AvoidedExpense::find()
        .filter(avoided_expense::Column::GoalId.eq(goal_id))
        .select_only()
        .column_as(
            Expr::col((AvoidedExpense, avoided_expense::Column::Amount)).sum(),
            "total",
        )
        .into_tuple()
        .one(db)
        .await?;

    Ok(total.flatten().unwrap_or(0.0))
}

/// Creates a new ACTIVE savings goal for `owner_id`.
///
/// Validates the fields, checks the owner exists, and computes the owner's
/// discretionary spending in the month before the start date. The goal is
/// rejected with [`Error::TargetExceedsBaseline`] if its target is larger than
/// that total; a target equal to it is accepted.
#[instrument(skip(db, fields))]
pub async fn create_goal(
    db: &DatabaseConnection,
    owner_id: i64,
    fields: GoalFields,
) -> Result<savings_goal::Model> {
    let validated = validate_goal_fields(&fields, today())?;

    let txn = db.begin().await?;

    require_user(&txn, owner_id).await?;
    let baseline = baseline_for(&txn, owner_id, &validated).await?;

    let goal = savings_goal::ActiveModel {
        user_id: Set(owner_id),
        name: Set(validated.name),
        target_amount: Set(validated.target_amount),
        start_date: Set(validated.start_date),
        end_date: Set(validated.end_date),
        state: Set(GoalState::Active),
        prior_period_ant_expense_total: Set(baseline),
        registered_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = goal.insert(&txn).await?;
    txn.commit().await?;

    info!(goal_id = result.id, baseline, "Created savings goal");
    Ok(result)
}

/// Replaces the editable fields of an ACTIVE goal owned by `owner_id`.
///
/// Runs the same validation as [`create_goal`] against the new values and
/// recomputes the snapshot for the new start date. State and registration time
/// are left unchanged.
#[instrument(skip(db, fields))]
pub async fn update_goal(
    db: &DatabaseConnection,
    goal_id: i64,
    owner_id: i64,
    fields: GoalFields,
) -> Result<savings_goal::Model> {
    let validated = validate_goal_fields(&fields, today())?;

    let txn = db.begin().await?;

    require_user(&txn, owner_id).await?;
    let goal = require_mutable_goal(&txn, goal_id, owner_id).await?;
    let baseline = baseline_for(&txn, owner_id, &validated).await?;

    let mut active_model: savings_goal::ActiveModel = goal.into();
    active_model.name = Set(validated.name);
    active_model.target_amount = Set(validated.target_amount);
    active_model.start_date = Set(validated.start_date);
    active_model.end_date = Set(validated.end_date);
    active_model.prior_period_ant_expense_total = Set(baseline);

    let result = active_model.update(&txn).await?;
    txn.commit().await?;

    info!(goal_id, baseline, "Updated savings goal");
    Ok(result)
}

/// Deletes an ACTIVE goal owned by `owner_id` together with its avoided expenses.
#[instrument(skip(db))]
pub async fn delete_goal(db: &DatabaseConnection, goal_id: i64, owner_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    require_user(&txn, owner_id).await?;
    require_mutable_goal(&txn, goal_id, owner_id).await?;

    let removed = AvoidedExpense::delete_many()
        .filter(avoided_expense::Column::GoalId.eq(goal_id))
        .exec(&txn)
        .await?;
    SavingsGoal::delete_by_id(goal_id).exec(&txn).await?;

    txn.commit().await?;

    info!(
        goal_id,
        avoided_expenses = removed.rows_affected,
        "Deleted savings goal"
    );
    Ok(())
}

/// Cancels an ACTIVE goal owned by `owner_id`. Cancelled goals are terminal.
#[instrument(skip(db))]
pub async fn cancel_goal(
    db: &DatabaseConnection,
    goal_id: i64,
    owner_id: i64,
) -> Result<savings_goal::Model> {
    let txn = db.begin().await?;

    require_user(&txn, owner_id).await?;
    let goal = require_mutable_goal(&txn, goal_id, owner_id).await?;

    let mut active_model: savings_goal::ActiveModel = goal.into();
    active_model.state = Set(GoalState::Cancelled);
    let result = active_model.update(&txn).await?;

    txn.commit().await?;

    info!(goal_id, "Cancelled savings goal");
    Ok(result)
}

/// Completes a goal once its avoided expenses reach the target.
///
/// Only ACTIVE goals transition. The write is conditional on the goal still being
/// ACTIVE, so when two callers race past the threshold exactly one of them performs
/// the transition. Calling this on a goal that is already COMPLETED (or CANCELLED,
/// or still short of its target) writes nothing and returns the goal unchanged.
///
/// Generic over the connection so [`crate::core::avoided::record_avoided_expense`]
/// can run it inside its own transaction.
pub async fn check_and_complete_goal<C>(db: &C, goal_id: i64) -> Result<savings_goal::Model>
where
    C: ConnectionTrait,
{
    let goal = require_goal(db, goal_id).await?;
    if goal.state != GoalState::Active {
        return Ok(goal);
    }

    let total_avoided = sum_avoided_expenses(db, goal_id).await?;
    if total_avoided < goal.target_amount {
        return Ok(goal);
    }

    let updated = SavingsGoal::update_many()
        .col_expr(
            savings_goal::Column::State,
            Expr::value(GoalState::Completed.to_value()),
        )
        .filter(savings_goal::Column::Id.eq(goal_id))
        .filter(savings_goal::Column::State.eq(GoalState::Active))
        .exec(db)
        .await?;

    if updated.rows_affected == 1 {
        info!(
            goal_id,
            total_avoided,
            target = goal.target_amount,
            "Savings goal completed"
        );
    }

    require_goal(db, goal_id).await
}

/// Runs [`check_and_complete_goal`] on every ACTIVE goal and returns the goals
/// that completed during this pass.
pub async fn reconcile_active_goals(db: &DatabaseConnection) -> Result<Vec<savings_goal::Model>> {
    let active = get_active_goals(db).await?;

    let mut completed = Vec::new();
    for goal in active {
        let checked = check_and_complete_goal(db, goal.id).await?;
        if checked.state == GoalState::Completed {
            completed.push(checked);
        }
    }

    Ok(completed)
}

/// Percentage of the target already saved: `total_avoided / target * 100`.
///
/// A non-positive target yields 0.0 rather than NaN or infinity.
#[must_use]
pub fn progress_percentage(total_avoided: f64, target_amount: f64) -> f64 {
    if target_amount <= 0.0 {
        return 0.0;
    }
    (total_avoided / target_amount) * 100.0
}

/// Whole calendar days from `today` until `end_date`; negative once it has passed.
#[must_use]
pub fn days_left(end_date: NaiveDate, today: NaiveDate) -> i64 {
    (end_date - today).num_days()
}

/// Amount that must be saved per remaining day to reach the target by `end_date`.
///
/// Returns 0.0 when no days are left. The remaining amount is not floored at zero,
/// so a goal already past its target yields a negative figure.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn daily_savings_needed(
    target_amount: f64,
    total_avoided: f64,
    end_date: NaiveDate,
    today: NaiveDate,
) -> f64 {
    let days = days_left(end_date, today);
    if days <= 0 {
        return 0.0;
    }
    (target_amount - total_avoided) / days as f64
}

/// Progress of a goal as a percentage of its target.
pub async fn calculate_progress_percentage(db: &DatabaseConnection, goal_id: i64) -> Result<f64> {
    let goal = require_goal(db, goal_id).await?;
    let total_avoided = sum_avoided_expenses(db, goal_id).await?;
    Ok(progress_percentage(total_avoided, goal.target_amount))
}

/// Amount that must be saved per day from today to reach the goal by its end date.
pub async fn calculate_daily_savings_needed(db: &DatabaseConnection, goal_id: i64) -> Result<f64> {
    let goal = require_goal(db, goal_id).await?;
    let total_avoided = sum_avoided_expenses(db, goal_id).await?;
    Ok(daily_savings_needed(
        goal.target_amount,
        total_avoided,
        goal.end_date,
        today(),
    ))
}
