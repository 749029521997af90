//! Goal report generation.
//!
//! Shapes savings goals into summary records carrying the derived figures a
//! presentation layer shows next to each goal: how much has been saved, the
//! percentage of the target reached, and what remains to be saved per day.
//! All functions are framework-agnostic and return plain serializable data.

use crate::{
    core::{
        goal::{
            days_left, daily_savings_needed, get_goals_for_user, get_goals_for_user_by_state,
            progress_percentage, require_goal, sum_avoided_expenses,
        },
        today,
        user::require_user,
    },
    entities::{GoalState, savings_goal, user},
    errors::Result,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// A savings goal together with its derived progress figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalSummary {
    /// Goal ID
    pub id: i64,
    /// Owning user ID
    pub user_id: i64,
    /// Owning user's display name
    pub owner_name: String,
    /// Goal name
    pub name: String,
    /// Amount to save
    pub target_amount: f64,
    /// First day of the saving period
    pub start_date: NaiveDate,
    /// Last day of the saving period
    pub end_date: NaiveDate,
    /// Lifecycle state
    pub state: GoalState,
    /// Discretionary spending in the month before the start date
    pub prior_period_ant_expense_total: f64,
    /// When the goal was created
    pub registered_at: DateTime<Utc>,
    /// Sum of avoided expenses recorded so far
    pub total_avoided: f64,
    /// `total_avoided` as a percentage of the target
    pub progress_percent: f64,
    /// Calendar days until the end date (negative once passed)
    pub days_left: i64,
    /// Amount to save per remaining day; 0.0 when no days are left
    pub daily_savings_needed: f64,
}

impl GoalSummary {
    /// Builds a summary from already-loaded records as of `today`.
    #[must_use]
    pub fn from_parts(
        goal: savings_goal::Model,
        owner: &user::Model,
        total_avoided: f64,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: goal.id,
            user_id: goal.user_id,
            owner_name: owner.name.clone(),
            progress_percent: progress_percentage(total_avoided, goal.target_amount),
            days_left: days_left(goal.end_date, today),
            daily_savings_needed: daily_savings_needed(
                goal.target_amount,
                total_avoided,
                goal.end_date,
                today,
            ),
            name: goal.name,
            target_amount: goal.target_amount,
            start_date: goal.start_date,
            end_date: goal.end_date,
            state: goal.state,
            prior_period_ant_expense_total: goal.prior_period_ant_expense_total,
            registered_at: goal.registered_at,
            total_avoided,
        }
    }
}

async fn summarize_all(
    db: &DatabaseConnection,
    owner: &user::Model,
    goals: Vec<savings_goal::Model>,
) -> Result<Vec<GoalSummary>> {
    let today = today();
    let mut summaries = Vec::with_capacity(goals.len());

    for goal in goals {
        let total_avoided = sum_avoided_expenses(db, goal.id).await?;
        summaries.push(GoalSummary::from_parts(goal, owner, total_avoided, today));
    }

    Ok(summaries)
}

/// Generates the summary of a single goal.
pub async fn get_goal_summary(db: &DatabaseConnection, goal_id: i64) -> Result<GoalSummary> {
    let goal = require_goal(db, goal_id).await?;
    let owner = require_user(db, goal.user_id).await?;
    let total_avoided = sum_avoided_expenses(db, goal_id).await?;

    Ok(GoalSummary::from_parts(goal, &owner, total_avoided, today()))
}

/// Generates summaries of every goal of a user, oldest first.
pub async fn get_goal_summaries_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<GoalSummary>> {
    let owner = require_user(db, user_id).await?;
    let goals = get_goals_for_user(db, user_id).await?;
    summarize_all(db, &owner, goals).await
}

/// Generates summaries of a user's ACTIVE goals, oldest first.
pub async fn get_active_goal_summaries_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<GoalSummary>> {
    let owner = require_user(db, user_id).await?;
    let goals = get_goals_for_user_by_state(db, user_id, GoalState::Active).await?;
    summarize_all(db, &owner, goals).await
}
