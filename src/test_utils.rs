//! Shared test utilities for `ant-savings`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        expense, expense_type,
        goal::{self, GoalFields},
        today, user,
    },
    entities,
    errors::Result,
};
use chrono::{Duration, NaiveDate};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user named "Test User" with the given email.
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user::Model> {
    user::create_user(db, "Test User".to_string(), email.to_string()).await
}

/// Creates a test expense type.
pub async fn create_test_expense_type(
    db: &DatabaseConnection,
    name: &str,
    is_essential: bool,
) -> Result<entities::expense_type::Model> {
    expense_type::create_expense_type(db, name.to_string(), None, is_essential).await
}

/// Creates a test expense with description `"Test expense"`.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    user_id: i64,
    expense_type_id: i64,
    amount: f64,
    spent_on: NaiveDate,
) -> Result<entities::expense::Model> {
    expense::create_expense(
        db,
        user_id,
        expense_type_id,
        amount,
        "Test expense".to_string(),
        spent_on,
    )
    .await
}

/// A database with one user, one discretionary and one essential expense type.
pub struct TestContext {
    /// Database connection
    pub db: DatabaseConnection,
    /// Owner of everything created through this context
    pub user: entities::user::Model,
    /// Discretionary ("Coffee") expense type
    pub discretionary: entities::expense_type::Model,
    /// Essential ("Rent") expense type
    pub essential: entities::expense_type::Model,
}

/// Sets up a test environment where the user spent `ant_spending` on coffee
/// ten days ago, so any goal starting today has that amount as its snapshot.
pub async fn setup_with_ant_spending(ant_spending: f64) -> Result<TestContext> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "saver@example.com").await?;
    let discretionary = create_test_expense_type(&db, "Coffee", false).await?;
    let essential = create_test_expense_type(&db, "Rent", true).await?;

    create_test_expense(
        &db,
        user.id,
        discretionary.id,
        ant_spending,
        today() - Duration::days(10),
    )
    .await?;

    Ok(TestContext {
        db,
        user,
        discretionary,
        essential,
    })
}

/// Creates an ACTIVE goal for the context user starting today and ending in 30 days.
pub async fn create_test_goal(
    ctx: &TestContext,
    target_amount: f64,
) -> Result<entities::savings_goal::Model> {
    goal::create_goal(
        &ctx.db,
        ctx.user.id,
        GoalFields {
            name: "Test goal".to_string(),
            target_amount,
            start_date: Some(today()),
            end_date: Some(today() + Duration::days(30)),
        },
    )
    .await
}

/// Inserts an avoided expense row directly, without running the completion check.
/// Use this to set up totals for testing the check itself.
pub async fn insert_avoided_expense_row(
    ctx: &TestContext,
    goal_id: i64,
    amount: f64,
) -> Result<entities::avoided_expense::Model> {
    let row = entities::avoided_expense::ActiveModel {
        goal_id: Set(goal_id),
        expense_type_id: Set(ctx.discretionary.id),
        amount: Set(amount),
        description: Set("Test avoided expense".to_string()),
        evidence_ref: Set(None),
        recorded_on: Set(today()),
        ..Default::default()
    };

    Ok(row.insert(&ctx.db).await?)
}
