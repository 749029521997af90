//! Core business logic - framework-agnostic goal, expense, and reporting operations.
//!
//! Every function takes the database connection explicitly and the caller's
//! identity as a plain `owner_id` argument; nothing here reads ambient session state.

/// Avoided-expense recording
pub mod avoided;
/// Expense logging and discretionary spending totals
pub mod expense;
/// Expense type catalogue
pub mod expense_type;
/// Savings goal lifecycle: validation, state transitions, and progress math
pub mod goal;
/// Goal summaries for the presentation layer
pub mod report;
/// User registration and lookup
pub mod user;

use chrono::{Local, NaiveDate};

/// Today's date in the local time zone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
