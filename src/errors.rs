//! Unified error type for the savings-goal domain.
//!
//! Every fallible operation in the crate returns [`Result`]. Domain failures carry
//! enough context for the calling layer to build a user-facing message, and
//! [`Error::kind`] collapses them into the coarse categories an API layer maps
//! to response codes.

use crate::entities::savings_goal::GoalState;
use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable was missing or malformed
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Referenced user does not exist
    #[error("User not found: {id}")]
    UserNotFound {
        /// Requested user ID
        id: i64,
    },

    /// Referenced savings goal does not exist
    #[error("Savings goal not found: {id}")]
    GoalNotFound {
        /// Requested goal ID
        id: i64,
    },

    /// Referenced expense type does not exist
    #[error("Expense type not found: {id}")]
    ExpenseTypeNotFound {
        /// Requested expense type ID
        id: i64,
    },

    /// Referenced expense does not exist
    #[error("Expense not found: {id}")]
    ExpenseNotFound {
        /// Requested expense ID
        id: i64,
    },

    /// Amount is zero, negative, or not a finite number
    #[error("Invalid amount: {amount} (must be a positive number)")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Any other malformed input (blank text, bad dates, duplicates)
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input
        message: String,
    },

    /// Goal target is larger than the discretionary spending it is based on
    #[error(
        "Target amount {target:.2} exceeds the ant expense total of the previous period ({baseline:.2})"
    )]
    TargetExceedsBaseline {
        /// Requested target
        target: f64,
        /// Discretionary spending in the month before the goal starts
        baseline: f64,
    },

    /// Essential expense types cannot be logged as avoided
    #[error("Expense type '{name}' is essential and cannot be recorded as avoided")]
    EssentialExpenseType {
        /// Name of the rejected expense type
        name: String,
    },

    /// Operation requires an ACTIVE goal
    #[error("Savings goal {goal_id} is {state}; only ACTIVE goals can be changed")]
    InvalidState {
        /// Goal the operation targeted
        goal_id: i64,
        /// Its current state
        state: GoalState,
    },

    /// Caller does not own the record
    #[error("User {user_id} does not own {resource} {id}")]
    PermissionDenied {
        /// Kind of record, e.g. "savings goal"
        resource: &'static str,
        /// ID of the record the operation targeted
        id: i64,
        /// Caller identity
        user_id: i64,
    },
}

/// Coarse error categories exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced record is absent
    NotFound,
    /// Input failed validation
    InvalidArgument,
    /// Goal is not in a state that allows the operation
    InvalidState,
    /// Caller is not the owner
    PermissionDenied,
    /// Infrastructure failure (database, configuration, environment)
    Internal,
}

impl Error {
    /// Classifies this error for the calling layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound { .. }
            | Self::GoalNotFound { .. }
            | Self::ExpenseTypeNotFound { .. }
            | Self::ExpenseNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidAmount { .. }
            | Self::InvalidArgument { .. }
            | Self::TargetExceedsBaseline { .. }
            | Self::EssentialExpenseType { .. } => ErrorKind::InvalidArgument,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::Database(_) | Self::Config { .. } | Self::Io(_) | Self::EnvVar(_) => {
                ErrorKind::Internal
            }
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(Error::GoalNotFound { id: 1 }.kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::InvalidAmount { amount: -1.0 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            Error::TargetExceedsBaseline {
                target: 10.0,
                baseline: 5.0
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            Error::InvalidState {
                goal_id: 1,
                state: GoalState::Completed
            }
            .kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(
            Error::PermissionDenied {
                resource: "savings goal",
                id: 1,
                user_id: 2
            }
            .kind(),
            ErrorKind::PermissionDenied
        );
        assert_eq!(
            Error::Config {
                message: "bad".to_string()
            }
            .kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_error_messages_include_context() {
        let err = Error::InvalidState {
            goal_id: 7,
            state: GoalState::Cancelled,
        };
        assert_eq!(
            err.to_string(),
            "Savings goal 7 is CANCELLED; only ACTIVE goals can be changed"
        );

        let err = Error::TargetExceedsBaseline {
            target: 200.0,
            baseline: 150.0,
        };
        assert!(err.to_string().contains("200.00"));
        assert!(err.to_string().contains("150.00"));

        let err = Error::PermissionDenied {
            resource: "expense",
            id: 4,
            user_id: 9,
        };
        assert_eq!(err.to_string(), "User 9 does not own expense 4");
    }
}
