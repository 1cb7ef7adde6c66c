//! Unified error type for booking and task operations.

use thiserror::Error;

/// Every failure an operation in this crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// A precondition on the caller's input was violated
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable reason, e.g. `"Invalid project ID."`
        message: String,
    },

    /// The deadline source has no project with this ID
    #[error("Project not found: {project_id}")]
    ProjectNotFound {
        /// The project that was looked up
        project_id: i64,
    },

    /// The time ledger has no task with this ID
    #[error("Task not found: {task_id}")]
    TaskNotFound {
        /// The task that was looked up
        task_id: i64,
    },

    /// The mail transport refused or failed to deliver a message
    #[error("Mail delivery failed: {message}")]
    Mail {
        /// Transport-specific reason
        message: String,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building an [`Error::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
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
    fn test_invalid_argument_display() {
        let err = Error::invalid("Invalid task ID.");
        assert_eq!(err.to_string(), "Invalid argument: Invalid task ID.");
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(
            Error::ProjectNotFound { project_id: 7 }.to_string(),
            "Project not found: 7"
        );
        assert_eq!(
            Error::TaskNotFound { task_id: 3 }.to_string(),
            "Task not found: 3"
        );
    }
}
