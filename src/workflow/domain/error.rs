//! Error types for workflow domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned by domain constructors and transition operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowDomainError {
    /// The caller's resolved role lacks write permission for the task's
    /// current status, or the caller holds no role on the task at all.
    #[error("caller is not authorized to act on task {task_id} in status {status}")]
    NotAuthorized {
        /// Task the caller attempted to act on.
        task_id: TaskId,
        /// Status the task held when authorization was evaluated.
        status: TaskStatus,
    },

    /// No transition of the requested kind exists from the current status.
    #[error("no valid transition from status {status} on task {task_id}")]
    InvalidTransition {
        /// Task the transition was attempted on.
        task_id: TaskId,
        /// Status the task held when the transition was attempted.
        status: TaskStatus,
    },

    /// The owner attempted to start the workflow before saving the form.
    #[error("form for task {0} has unsaved changes; save before submitting")]
    FormNotSaved(TaskId),

    /// An employee identifier is empty after trimming.
    #[error("employee identifier must not be empty")]
    EmptyEmployeeId,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing evaluation periods from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown evaluation period: {0}")]
pub struct ParsePeriodError(pub String);

/// Error returned while parsing document kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown document kind: {0}")]
pub struct ParseDocumentKindError(pub String);
