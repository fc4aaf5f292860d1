//! Repository port for task persistence and status commits.

use crate::workflow::domain::{FormId, Period, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// `commit_transition` is the only write path for `status` and the
/// sign-off timestamps; it carries compare-and-swap semantics so that two
/// concurrent transition attempts on one task are serialized by the
/// backing store rather than silently last-write-wins.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists or [`TaskRepositoryError::DuplicatePeriod`] when the
    /// owning form already has a task for the same period.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks belonging to the given form, one per period.
    async fn find_by_form(&self, form_id: FormId) -> TaskRepositoryResult<Vec<Task>>;

    /// Persists a transitioned task, conditional on the stored status
    /// still being `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist and [`TaskRepositoryError::Conflict`] when a concurrent
    /// writer changed the status since it was read; the caller must
    /// reload and re-decide.
    async fn commit_transition(
        &self,
        task: &Task,
        expected: TaskStatus,
    ) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The form already has a task for this period.
    #[error("form {0} already has a task for period {1}")]
    DuplicatePeriod(FormId, Period),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A concurrent transition won the optimistic check.
    #[error("task {task_id} no longer in status {expected}; reload and retry")]
    Conflict {
        /// Task the losing writer attempted to commit.
        task_id: TaskId,
        /// Status the losing writer expected to find.
        expected: TaskStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
