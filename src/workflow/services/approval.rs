//! Service layer orchestrating transitions, persistence, and notification.

use crate::workflow::{
    domain::{
        DefaultRecipientPolicy, DocumentKind, EmployeeId, FormId, NotificationEvent,
        NotificationKind, Participants, Period, Permissions, RecipientPolicy, Role, Task, TaskId,
        TaskStatus, Transition, WorkflowDomainError, permitted_actions,
    },
    ports::{
        NotificationDeliveryError, NotificationDispatcher, TaskRepository, TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a workflow task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    form_id: FormId,
    kind: DocumentKind,
    period: Period,
    owner: String,
    checker: Option<String>,
    approver: String,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields and no checker stage.
    #[must_use]
    pub fn new(
        form_id: FormId,
        kind: DocumentKind,
        period: Period,
        owner: impl Into<String>,
        approver: impl Into<String>,
    ) -> Self {
        Self {
            form_id,
            kind,
            period,
            owner: owner.into(),
            checker: None,
            approver: approver.into(),
        }
    }

    /// Adds an intermediate checker stage.
    #[must_use]
    pub fn with_checker(mut self, checker: impl Into<String>) -> Self {
        self.checker = Some(checker.into());
        self
    }
}

/// Service-level errors for approval workflow operations.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// Domain validation or authorization failed.
    #[error(transparent)]
    Domain(#[from] WorkflowDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for approval service operations.
pub type ApprovalResult<T> = Result<T, ApprovalError>;

/// Outcome of a committed `start_workflow` call.
///
/// `delivery` reports the best-effort notification outcome; a `Err` there
/// never implies the transition was rolled back.
#[derive(Debug)]
pub struct TransitionReceipt {
    /// The task as committed, carrying the new status.
    pub task: Task,
    /// The notification event derived from the transition.
    pub event: NotificationEvent,
    /// Delivery outcome from the dispatcher.
    pub delivery: Result<(), NotificationDeliveryError>,
}

/// Outcome of a committed `record_decision` call.
#[derive(Debug)]
pub struct DecisionReceipt {
    /// The task as committed, carrying the new status.
    pub task: Task,
    /// The notification event derived from the transition.
    pub event: NotificationEvent,
    /// Delivery outcome from the dispatcher.
    pub delivery: Result<(), NotificationDeliveryError>,
    /// Whether the recorded decision was an approval.
    pub is_approved: bool,
}

/// Approval workflow orchestration service.
///
/// Every transition loads the task fresh, authorizes against the loaded
/// (persisted) status, applies the domain transition, and commits it with
/// a compare-and-swap keyed on that loaded status. Notification dispatch
/// runs only after the commit succeeds.
#[derive(Clone)]
pub struct ApprovalService<R, N, C, P = DefaultRecipientPolicy>
where
    R: TaskRepository,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
    P: RecipientPolicy,
{
    repository: Arc<R>,
    dispatcher: Arc<N>,
    clock: Arc<C>,
    policy: P,
}

impl<R, N, C> ApprovalService<R, N, C>
where
    R: TaskRepository,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default recipient policy.
    #[must_use]
    pub const fn new(repository: Arc<R>, dispatcher: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            repository,
            dispatcher,
            clock,
            policy: DefaultRecipientPolicy,
        }
    }
}

impl<R, N, C, P> ApprovalService<R, N, C, P>
where
    R: TaskRepository,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
    P: RecipientPolicy,
{
    /// Creates a service with a custom recipient policy.
    #[must_use]
    pub const fn with_policy(
        repository: Arc<R>,
        dispatcher: Arc<N>,
        clock: Arc<C>,
        policy: P,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            clock,
            policy,
        }
    }

    /// Returns the permission set for a role under a status.
    ///
    /// Read-only lookup used by UI code to gate controls; identical to the
    /// matrix consulted by the transition operations.
    #[must_use]
    pub const fn permissions(role: Role, status: TaskStatus) -> Permissions {
        permitted_actions(status, role)
    }

    /// Creates and persists a new task in its document kind's initial
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Domain`] when an identity fails validation
    /// and [`ApprovalError::Repository`] when the form already has a task
    /// for the period.
    pub async fn create_task(&self, request: CreateTaskRequest) -> ApprovalResult<Task> {
        let owner = EmployeeId::new(request.owner)?;
        let checker = request.checker.map(EmployeeId::new).transpose()?;
        let approver = EmployeeId::new(request.approver)?;
        let participants = Participants::new(owner, checker, approver);

        let task = Task::new(
            request.form_id,
            request.kind,
            request.period,
            participants,
            &*self.clock,
        );
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Repository`] when the lookup fails.
    pub async fn find_task(&self, id: TaskId) -> ApprovalResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns all of a form's tasks, one per evaluation period.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Repository`] when the lookup fails.
    pub async fn tasks_for_form(&self, form_id: FormId) -> ApprovalResult<Vec<Task>> {
        Ok(self.repository.find_by_form(form_id).await?)
    }

    /// Submits the document for review on behalf of `caller`.
    ///
    /// `form_is_saved` is the caller-supplied precondition that the form's
    /// latest edits are persisted; the workflow does not track it itself.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::FormNotSaved`] before any other
    /// check when `form_is_saved` is false,
    /// [`TaskRepositoryError::NotFound`] when the task does not exist,
    /// [`WorkflowDomainError::NotAuthorized`] when the caller may not
    /// submit in the current status, and [`TaskRepositoryError::Conflict`]
    /// when a concurrent transition won the commit.
    pub async fn start_workflow(
        &self,
        task_id: TaskId,
        caller: &EmployeeId,
        form_is_saved: bool,
    ) -> ApprovalResult<TransitionReceipt> {
        if !form_is_saved {
            return Err(WorkflowDomainError::FormNotSaved(task_id).into());
        }

        let mut task = self.load(task_id).await?;
        let expected = task.status();
        let transition = task.submit(caller, &*self.clock)?;
        self.repository.commit_transition(&task, expected).await?;

        let event = self.event_for(&task, transition);
        let delivery = self.dispatch(&event).await;
        Ok(TransitionReceipt {
            task,
            event,
            delivery,
        })
    }

    /// Records the current stage's decision on behalf of `caller`.
    ///
    /// The stage (checker or approver) is dispatched from the task's
    /// persisted status, so the same operation serves both review steps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, [`WorkflowDomainError::NotAuthorized`] when the caller does
    /// not hold the acting stage's write grant,
    /// [`WorkflowDomainError::InvalidTransition`] when no decision stage
    /// exists in the current status, and [`TaskRepositoryError::Conflict`]
    /// when a concurrent transition won the commit.
    pub async fn record_decision(
        &self,
        task_id: TaskId,
        caller: &EmployeeId,
        approved: bool,
    ) -> ApprovalResult<DecisionReceipt> {
        let mut task = self.load(task_id).await?;
        let expected = task.status();
        let transition = task.decide(caller, approved, &*self.clock)?;
        self.repository.commit_transition(&task, expected).await?;

        let event = self.event_for(&task, transition);
        let delivery = self.dispatch(&event).await;
        Ok(DecisionReceipt {
            task,
            event,
            delivery,
            is_approved: transition.is_approval(),
        })
    }

    async fn load(&self, task_id: TaskId) -> ApprovalResult<Task> {
        let task = self.repository.find_by_id(task_id).await?;
        task.ok_or_else(|| TaskRepositoryError::NotFound(task_id).into())
    }

    fn event_for(&self, task: &Task, transition: Transition) -> NotificationEvent {
        NotificationEvent {
            kind: NotificationKind::for_transition(transition),
            task_id: task.id(),
            recipients: self.policy.recipients(task, transition),
        }
    }

    /// Best-effort dispatch. Failures are logged and surfaced on the
    /// receipt, never as the operation's error: the transition is already
    /// durably committed and must not appear rolled back because of a
    /// mail-delivery fault.
    async fn dispatch(&self, event: &NotificationEvent) -> Result<(), NotificationDeliveryError> {
        match self.dispatcher.dispatch(event).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(
                    task_id = %event.task_id,
                    kind = ?event.kind,
                    error = %err,
                    "notification dispatch failed after committed transition",
                );
                Err(err)
            }
        }
    }
}
