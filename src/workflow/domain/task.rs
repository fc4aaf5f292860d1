//! Task aggregate root: one document's sign-off chain for one period.

use super::{
    Action, DocumentKind, EmployeeId, FormId, Period, Role, TaskId, TaskStatus,
    WorkflowDomainError, permitted_actions,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Identities of the three sign-off parties on a task.
///
/// Immutable after creation. The checker stage is optional: a task without
/// a checker goes straight from submission to the approver. Pairwise
/// distinctness of the identities is deliberately not enforced; see
/// [`Participants::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participants {
    owner: EmployeeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    checker: Option<EmployeeId>,
    approver: EmployeeId,
}

impl Participants {
    /// Creates a participant triple.
    ///
    /// Overlapping identities (e.g. an employee approving their own task)
    /// are accepted: senior ranks self-approve in the source organisation,
    /// and role resolution handles overlap by fixed precedence.
    #[must_use]
    pub const fn new(owner: EmployeeId, checker: Option<EmployeeId>, approver: EmployeeId) -> Self {
        Self {
            owner,
            checker,
            approver,
        }
    }

    /// Returns the owner identity.
    #[must_use]
    pub const fn owner(&self) -> &EmployeeId {
        &self.owner
    }

    /// Returns the checker identity, if a checker stage exists.
    #[must_use]
    pub const fn checker(&self) -> Option<&EmployeeId> {
        self.checker.as_ref()
    }

    /// Returns the approver identity.
    #[must_use]
    pub const fn approver(&self) -> &EmployeeId {
        &self.approver
    }
}

/// Committed workflow transition, identifying which stage acted and how.
///
/// Returned by the transition operations so callers can derive the
/// notification that should fire without re-inspecting status deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Owner submitted the document for review.
    Submitted,
    /// Checker approved; the document moved on to the approver.
    CheckerApproved,
    /// Checker rejected; the document returned to the owner.
    CheckerRejected,
    /// Approver approved; the task is done.
    ApproverApproved,
    /// Approver rejected; the document returned to the owner.
    ApproverRejected,
}

impl Transition {
    /// Returns `true` for the approving decisions (including submission).
    #[must_use]
    pub const fn is_approval(self) -> bool {
        !matches!(self, Self::CheckerRejected | Self::ApproverRejected)
    }
}

/// Task aggregate root.
///
/// Owns the status field and the two sign-off timestamps; the transition
/// methods are the only code that mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    form_id: FormId,
    kind: DocumentKind,
    period: Period,
    participants: Participants,
    status: TaskStatus,
    checked_at: Option<DateTime<Utc>>,
    approved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning form identifier.
    pub form_id: FormId,
    /// Persisted document kind.
    pub kind: DocumentKind,
    /// Persisted evaluation period.
    pub period: Period,
    /// Persisted participant identities.
    pub participants: Participants,
    /// Persisted approval status.
    pub status: TaskStatus,
    /// Persisted checker sign-off timestamp, if any.
    pub checked_at: Option<DateTime<Utc>>,
    /// Persisted approver sign-off timestamp, if any.
    pub approved_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the document kind's initial status.
    #[must_use]
    pub fn new(
        form_id: FormId,
        kind: DocumentKind,
        period: Period,
        participants: Participants,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            form_id,
            kind,
            period,
            participants,
            status: kind.initial_status(),
            checked_at: None,
            approved_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            form_id: data.form_id,
            kind: data.kind,
            period: data.period,
            participants: data.participants,
            status: data.status,
            checked_at: data.checked_at,
            approved_at: data.approved_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning form identifier.
    #[must_use]
    pub const fn form_id(&self) -> FormId {
        self.form_id
    }

    /// Returns the document kind.
    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Returns the evaluation period this task covers.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Returns the participant identities.
    #[must_use]
    pub const fn participants(&self) -> &Participants {
        &self.participants
    }

    /// Returns the current approval status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the checker sign-off timestamp, set exactly once on the
    /// first checker approval. `None` when the task has no checker or the
    /// checker has not yet approved.
    #[must_use]
    pub const fn checked_at(&self) -> Option<DateTime<Utc>> {
        self.checked_at
    }

    /// Returns the approver sign-off timestamp, set exactly once on
    /// approval. `None` until the task reaches [`TaskStatus::Done`].
    #[must_use]
    pub const fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Resolves the caller's role on this task.
    ///
    /// Precedence is owner, then checker (only when a checker is
    /// assigned), then approver; the first matching identity wins. Returns
    /// `None` when the caller matches no participant, which calling code
    /// must treat as no access.
    #[must_use]
    pub fn role_of(&self, caller: &EmployeeId) -> Option<Role> {
        if caller == &self.participants.owner {
            Some(Role::Owner)
        } else if self.participants.checker.as_ref() == Some(caller) {
            Some(Role::Checker)
        } else if caller == &self.participants.approver {
            Some(Role::Approver)
        } else {
            None
        }
    }

    /// Returns the identity the document is currently waiting on, if the
    /// task is in a pending stage.
    #[must_use]
    pub fn next_actor(&self) -> Option<&EmployeeId> {
        match self.status {
            TaskStatus::PendingChecker => self.participants.checker(),
            TaskStatus::PendingApprover => Some(self.participants.approver()),
            _ => None,
        }
    }

    /// Submits the document for review on behalf of `caller`.
    ///
    /// Moves the task to [`TaskStatus::PendingChecker`], or directly to
    /// [`TaskStatus::PendingApprover`] when no checker is assigned. Leaves
    /// both sign-off timestamps untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::NotAuthorized`] when the caller does
    /// not resolve to a role holding the write grant in the current status
    /// (pending stages and `Done` for the owner, everything else for the
    /// reviewers), and [`WorkflowDomainError::InvalidTransition`] when a
    /// reviewer whose turn it is invokes submission instead of a decision.
    pub fn submit(
        &mut self,
        caller: &EmployeeId,
        clock: &impl Clock,
    ) -> Result<Transition, WorkflowDomainError> {
        let role = self.authorize_write(caller)?;
        if role != Role::Owner {
            return Err(self.invalid_transition());
        }
        self.status = if self.participants.checker.is_some() {
            TaskStatus::PendingChecker
        } else {
            TaskStatus::PendingApprover
        };
        self.touch(clock);
        Ok(Transition::Submitted)
    }

    /// Records the current stage's decision on behalf of `caller`.
    ///
    /// The stage is dispatched from the current status: the checker acts
    /// in [`TaskStatus::PendingChecker`], the approver in
    /// [`TaskStatus::PendingApprover`]. Approvals advance the chain and
    /// stamp the stage's sign-off timestamp on its first approval only;
    /// rejections return the document to the owner without touching
    /// timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::NotAuthorized`] when the caller's
    /// role does not hold the write grant for the current status, and
    /// [`WorkflowDomainError::InvalidTransition`] when the caller holds
    /// the write grant but no decision stage exists in the current status
    /// (the owner's drafting and rejected states).
    pub fn decide(
        &mut self,
        caller: &EmployeeId,
        approved: bool,
        clock: &impl Clock,
    ) -> Result<Transition, WorkflowDomainError> {
        let role = self.authorize_write(caller)?;
        let transition = match (self.status, role) {
            (TaskStatus::PendingChecker, Role::Checker) => {
                if approved {
                    self.status = TaskStatus::PendingApprover;
                    if self.checked_at.is_none() {
                        self.checked_at = Some(clock.utc());
                    }
                    Transition::CheckerApproved
                } else {
                    self.status = TaskStatus::RejectedByChecker;
                    Transition::CheckerRejected
                }
            }
            (TaskStatus::PendingApprover, Role::Approver) => {
                if approved {
                    self.status = TaskStatus::Done;
                    if self.approved_at.is_none() {
                        self.approved_at = Some(clock.utc());
                    }
                    Transition::ApproverApproved
                } else {
                    self.status = TaskStatus::RejectedByApprover;
                    Transition::ApproverRejected
                }
            }
            // The write grant is already established, so any other
            // combination is a write-holder with no decision stage: the
            // owner in a drafting or rejected state.
            _ => return Err(self.invalid_transition()),
        };
        self.touch(clock);
        Ok(transition)
    }

    /// Resolves the caller's role and checks the write grant, without
    /// mutating anything.
    fn authorize_write(&self, caller: &EmployeeId) -> Result<Role, WorkflowDomainError> {
        let role = self.role_of(caller).ok_or_else(|| self.not_authorized())?;
        if !permitted_actions(self.status, role).allows(Action::Write) {
            return Err(self.not_authorized());
        }
        Ok(role)
    }

    const fn not_authorized(&self) -> WorkflowDomainError {
        WorkflowDomainError::NotAuthorized {
            task_id: self.id,
            status: self.status,
        }
    }

    const fn invalid_transition(&self) -> WorkflowDomainError {
        WorkflowDomainError::InvalidTransition {
            task_id: self.id,
            status: self.status,
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
