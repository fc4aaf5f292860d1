//! Notification events emitted for committed workflow transitions.
//!
//! The workflow never talks to a mail transport. Each committed transition
//! is described by a [`NotificationEvent`] naming the kind of message and
//! its recipients; the surrounding application renders and delivers it.
//! Keeping delivery out of the transition path makes the state machine
//! testable without mocking an email service.

use super::{EmployeeId, Task, TaskId, Transition};
use serde::{Deserialize, Serialize};

/// Kind of message a committed transition should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The owner submitted; the next reviewer's turn has started.
    Started,
    /// The checker approved; the document awaits the approver.
    AwaitingApproval,
    /// The approver approved; the task is done.
    Completed,
    /// A reviewer rejected; the document is back with the owner.
    Rejected,
}

impl NotificationKind {
    /// Maps a committed transition to the message kind it should produce.
    #[must_use]
    pub const fn for_transition(transition: Transition) -> Self {
        match transition {
            Transition::Submitted => Self::Started,
            Transition::CheckerApproved => Self::AwaitingApproval,
            Transition::ApproverApproved => Self::Completed,
            Transition::CheckerRejected | Transition::ApproverRejected => Self::Rejected,
        }
    }
}

/// Primary and carbon-copy recipients of one notification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recipients {
    /// Primary recipients.
    pub to: Vec<EmployeeId>,
    /// Carbon-copy recipients.
    pub cc: Vec<EmployeeId>,
}

impl Recipients {
    /// Creates a recipient set.
    #[must_use]
    pub const fn new(to: Vec<EmployeeId>, cc: Vec<EmployeeId>) -> Self {
        Self { to, cc }
    }
}

/// Description of the notification a committed transition should fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Message kind.
    pub kind: NotificationKind,
    /// Task the transition was committed on.
    pub task_id: TaskId,
    /// Who should receive the message.
    pub recipients: Recipients,
}

/// Policy deriving recipient sets from a committed transition.
///
/// Recipient sets are organisational policy rather than a workflow
/// invariant, so they sit behind a trait; [`DefaultRecipientPolicy`]
/// matches the behaviour observed in the source application.
pub trait RecipientPolicy: Send + Sync {
    /// Returns the recipients for `transition`, given the task state
    /// *after* the transition was applied.
    fn recipients(&self, task: &Task, transition: Transition) -> Recipients;
}

/// Default recipient policy.
///
/// Submission notifies whoever the document is now waiting on, copying
/// the owner. Checker approval notifies the approver, copying the owner.
/// Completion notifies the owner, copying both reviewers. Rejections
/// notify the owner; a checker rejection also copies the approver.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRecipientPolicy;

impl RecipientPolicy for DefaultRecipientPolicy {
    fn recipients(&self, task: &Task, transition: Transition) -> Recipients {
        let owner = task.participants().owner().clone();
        let approver = task.participants().approver().clone();
        match transition {
            Transition::Submitted => Recipients::new(
                task.next_actor().cloned().into_iter().collect(),
                vec![owner],
            ),
            Transition::CheckerApproved => Recipients::new(vec![approver], vec![owner]),
            Transition::CheckerRejected => Recipients::new(vec![owner], vec![approver]),
            Transition::ApproverApproved => {
                let mut cc: Vec<EmployeeId> =
                    task.participants().checker().cloned().into_iter().collect();
                cc.push(approver);
                Recipients::new(vec![owner], cc)
            }
            Transition::ApproverRejected => Recipients::new(vec![owner], Vec::new()),
        }
    }
}
