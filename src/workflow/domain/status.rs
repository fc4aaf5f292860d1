//! Task status: the sole discriminator for workflow authorization.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval status of a workflow task.
///
/// Exactly one status holds at any time. Authorization for every action is
/// a function of this status and the caller's resolved role alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task exists but the owner has not begun drafting.
    NotStarted,
    /// Owner is drafting the document.
    InDraft,
    /// Submitted; awaiting the checker's decision.
    PendingChecker,
    /// Checker rejected; back with the owner for rework.
    RejectedByChecker,
    /// Awaiting the approver's decision.
    PendingApprover,
    /// Approver rejected; back with the owner for rework.
    RejectedByApprover,
    /// Approved by the approver. Terminal: read-only for every role.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InDraft => "in_draft",
            Self::PendingChecker => "pending_checker",
            Self::RejectedByChecker => "rejected_by_checker",
            Self::PendingApprover => "pending_approver",
            Self::RejectedByApprover => "rejected_by_approver",
            Self::Done => "done",
        }
    }

    /// Returns `true` when no outgoing transition exists from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "not_started" => Ok(Self::NotStarted),
            "in_draft" => Ok(Self::InDraft),
            "pending_checker" => Ok(Self::PendingChecker),
            "rejected_by_checker" => Ok(Self::RejectedByChecker),
            "pending_approver" => Ok(Self::PendingApprover),
            "rejected_by_approver" => Ok(Self::RejectedByApprover),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
