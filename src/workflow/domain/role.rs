//! Workflow roles and actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relationship a caller identity has to one specific task.
///
/// A role is per-task, not a global user attribute: the same employee may
/// be owner of their own task and approver of a subordinate's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The employee whose document is being evaluated; initiates submission.
    Owner,
    /// Optional intermediate reviewer before final approval.
    Checker,
    /// Final sign-off authority.
    Approver,
}

impl Role {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Checker => "checker",
            Self::Approver => "approver",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of access a role may exercise while a task is in a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Mutate the document or advance the workflow.
    Write,
    /// View the document and its workflow state.
    Read,
}
