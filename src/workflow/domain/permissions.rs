//! Static permission matrix mapping (status, role) to allowed actions.

use super::{Action, Role, TaskStatus};
use serde::{Deserialize, Serialize};

/// Action set granted to one role under one task status.
///
/// Returned to UI callers so form controls can be gated without a second
/// round trip after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    /// Whether the role may mutate the document or advance the workflow.
    pub write: bool,
    /// Whether the role may view the document.
    pub read: bool,
}

impl Permissions {
    const READ_ONLY: Self = Self {
        write: false,
        read: true,
    };
    const READ_WRITE: Self = Self {
        write: true,
        read: true,
    };

    /// Returns `true` when the given action is in this set.
    #[must_use]
    pub const fn allows(self, action: Action) -> bool {
        match action {
            Action::Write => self.write,
            Action::Read => self.read,
        }
    }
}

/// Returns the actions a role may perform while a task is in `status`.
///
/// Total over both enums and side-effect free: every declared combination
/// grants at least read access, and no combination panics. The turn-taking
/// structure of the sign-off chain lives entirely in this table: whichever
/// party the document is currently with holds the only write grant.
#[must_use]
pub const fn permitted_actions(status: TaskStatus, role: Role) -> Permissions {
    use TaskStatus as S;
    match role {
        Role::Owner => match status {
            S::NotStarted | S::InDraft | S::RejectedByChecker | S::RejectedByApprover => {
                Permissions::READ_WRITE
            }
            S::PendingChecker | S::PendingApprover | S::Done => Permissions::READ_ONLY,
        },
        Role::Checker => match status {
            S::PendingChecker => Permissions::READ_WRITE,
            _ => Permissions::READ_ONLY,
        },
        Role::Approver => match status {
            S::PendingApprover => Permissions::READ_WRITE,
            _ => Permissions::READ_ONLY,
        },
    }
}

/// Returns `true` iff every requested action is permitted for `role` while
/// the task is in `status`.
#[must_use]
pub fn can_perform(role: Role, actions: &[Action], status: TaskStatus) -> bool {
    let granted = permitted_actions(status, role);
    actions.iter().all(|action| granted.allows(*action))
}
