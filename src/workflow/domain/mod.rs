//! Domain model for the approval workflow.
//!
//! The workflow domain models role-gated status transitions for a single
//! document task, recipient derivation for transition notifications, and
//! the static permission matrix consulted by both the transition logic and
//! read-only UI gating, while keeping all infrastructure concerns outside
//! of the domain boundary.

mod error;
mod event;
mod ids;
mod period;
mod permissions;
mod role;
mod status;
mod task;

pub use error::{
    ParseDocumentKindError, ParsePeriodError, ParseTaskStatusError, WorkflowDomainError,
};
pub use event::{
    DefaultRecipientPolicy, NotificationEvent, NotificationKind, RecipientPolicy, Recipients,
};
pub use ids::{EmployeeId, FormId, TaskId};
pub use period::{DocumentKind, Period};
pub use permissions::{Permissions, can_perform, permitted_actions};
pub use role::{Action, Role};
pub use status::TaskStatus;
pub use task::{Participants, PersistedTaskData, Task, Transition};
