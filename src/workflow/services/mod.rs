//! Application services for approval workflow orchestration.

mod approval;

pub use approval::{
    ApprovalError, ApprovalResult, ApprovalService, CreateTaskRequest, DecisionReceipt,
    TransitionReceipt,
};
