//! Unit tests for the approval workflow.

mod role_tests;

use crate::workflow::domain::{
    DocumentKind, EmployeeId, FormId, Participants, Period, Task, WorkflowDomainError,
};
use mockable::DefaultClock;

/// Builds a validated employee identifier for tests.
pub(crate) fn employee(id: &str) -> Result<EmployeeId, WorkflowDomainError> {
    EmployeeId::new(id)
}

/// Builds a KPI draft task owned by `E1`, checked by `E2`, approved by
/// `E3`.
pub(crate) fn kpi_task_with_checker() -> Result<Task, WorkflowDomainError> {
    let participants =
        Participants::new(employee("E1")?, Some(employee("E2")?), employee("E3")?);
    Ok(Task::new(
        FormId::new(),
        DocumentKind::Kpi,
        Period::Draft,
        participants,
        &DefaultClock,
    ))
}

/// Builds a KPI draft task with no checker stage.
pub(crate) fn kpi_task_without_checker() -> Result<Task, WorkflowDomainError> {
    let participants = Participants::new(employee("E1")?, None, employee("E3")?);
    Ok(Task::new(
        FormId::new(),
        DocumentKind::Kpi,
        Period::Draft,
        participants,
        &DefaultClock,
    ))
}
