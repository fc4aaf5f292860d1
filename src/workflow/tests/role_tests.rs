//! Tests for role resolution on a task.

use super::{employee, kpi_task_with_checker, kpi_task_without_checker};
use crate::workflow::domain::{DocumentKind, FormId, Participants, Period, Role, Task};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
fn distinct_identities_each_resolve_to_one_role() -> eyre::Result<()> {
    let task = kpi_task_with_checker()?;

    ensure!(task.role_of(&employee("E1")?) == Some(Role::Owner));
    ensure!(task.role_of(&employee("E2")?) == Some(Role::Checker));
    ensure!(task.role_of(&employee("E3")?) == Some(Role::Approver));
    Ok(())
}

#[rstest]
fn unrelated_identity_resolves_to_none() -> eyre::Result<()> {
    let task = kpi_task_with_checker()?;
    ensure!(task.role_of(&employee("E9")?).is_none());
    Ok(())
}

#[rstest]
fn missing_checker_stage_never_resolves_checker() -> eyre::Result<()> {
    let task = kpi_task_without_checker()?;

    ensure!(task.role_of(&employee("E2")?).is_none());
    ensure!(task.role_of(&employee("E3")?) == Some(Role::Approver));
    Ok(())
}

#[rstest]
fn owner_wins_when_identities_overlap() -> eyre::Result<()> {
    // Self-approval is permitted; precedence must still be deterministic.
    let participants = Participants::new(employee("E1")?, Some(employee("E1")?), employee("E1")?);
    let task = Task::new(
        FormId::new(),
        DocumentKind::Merit,
        Period::Evaluation,
        participants,
        &DefaultClock,
    );

    ensure!(task.role_of(&employee("E1")?) == Some(Role::Owner));
    Ok(())
}

#[rstest]
fn checker_wins_over_approver_when_reviewers_overlap() -> eyre::Result<()> {
    let participants = Participants::new(employee("E1")?, Some(employee("E2")?), employee("E2")?);
    let task = Task::new(
        FormId::new(),
        DocumentKind::Merit,
        Period::Evaluation,
        participants,
        &DefaultClock,
    );

    ensure!(task.role_of(&employee("E2")?) == Some(Role::Checker));
    Ok(())
}
