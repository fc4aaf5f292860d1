//! End-to-end sign-off chain tests through the public service API.

use rstest::rstest;
use signoff::workflow::{
    domain::{FormId, NotificationKind, TaskStatus},
    services::ApprovalError,
};

use super::helpers::{Harness, employee, harness, kpi_request_with_checker,
    kpi_request_without_checker};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_chain_owner_checker_approver(harness: Harness) -> eyre::Result<()> {
    let task = harness
        .service
        .create_task(kpi_request_with_checker(FormId::new()))
        .await?;

    let submitted = harness
        .service
        .start_workflow(task.id(), &employee("E1"), true)
        .await?;
    eyre::ensure!(submitted.task.status() == TaskStatus::PendingChecker);
    eyre::ensure!(submitted.event.recipients.to == vec![employee("E2")]);

    let checked = harness
        .service
        .record_decision(task.id(), &employee("E2"), true)
        .await?;
    eyre::ensure!(checked.is_approved);
    eyre::ensure!(checked.task.status() == TaskStatus::PendingApprover);
    eyre::ensure!(checked.task.checked_at().is_some());
    eyre::ensure!(checked.event.recipients.to == vec![employee("E3")]);

    let approved = harness
        .service
        .record_decision(task.id(), &employee("E3"), true)
        .await?;
    eyre::ensure!(approved.task.status() == TaskStatus::Done);
    eyre::ensure!(approved.task.approved_at().is_some());
    eyre::ensure!(approved.event.recipients.to == vec![employee("E1")]);

    let kinds: Vec<NotificationKind> = harness
        .dispatcher
        .events()?
        .iter()
        .map(|event| event.kind)
        .collect();
    eyre::ensure!(
        kinds
            == vec![
                NotificationKind::Started,
                NotificationKind::AwaitingApproval,
                NotificationKind::Completed,
            ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chain_without_checker_skips_straight_to_approver(harness: Harness) -> eyre::Result<()> {
    let task = harness
        .service
        .create_task(kpi_request_without_checker(FormId::new()))
        .await?;

    let submitted = harness
        .service
        .start_workflow(task.id(), &employee("E1"), true)
        .await?;
    eyre::ensure!(submitted.task.status() == TaskStatus::PendingApprover);
    eyre::ensure!(submitted.event.recipients.to == vec![employee("E3")]);

    let approved = harness
        .service
        .record_decision(task.id(), &employee("E3"), true)
        .await?;
    eyre::ensure!(approved.task.status() == TaskStatus::Done);
    eyre::ensure!(approved.task.checked_at().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_loop_returns_to_owner_and_back(harness: Harness) -> eyre::Result<()> {
    let task = harness
        .service
        .create_task(kpi_request_with_checker(FormId::new()))
        .await?;
    harness
        .service
        .start_workflow(task.id(), &employee("E1"), true)
        .await?;

    let rejected = harness
        .service
        .record_decision(task.id(), &employee("E2"), false)
        .await?;
    eyre::ensure!(!rejected.is_approved);
    eyre::ensure!(rejected.task.status() == TaskStatus::RejectedByChecker);
    eyre::ensure!(rejected.event.kind == NotificationKind::Rejected);
    eyre::ensure!(rejected.event.recipients.to == vec![employee("E1")]);

    let resubmitted = harness
        .service
        .start_workflow(task.id(), &employee("E1"), true)
        .await?;
    eyre::ensure!(resubmitted.task.status() == TaskStatus::PendingChecker);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_is_locked_for_every_role(harness: Harness) -> eyre::Result<()> {
    let task = harness
        .service
        .create_task(kpi_request_without_checker(FormId::new()))
        .await?;
    harness
        .service
        .start_workflow(task.id(), &employee("E1"), true)
        .await?;
    harness
        .service
        .record_decision(task.id(), &employee("E3"), true)
        .await?;

    for caller in ["E1", "E3"] {
        let result = harness
            .service
            .record_decision(task.id(), &employee(caller), false)
            .await;
        eyre::ensure!(matches!(result, Err(ApprovalError::Domain(_))));
    }

    let stored = harness.service.find_task(task.id()).await?;
    eyre::ensure!(stored.map(|t| t.status()) == Some(TaskStatus::Done));
    Ok(())
}
