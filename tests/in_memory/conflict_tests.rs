//! Optimistic-concurrency tests for status commits.

use rstest::rstest;
use signoff::workflow::{
    domain::{FormId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
    services::ApprovalError,
};

use super::helpers::{Harness, employee, harness, kpi_request_with_checker};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_expected_status_is_rejected_as_conflict(harness: Harness) -> eyre::Result<()> {
    let task = harness
        .service
        .create_task(kpi_request_with_checker(FormId::new()))
        .await?;
    harness
        .service
        .start_workflow(task.id(), &employee("E1"), true)
        .await?;

    // A writer that still believes the task is in draft must lose.
    let stale = harness
        .service
        .find_task(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    let result = harness
        .repository
        .commit_transition(&stale, TaskStatus::InDraft)
        .await;

    eyre::ensure!(matches!(
        result,
        Err(TaskRepositoryError::Conflict {
            expected: TaskStatus::InDraft,
            ..
        })
    ));
    let stored = harness.service.find_task(task.id()).await?;
    eyre::ensure!(stored.map(|t| t.status()) == Some(TaskStatus::PendingChecker));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_decisions_have_exactly_one_winner(harness: Harness) -> eyre::Result<()> {
    let task = harness
        .service
        .create_task(kpi_request_with_checker(FormId::new()))
        .await?;
    harness
        .service
        .start_workflow(task.id(), &employee("E1"), true)
        .await?;

    let checker = employee("E2");
    let (first, second) = tokio::join!(
        harness.service.record_decision(task.id(), &checker, true),
        harness.service.record_decision(task.id(), &checker, true),
    );

    let successes = usize::from(first.is_ok()) + usize::from(second.is_ok());
    eyre::ensure!(successes == 1, "exactly one writer must win");

    // The loser either lost the compare-and-swap or re-read the already
    // advanced status and was denied the write grant.
    for result in [first, second] {
        if let Err(err) = result {
            eyre::ensure!(matches!(
                err,
                ApprovalError::Repository(TaskRepositoryError::Conflict { .. })
                    | ApprovalError::Domain(_)
            ));
        }
    }

    let stored = harness.service.find_task(task.id()).await?;
    eyre::ensure!(stored.map(|t| t.status()) == Some(TaskStatus::PendingApprover));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conflicting_writer_can_retry_against_fresh_state(harness: Harness) -> eyre::Result<()> {
    let task = harness
        .service
        .create_task(kpi_request_with_checker(FormId::new()))
        .await?;
    harness
        .service
        .start_workflow(task.id(), &employee("E1"), true)
        .await?;
    harness
        .service
        .record_decision(task.id(), &employee("E2"), true)
        .await?;

    // After reloading, the approver's intended transition is still valid
    // against the fresh status and succeeds.
    let receipt = harness
        .service
        .record_decision(task.id(), &employee("E3"), true)
        .await?;
    eyre::ensure!(receipt.task.status() == TaskStatus::Done);
    Ok(())
}
