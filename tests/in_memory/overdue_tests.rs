//! In-memory integration tests for overdue remediation.

use super::helpers::{Harness, daily_task, harness, harness_at};
use crate::test_helpers::instant;
use cadence::cycle::{
    domain::{CycleDomainError, CycleResolution, OverdueAction, Task, TaskCycle},
    services::CycleLifecycleError,
};
use cadence::recurrence::{DateType, RecurrencePattern};
use rstest::rstest;

/// Starts a cycle that fell due on 2024-06-11, four days before the harness
/// clock.
async fn overdue_cycle(harness: &Harness, task: &Task) -> Result<TaskCycle, eyre::Report> {
    let cycle = harness
        .service
        .start_first_cycle(task, Some(instant("2024-06-10T12:00:00Z")))
        .await?;
    Ok(cycle)
}

#[rstest]
#[case(OverdueAction::Reset, "2024-06-15T12:00:00Z", "2024-06-16T12:00:00Z")]
#[case(OverdueAction::Continue, "2024-06-11T12:00:00Z", "2024-06-12T12:00:00Z")]
#[case(OverdueAction::Skip, "2024-06-15T12:00:00Z", "2024-06-16T12:00:00Z")]
#[tokio::test(flavor = "multi_thread")]
async fn each_action_starts_the_next_cycle_at_its_anchor(
    harness: Harness,
    daily_task: Task,
    #[case] action: OverdueAction,
    #[case] expected_start: &str,
    #[case] expected_due: &str,
) -> Result<(), eyre::Report> {
    let cycle = overdue_cycle(&harness, &daily_task).await?;
    let outcome = harness
        .service
        .handle_overdue(&daily_task, cycle, action)
        .await?;

    eyre::ensure!(outcome.next.start_date() == instant(expected_start));
    eyre::ensure!(outcome.next.due_date() == instant(expected_due));
    eyre::ensure!(outcome.next.id().is_some());
    eyre::ensure!(!outcome.next.is_completed());
    eyre::ensure!(harness.repository.cycle_count()? == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reset_closes_the_old_cycle_and_notifies_the_new_one(
    harness: Harness,
    daily_task: Task,
) -> Result<(), eyre::Report> {
    let cycle = overdue_cycle(&harness, &daily_task).await?;
    let outcome = harness
        .service
        .handle_overdue(&daily_task, cycle, OverdueAction::Reset)
        .await?;

    eyre::ensure!(outcome.closed.is_overdue());
    eyre::ensure!(outcome.closed.is_completed());
    eyre::ensure!(outcome.closed.resolution() == Some(CycleResolution::Reset));

    let scheduled = harness.scheduler.scheduled()?;
    let cycle_ids: Vec<_> = scheduled.iter().map(|n| n.cycle_id).collect();
    eyre::ensure!(cycle_ids == vec![outcome.next.id()], "got {cycle_ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn continue_advances_a_single_period_even_when_far_behind(
    daily_task: Task,
) -> Result<(), eyre::Report> {
    let harness = harness_at("2024-07-01T12:00:00Z");
    let cycle = overdue_cycle(&harness, &daily_task).await?;
    let outcome = harness
        .service
        .handle_overdue(&daily_task, cycle, OverdueAction::Continue)
        .await?;

    eyre::ensure!(outcome.next.start_date() == instant("2024-06-11T12:00:00Z"));
    eyre::ensure!(outcome.next.due_date() == instant("2024-06-12T12:00:00Z"));
    eyre::ensure!(outcome.next.due_date() < instant("2024-07-01T12:00:00Z"));
    eyre::ensure!(outcome.closed.resolution() == Some(CycleResolution::Continued));
    eyre::ensure!(harness.scheduler.scheduled()?.is_empty());

    let current = harness.service.current_cycle(daily_task.id()).await?;
    eyre::ensure!(current.as_ref() == Some(&outcome.next));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn continue_keeps_lunar_month_boundaries() -> Result<(), eyre::Report> {
    let harness = harness_at("2024-06-15T12:00:00Z");
    let task = Task::new("Offerings", RecurrencePattern::monthly(1)?).with_date_type(DateType::Lunar);
    let cycle = harness
        .service
        .start_first_cycle(&task, Some(instant("2024-02-10T12:00:00Z")))
        .await?;
    eyre::ensure!(cycle.due_date() == instant("2024-03-10T12:00:00Z"));

    let outcome = harness
        .service
        .handle_overdue(&task, cycle, OverdueAction::Continue)
        .await?;
    eyre::ensure!(outcome.next.date_type() == DateType::Lunar);
    eyre::ensure!(outcome.next.due_date() == instant("2024-04-09T12:00:00Z"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn skip_records_a_skipped_resolution_without_auto_restart(
    harness: Harness,
    daily_task: Task,
) -> Result<(), eyre::Report> {
    let task = daily_task.with_auto_restart(false);
    let cycle = overdue_cycle(&harness, &task).await?;
    let outcome = harness
        .service
        .handle_overdue(&task, cycle, OverdueAction::Skip)
        .await?;

    eyre::ensure!(outcome.closed.is_completed());
    eyre::ensure!(outcome.closed.resolution() == Some(CycleResolution::Skipped));
    eyre::ensure!(outcome.closed.completed_date() == Some(instant("2024-06-15T12:00:00Z")));
    eyre::ensure!(outcome.next.start_date() == instant("2024-06-15T12:00:00Z"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn skipping_a_completed_cycle_is_rejected(
    harness: Harness,
    daily_task: Task,
) -> Result<(), eyre::Report> {
    let cycle = overdue_cycle(&harness, &daily_task).await?;
    let outcome = harness.service.complete_cycle(&daily_task, cycle).await?;
    let result = harness
        .service
        .handle_overdue(&daily_task, outcome.completed, OverdueAction::Skip)
        .await;

    eyre::ensure!(matches!(
        result,
        Err(CycleLifecycleError::Domain(CycleDomainError::AlreadyCompleted(_)))
    ));
    eyre::ensure!(harness.repository.cycle_count()? == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inactive_tasks_cannot_be_remediated(
    harness: Harness,
    daily_task: Task,
) -> Result<(), eyre::Report> {
    let cycle = overdue_cycle(&harness, &daily_task).await?;
    let paused = daily_task.with_active(false);
    let result = harness
        .service
        .handle_overdue(&paused, cycle, OverdueAction::Reset)
        .await;

    eyre::ensure!(matches!(result, Err(CycleLifecycleError::InactiveTask(id)) if id == paused.id()));
    eyre::ensure!(harness.repository.cycle_count()? == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cycles_of_other_tasks_are_rejected(
    harness: Harness,
    daily_task: Task,
) -> Result<(), eyre::Report> {
    let cycle = overdue_cycle(&harness, &daily_task).await?;
    let other = Task::new("Water plants", RecurrencePattern::daily(2)?);
    let result = harness
        .service
        .handle_overdue(&other, cycle, OverdueAction::Continue)
        .await;

    eyre::ensure!(matches!(
        result,
        Err(CycleLifecycleError::CycleTaskMismatch { .. })
    ));
    eyre::ensure!(harness.repository.cycle_count()? == 1);
    Ok(())
}

#[rstest]
#[case(OverdueAction::Reset)]
#[case(OverdueAction::Continue)]
#[case(OverdueAction::Skip)]
#[tokio::test(flavor = "multi_thread")]
async fn remediating_the_same_cycle_twice_is_rejected(
    harness: Harness,
    daily_task: Task,
    #[case] action: OverdueAction,
) -> Result<(), eyre::Report> {
    let cycle = overdue_cycle(&harness, &daily_task).await?;
    let first = harness
        .service
        .handle_overdue(&daily_task, cycle, action)
        .await?;
    let scheduled_before = harness.scheduler.scheduled()?.len();

    let second = harness
        .service
        .handle_overdue(&daily_task, first.closed, action)
        .await;

    eyre::ensure!(matches!(
        second,
        Err(CycleLifecycleError::Domain(CycleDomainError::AlreadyCompleted(_)))
    ));
    eyre::ensure!(harness.repository.cycle_count()? == 2);
    eyre::ensure!(harness.scheduler.scheduled()?.len() == scheduled_before);

    let history = harness.service.cycle_history(daily_task.id()).await?;
    let open: Vec<_> = history.iter().filter(|c| !c.is_completed()).collect();
    eyre::ensure!(open == vec![&first.next], "open cycles: {open:?}");
    Ok(())
}
