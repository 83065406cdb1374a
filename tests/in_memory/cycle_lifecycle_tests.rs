//! In-memory integration tests for first cycles and completion chains.

use super::helpers::{Harness, daily_task, harness, harness_at};
use crate::test_helpers::instant;
use cadence::cycle::domain::{CycleResolution, CycleState, Task};
use cadence::recurrence::{DateType, RecurrencePattern, WeekOfMonth};
use chrono::Weekday;
use mockable::Clock;
use rstest::rstest;

/// Completes the current cycle at its due date, `rounds` times, returning the
/// due dates of the cycles created along the way.
async fn complete_on_due_date(
    harness: &Harness,
    task: &Task,
    rounds: usize,
) -> Result<Vec<chrono::DateTime<chrono::Utc>>, eyre::Report> {
    let mut dues = Vec::with_capacity(rounds);
    for _ in 0..rounds {
        let current = harness
            .service
            .current_cycle(task.id())
            .await?
            .ok_or_else(|| eyre::eyre!("expected an open cycle"))?;
        harness.clock.set(&current.due_date().to_rfc3339());
        let outcome = harness.service.complete_cycle(task, current).await?;
        let next = outcome
            .next
            .ok_or_else(|| eyre::eyre!("auto-restart should create a cycle"))?;
        dues.push(next.due_date());
    }
    Ok(dues)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn month_end_anchor_clamps_and_recovers() -> Result<(), eyre::Report> {
    let harness = harness_at("2024-01-31T08:00:00Z");
    let task = Task::new("Pay rent", RecurrencePattern::monthly_on_day(1, 31)?);
    let first = harness.service.start_first_cycle(&task, None).await?;
    eyre::ensure!(first.due_date() == instant("2024-02-29T08:00:00Z"));

    let dues = complete_on_due_date(&harness, &task, 2).await?;
    eyre::ensure!(
        dues == vec![
            instant("2024-03-31T08:00:00Z"),
            instant("2024-04-30T08:00:00Z"),
        ],
        "got {dues:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lunar_yearly_task_follows_spring_festival() -> Result<(), eyre::Report> {
    let harness = harness_at("2024-02-10T00:00:00Z");
    let task = Task::new("Spring Festival", RecurrencePattern::yearly(1)?)
        .with_date_type(DateType::Lunar);
    let first = harness.service.start_first_cycle(&task, None).await?;
    eyre::ensure!(first.date_type() == DateType::Lunar);
    eyre::ensure!(first.due_date() == instant("2025-01-29T00:00:00Z"));

    let dues = complete_on_due_date(&harness, &task, 1).await?;
    eyre::ensure!(dues == vec![instant("2026-02-17T00:00:00Z")], "got {dues:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_keeps_every_cycle_in_creation_order(
    harness: Harness,
    daily_task: Task,
) -> Result<(), eyre::Report> {
    harness.service.start_first_cycle(&daily_task, None).await?;
    complete_on_due_date(&harness, &daily_task, 3).await?;

    let history = harness.service.cycle_history(daily_task.id()).await?;
    eyre::ensure!(history.len() == 4, "got {} cycles", history.len());
    eyre::ensure!(history.windows(2).all(|pair| match pair {
        [earlier, later] => earlier.created_at() <= later.created_at(),
        _ => false,
    }));

    let (open, closed): (Vec<_>, Vec<_>) = history.iter().partition(|c| !c.is_completed());
    eyre::ensure!(open.len() == 1);
    eyre::ensure!(closed
        .iter()
        .all(|cycle| cycle.resolution() == Some(CycleResolution::Completed)));

    let current = harness.service.current_cycle(daily_task.id()).await?;
    eyre::ensure!(current.as_ref() == history.last());
    eyre::ensure!(harness.repository.cycle_count()? == 4);
    eyre::ensure!(harness.scheduler.scheduled()?.len() == 4);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn past_due_first_cycle_is_saved_without_notification(
    harness: Harness,
    daily_task: Task,
) -> Result<(), eyre::Report> {
    let cycle = harness
        .service
        .start_first_cycle(&daily_task, Some(instant("2024-06-01T12:00:00Z")))
        .await?;

    eyre::ensure!(cycle.id().is_some());
    eyre::ensure!(cycle.state(harness.clock.utc()) == CycleState::Overdue);
    eyre::ensure!(harness.scheduler.scheduled()?.is_empty());

    let refreshed = harness.service.refresh_overdue(cycle).await?;
    eyre::ensure!(refreshed.is_overdue());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn week_of_month_task_lands_on_thanksgiving(harness: Harness) -> Result<(), eyre::Report> {
    let task = Task::new(
        "Thanksgiving dinner",
        RecurrencePattern::week_of_month(11, WeekOfMonth::Fourth, Weekday::Thu)?,
    );
    let cycle = harness.service.start_first_cycle(&task, None).await?;
    eyre::ensure!(cycle.due_date() == instant("2024-11-28T12:00:00Z"));

    let scheduled = harness.scheduler.scheduled()?;
    let fire_at: Vec<_> = scheduled.iter().map(|n| n.fire_at).collect();
    eyre::ensure!(fire_at == vec![cycle.due_date()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn next_cycle_preview_matches_completion(
    harness: Harness,
    daily_task: Task,
) -> Result<(), eyre::Report> {
    let first = harness.service.start_first_cycle(&daily_task, None).await?;
    let preview = harness.service.get_next_cycle(&daily_task, None)?;
    let outcome = harness.service.complete_cycle(&daily_task, first).await?;
    let next = outcome
        .next
        .ok_or_else(|| eyre::eyre!("auto-restart should create a cycle"))?;

    eyre::ensure!(preview.id().is_none());
    eyre::ensure!(preview.start_date() == next.start_date());
    eyre::ensure!(preview.due_date() == next.due_date());
    eyre::ensure!(
        harness.service.preview_due_date(&daily_task, None) == next.due_date()
    );
    Ok(())
}
