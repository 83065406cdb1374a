//! Then steps for overdue remediation scenarios.

use super::world::{OverdueWorld, SCENARIO_NOW};
use crate::test_helpers::instant;
use cadence::cycle::{domain::CycleResolution, services::CycleLifecycleError};
use rstest_bdd_macros::then;

#[then(r#"the old cycle is flagged overdue and closed as "{resolution}""#)]
fn old_cycle_superseded(world: &OverdueWorld, resolution: String) -> Result<(), eyre::Report> {
    let closed = &world.outcome()?.closed;
    let recorded = closed.resolution().map(CycleResolution::as_str);
    if !closed.is_overdue() || !closed.is_completed() || recorded != Some(resolution.as_str()) {
        return Err(eyre::eyre!(
            "expected an overdue cycle closed as {resolution}, got {closed:?}"
        ));
    }
    Ok(())
}

#[then("the old cycle is recorded as skipped")]
fn old_cycle_skipped(world: &OverdueWorld) -> Result<(), eyre::Report> {
    let closed = &world.outcome()?.closed;
    if closed.resolution() != Some(CycleResolution::Skipped) || !closed.is_completed() {
        return Err(eyre::eyre!("expected a skipped cycle, got {closed:?}"));
    }
    Ok(())
}

#[then("the new cycle starts now")]
fn new_cycle_starts_now(world: &OverdueWorld) -> Result<(), eyre::Report> {
    let next = &world.outcome()?.next;
    if next.start_date() != instant(SCENARIO_NOW) {
        return Err(eyre::eyre!("expected start at {SCENARIO_NOW}, got {}", next.start_date()));
    }
    Ok(())
}

#[then("the new cycle starts at the old due date")]
fn new_cycle_starts_at_old_due(world: &OverdueWorld) -> Result<(), eyre::Report> {
    let outcome = world.outcome()?;
    if outcome.next.start_date() != outcome.closed.due_date() {
        return Err(eyre::eyre!(
            "expected start at {}, got {}",
            outcome.closed.due_date(),
            outcome.next.start_date()
        ));
    }
    Ok(())
}

#[then("the new cycle is already overdue")]
fn new_cycle_already_overdue(world: &OverdueWorld) -> Result<(), eyre::Report> {
    let next = &world.outcome()?.next;
    if next.due_date() >= instant(SCENARIO_NOW) {
        return Err(eyre::eyre!("expected a past due date, got {}", next.due_date()));
    }
    Ok(())
}

#[then("a notification is scheduled for the new cycle")]
fn notification_scheduled(world: &OverdueWorld) -> Result<(), eyre::Report> {
    let next_id = world.outcome()?.next.id();
    let scheduled = world
        .scheduler
        .scheduled()
        .map_err(|err| eyre::eyre!("read scheduled notifications: {err}"))?;
    if !scheduled.iter().any(|notification| notification.cycle_id == next_id) {
        return Err(eyre::eyre!("no notification for {next_id:?} in {scheduled:?}"));
    }
    Ok(())
}

#[then("no notification is scheduled")]
fn no_notification_scheduled(world: &OverdueWorld) -> Result<(), eyre::Report> {
    let scheduled = world
        .scheduler
        .scheduled()
        .map_err(|err| eyre::eyre!("read scheduled notifications: {err}"))?;
    if !scheduled.is_empty() {
        return Err(eyre::eyre!("expected no notifications, got {scheduled:?}"));
    }
    Ok(())
}

#[then("remediation fails because the task is inactive")]
fn remediation_rejected(world: &OverdueWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing remediation result in scenario world"))?;
    if !matches!(result, Err(CycleLifecycleError::InactiveTask(_))) {
        return Err(eyre::eyre!("expected an inactive task error, got {result:?}"));
    }
    Ok(())
}

#[then("the task still has {count:usize} cycle")]
fn cycle_count(world: &OverdueWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world
        .repository
        .cycle_count()
        .map_err(|err| eyre::eyre!("count stored cycles: {err}"))?;
    if stored != count {
        return Err(eyre::eyre!("expected {count} stored cycles, found {stored}"));
    }
    Ok(())
}
