//! Given steps for overdue remediation scenarios.

use super::world::{OverdueWorld, SCENARIO_NOW, run_async};
use crate::test_helpers::instant;
use cadence::{cycle::domain::Task, recurrence::RecurrencePattern};
use chrono::TimeDelta;
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn scenario_task(world: &OverdueWorld) -> Result<Task, eyre::Report> {
    world
        .task
        .clone()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
}

#[given("a daily task")]
fn daily_task(world: &mut OverdueWorld) -> Result<(), eyre::Report> {
    let pattern = RecurrencePattern::daily(1).wrap_err("build daily pattern")?;
    world.task = Some(Task::new("Water the garden", pattern));
    Ok(())
}

#[given("the task does not restart automatically")]
fn task_without_auto_restart(world: &mut OverdueWorld) -> Result<(), eyre::Report> {
    world.task = Some(scenario_task(world)?.with_auto_restart(false));
    Ok(())
}

#[given("the task is inactive")]
fn task_is_inactive(world: &mut OverdueWorld) -> Result<(), eyre::Report> {
    world.task = Some(scenario_task(world)?.with_active(false));
    Ok(())
}

#[given("the task has a cycle that fell due {days:i64} days ago")]
fn cycle_fell_due(world: &mut OverdueWorld, days: i64) -> Result<(), eyre::Report> {
    let task = scenario_task(world)?;
    let elapsed = TimeDelta::try_days(days.saturating_add(1))
        .ok_or_else(|| eyre::eyre!("day offset {days} is out of range"))?;
    let start = instant(SCENARIO_NOW) - elapsed;
    let cycle = run_async(world.service.start_first_cycle(&task, Some(start)))
        .wrap_err("start overdue cycle")?;
    world.overdue_cycle = Some(cycle);
    Ok(())
}
