//! When steps for overdue remediation scenarios.

use super::world::{OverdueWorld, run_async};
use cadence::cycle::domain::OverdueAction;
use rstest_bdd_macros::when;

#[when(r#"the overdue cycle is handled with "{action}""#)]
fn handle_overdue(world: &mut OverdueWorld, action: String) -> Result<(), eyre::Report> {
    let action = OverdueAction::try_from(action.as_str())
        .map_err(|err| eyre::eyre!("invalid action in scenario: {err}"))?;
    let task = world
        .task
        .clone()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let cycle = world
        .overdue_cycle
        .clone()
        .ok_or_else(|| eyre::eyre!("missing overdue cycle in scenario world"))?;

    world.last_outcome = Some(run_async(world.service.handle_overdue(&task, cycle, action)));
    Ok(())
}
