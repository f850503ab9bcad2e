//! When steps for board archive BDD scenarios.

use super::world::{BoardArchiveWorld, run_async};
use kanban_sync::board::domain::TaskId;
use rstest_bdd_macros::when;

#[when(r#"task "{task_id}" is archived"#)]
fn archive_task(world: &mut BoardArchiveWorld, task_id: String) {
    let result = run_async(world.service.archive(&TaskId::new(task_id)));
    world.last_result = Some(result);
}

#[when(r#"task "{task_id}" is restored"#)]
fn restore_task(world: &mut BoardArchiveWorld, task_id: String) {
    let result = run_async(world.service.restore(&TaskId::new(task_id)));
    world.last_result = Some(result);
}
