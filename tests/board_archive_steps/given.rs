//! Given steps for board archive BDD scenarios.

use super::world::{BoardArchiveWorld, run_async};
use eyre::WrapErr;
use kanban_sync::board::{domain::TaskId, ports::BoardStore};
use rstest_bdd_macros::given;
use serde_json::json;

#[given(r#"the board has task "{task_id}" in column "{column_id}""#)]
fn board_has_task(
    world: &mut BoardArchiveWorld,
    task_id: String,
    column_id: String,
) -> Result<(), eyre::Report> {
    let payload = json!({
        "id": task_id,
        "title": format!("Task {task_id}"),
        "description": "",
        "priority": "medium",
        "status": column_id,
        "dueDate": null
    });
    run_async(world.service.create(&payload)).wrap_err("create task for archive scenario")?;
    Ok(())
}

#[given(r#"task "{task_id}" has been archived"#)]
fn task_has_been_archived(
    world: &mut BoardArchiveWorld,
    task_id: String,
) -> Result<(), eyre::Report> {
    run_async(world.service.archive(&TaskId::new(task_id)))
        .wrap_err("archive task in scenario setup")?;
    Ok(())
}

#[given(r#"column "{column_id}" has been removed"#)]
fn column_has_been_removed(
    world: &mut BoardArchiveWorld,
    column_id: String,
) -> Result<(), eyre::Report> {
    let mut columns =
        run_async(world.store.load_columns()).wrap_err("load columns in scenario setup")?;
    if columns.shift_remove(column_id.as_str()).is_none() {
        return Err(eyre::eyre!("column {column_id} is not on the board"));
    }
    run_async(world.store.save_columns(&columns)).wrap_err("save columns in scenario setup")?;
    Ok(())
}
