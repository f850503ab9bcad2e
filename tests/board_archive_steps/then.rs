//! Then steps for board archive BDD scenarios.

use super::world::{BoardArchiveWorld, run_async};
use kanban_sync::board::domain::TaskId;
use rstest_bdd_macros::then;

#[then(r#"the archive holds task "{task_id}""#)]
fn archive_holds_task(world: &BoardArchiveWorld, task_id: String) -> Result<(), eyre::Report> {
    let archive = run_async(world.service.list_archived())?;
    let archived = archive
        .get(task_id.as_str())
        .ok_or_else(|| eyre::eyre!("task {task_id} is not archived"))?;
    eyre::ensure!(
        archived.archived_at().is_some(),
        "archived task {task_id} has no timestamp"
    );

    let board = run_async(world.service.list())?;
    eyre::ensure!(
        board.task(&TaskId::new(task_id.clone())).is_none(),
        "task {task_id} is still live"
    );
    Ok(())
}

#[then("the archive is empty")]
fn archive_is_empty(world: &BoardArchiveWorld) -> Result<(), eyre::Report> {
    let archive = run_async(world.service.list_archived())?;
    eyre::ensure!(archive.is_empty(), "archive holds {} tasks", archive.len());
    Ok(())
}

#[then(r#"column "{column_id}" lists "{task_ids}""#)]
fn column_lists(
    world: &BoardArchiveWorld,
    column_id: String,
    task_ids: String,
) -> Result<(), eyre::Report> {
    let board = run_async(world.service.list())?;
    let actual: Vec<&str> = board
        .columns
        .get(column_id.as_str())
        .ok_or_else(|| eyre::eyre!("column {column_id} is missing"))?
        .task_ids()
        .iter()
        .map(TaskId::as_str)
        .collect();
    let expected: Vec<&str> = task_ids.split(',').map(str::trim).collect();

    eyre::ensure!(
        actual == expected,
        "column {column_id} lists {actual:?}, expected {expected:?}"
    );
    Ok(())
}

#[then(r#"task "{task_id}" has status "{status}""#)]
fn task_has_status(
    world: &BoardArchiveWorld,
    task_id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let board = run_async(world.service.list())?;
    let task = board
        .task(&TaskId::new(task_id.clone()))
        .ok_or_else(|| eyre::eyre!("task {task_id} is not live"))?;
    eyre::ensure!(
        task.status().as_str() == status,
        "task {task_id} has status {}, expected {status}",
        task.status()
    );
    Ok(())
}

#[then(r#"the operation fails with "{code}""#)]
fn operation_fails_with(world: &BoardArchiveWorld, code: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no operation was attempted"))?;
    match result {
        Ok(task) => Err(eyre::eyre!("expected {code}, got task {}", task.id())),
        Err(err) if err.kind().as_str() == code => Ok(()),
        Err(err) => Err(eyre::eyre!("expected {code}, got {}: {err}", err.kind())),
    }
}
