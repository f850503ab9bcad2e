//! Request handlers for the board API.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use mockable::Clock;
use serde::Serialize;
use serde_json::Value;

use super::ApiError;
use crate::board::{
    domain::{ArchiveMap, Board, Task, TaskId},
    ports::BoardStore,
    services::{BoardService, BulkUpdateRequest},
};

/// Body carrying only a confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Confirmation text.
    pub message: &'static str,
}

/// Body returned by the archive endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveResponse {
    /// Confirmation text.
    pub message: &'static str,
    /// The archived record.
    pub archived_task: Task,
}

/// Body returned by the restore endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResponse {
    /// Confirmation text.
    pub message: &'static str,
    /// The live record.
    pub restored_task: Task,
}

/// Body returned by the archive listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedTasksResponse {
    /// Archived tasks keyed by id.
    pub archived_tasks: ArchiveMap,
}

type ServiceState<S, C> = State<BoardService<S, C>>;

pub(super) async fn list_tasks<S, C>(
    State(service): ServiceState<S, C>,
) -> Result<Json<Board>, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(service.list().await?))
}

pub(super) async fn list_archived<S, C>(
    State(service): ServiceState<S, C>,
) -> Result<Json<ArchivedTasksResponse>, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let archived_tasks = service.list_archived().await?;
    Ok(Json(ArchivedTasksResponse { archived_tasks }))
}

pub(super) async fn bulk_update<S, C>(
    State(service): ServiceState<S, C>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload.map_err(|rejection| ApiError::invalid_update_body(&rejection))?;
    let request = BulkUpdateRequest::from_json(&body)?;
    service.bulk_update(request).await?;
    Ok(Json(MessageResponse {
        message: "Board updated successfully",
    }))
}

pub(super) async fn create_task<S, C>(
    State(service): ServiceState<S, C>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload.map_err(|rejection| ApiError::invalid_task_body(&rejection))?;
    let task = service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub(super) async fn update_task<S, C>(
    State(service): ServiceState<S, C>,
    Path(task_id): Path<TaskId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Task>, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload.map_err(|rejection| ApiError::invalid_task_body(&rejection))?;
    Ok(Json(service.update(&task_id, &body).await?))
}

pub(super) async fn archive_task<S, C>(
    State(service): ServiceState<S, C>,
    Path(task_id): Path<TaskId>,
) -> Result<Json<ArchiveResponse>, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let archived_task = service.archive(&task_id).await?;
    Ok(Json(ArchiveResponse {
        message: "Task archived successfully",
        archived_task,
    }))
}

pub(super) async fn restore_task<S, C>(
    State(service): ServiceState<S, C>,
    Path(task_id): Path<TaskId>,
) -> Result<Json<RestoreResponse>, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let restored_task = service.restore(&task_id).await?;
    Ok(Json(RestoreResponse {
        message: "Task restored successfully",
        restored_task,
    }))
}

pub(super) async fn delete_task<S, C>(
    State(service): ServiceState<S, C>,
    Path(task_id): Path<TaskId>,
) -> Result<Json<MessageResponse>, ApiError>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    service.delete(&task_id).await?;
    Ok(Json(MessageResponse {
        message: "Task deleted",
    }))
}
