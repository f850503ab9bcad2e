//! In-process remote calling a [`BoardService`] directly.

use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;

use crate::board::{
    domain::{ArchiveMap, Board, Task, TaskId},
    ports::{BoardRemote, BoardRemoteError, BoardRemoteResult, BoardStore},
    services::{BoardService, BoardServiceError, BulkUpdateRequest},
};

impl From<BoardServiceError> for BoardRemoteError {
    fn from(err: BoardServiceError) -> Self {
        Self::Rejected {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// [`BoardRemote`] backed by a service in the same process.
#[derive(Clone)]
pub struct ServiceRemote<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    service: BoardService<S, C>,
}

impl<S, C> ServiceRemote<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Wraps `service`.
    #[must_use]
    pub const fn new(service: BoardService<S, C>) -> Self {
        Self { service }
    }

    /// Returns the wrapped service.
    #[must_use]
    pub const fn service(&self) -> &BoardService<S, C> {
        &self.service
    }
}

fn to_payload(task: &Task) -> BoardRemoteResult<Value> {
    serde_json::to_value(task).map_err(|err| BoardRemoteError::Protocol(err.to_string()))
}

#[async_trait]
impl<S, C> BoardRemote for ServiceRemote<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    async fn fetch_board(&self) -> BoardRemoteResult<Board> {
        Ok(self.service.list().await?)
    }

    async fn fetch_archived(&self) -> BoardRemoteResult<ArchiveMap> {
        Ok(self.service.list_archived().await?)
    }

    async fn push_board(&self, board: &Board) -> BoardRemoteResult<()> {
        self.service
            .bulk_update(BulkUpdateRequest::from_board(board.clone()))
            .await?;
        Ok(())
    }

    async fn create_task(&self, task: &Task) -> BoardRemoteResult<Task> {
        let payload = to_payload(task)?;
        Ok(self.service.create(&payload).await?)
    }

    async fn update_task(&self, task: &Task) -> BoardRemoteResult<Task> {
        let payload = to_payload(task)?;
        Ok(self.service.update(task.id(), &payload).await?)
    }

    async fn archive_task(&self, task_id: &TaskId) -> BoardRemoteResult<Task> {
        Ok(self.service.archive(task_id).await?)
    }

    async fn restore_task(&self, task_id: &TaskId) -> BoardRemoteResult<Task> {
        Ok(self.service.restore(task_id).await?)
    }

    async fn delete_task(&self, task_id: &TaskId) -> BoardRemoteResult<()> {
        Ok(self.service.delete(task_id).await?)
    }
}
