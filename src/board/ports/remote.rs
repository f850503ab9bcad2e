//! Port through which a client session reaches the board server.

use crate::board::domain::{ArchiveMap, Board, BoardErrorKind, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote board operations.
pub type BoardRemoteResult<T> = Result<T, BoardRemoteError>;

/// Server operations used by a [`BoardSession`].
///
/// [`BoardSession`]: crate::board::services::BoardSession
#[async_trait]
pub trait BoardRemote: Send + Sync {
    /// Fetches the reconciled board.
    async fn fetch_board(&self) -> BoardRemoteResult<Board>;

    /// Fetches the archived tasks.
    async fn fetch_archived(&self) -> BoardRemoteResult<ArchiveMap>;

    /// Pushes the whole board as the authoritative snapshot.
    async fn push_board(&self, board: &Board) -> BoardRemoteResult<()>;

    /// Creates a task and returns the stored record.
    async fn create_task(&self, task: &Task) -> BoardRemoteResult<Task>;

    /// Replaces an existing task and returns the stored record.
    async fn update_task(&self, task: &Task) -> BoardRemoteResult<Task>;

    /// Archives a task and returns the archived record.
    async fn archive_task(&self, task_id: &TaskId) -> BoardRemoteResult<Task>;

    /// Restores an archived task and returns the live record.
    async fn restore_task(&self, task_id: &TaskId) -> BoardRemoteResult<Task>;

    /// Permanently deletes a task.
    async fn delete_task(&self, task_id: &TaskId) -> BoardRemoteResult<()>;
}

/// Errors returned by board remote implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRemoteError {
    /// The server processed the request and refused it.
    #[error("server rejected request ({kind}): {message}")]
    Rejected {
        /// Failure category reported by the server.
        kind: BoardErrorKind,
        /// Human-readable message from the server.
        message: String,
    },

    /// The request did not complete.
    #[error("transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The server answered with a body that could not be understood.
    #[error("unexpected response: {0}")]
    Protocol(String),
}

impl BoardRemoteError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns the server-reported failure category, if the server answered.
    #[must_use]
    pub const fn kind(&self) -> Option<BoardErrorKind> {
        match self {
            Self::Rejected { kind, .. } => Some(*kind),
            Self::Transport(_) | Self::Protocol(_) => None,
        }
    }
}
