//! Client-side board session with optimistic updates.

use crate::board::{
    domain::{
        ArchiveMap, Board, Column, ColumnId, DragGesture, FALLBACK_COLUMN, ReorderError, Task,
        TaskDraft, TaskId, TaskValidationError, compute_reorder, home_column,
        remove_from_orderings,
    },
    ports::{BoardRemote, BoardRemoteError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors returned by [`BoardSession`] commands.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// Draft fields failed validation.
    #[error(transparent)]
    InvalidTask(#[from] TaskValidationError),

    /// The drag gesture does not fit the board.
    #[error(transparent)]
    Reorder(#[from] ReorderError),

    /// No live task has the id.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// No archived task has the id.
    #[error("unknown archived task: {0}")]
    UnknownArchivedTask(TaskId),

    /// No column has the id.
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// A column with the id already exists.
    #[error("column already exists: {0}")]
    DuplicateColumn(ColumnId),

    /// A column field is blank after trimming.
    #[error("column {0} must not be empty")]
    EmptyColumnField(&'static str),

    /// The server refused or could not be reached; local state was rolled
    /// back.
    #[error("sync failed: {0}")]
    Sync(#[from] BoardRemoteError),
}

/// Result type for session commands.
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone)]
struct Snapshot {
    board: Board,
    archive: ArchiveMap,
}

/// Local copy of the board kept in step with a [`BoardRemote`].
///
/// Each command validates its input, applies the change locally, then
/// syncs it. When the sync fails the local board and archive are restored
/// to what they were before the command, whatever the command.
pub struct BoardSession<R>
where
    R: BoardRemote,
{
    remote: Arc<R>,
    board: Board,
    archive: ArchiveMap,
}

impl<R> BoardSession<R>
where
    R: BoardRemote,
{
    /// Creates a session with an empty local board.
    #[must_use]
    pub fn new(remote: Arc<R>) -> Self {
        Self {
            remote,
            board: Board::default(),
            archive: ArchiveMap::new(),
        }
    }

    /// Creates a session and loads the board and archive.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Sync`] when either fetch fails.
    pub async fn connect(remote: Arc<R>) -> SessionResult<Self> {
        let mut session = Self::new(remote);
        session.refresh().await?;
        session.refresh_archived().await?;
        Ok(session)
    }

    /// Returns the local board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the local archive.
    #[must_use]
    pub const fn archive(&self) -> &ArchiveMap {
        &self.archive
    }

    /// Replaces the local board with the server's.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Sync`] when the fetch fails; the local board
    /// is left as it was.
    pub async fn refresh(&mut self) -> SessionResult<()> {
        self.board = self.remote.fetch_board().await?;
        debug!(tasks = self.board.tasks.len(), "board refreshed");
        Ok(())
    }

    /// Replaces the local archive with the server's.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Sync`] when the fetch fails; the local archive
    /// is left as it was.
    pub async fn refresh_archived(&mut self) -> SessionResult<()> {
        self.archive = self.remote.fetch_archived().await?;
        debug!(archived = self.archive.len(), "archive refreshed");
        Ok(())
    }

    /// Applies a drag gesture and pushes the board.
    ///
    /// No-op gestures change nothing and send nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Reorder`] when the gesture does not fit the
    /// board, or [`SessionError::Sync`] after rolling back.
    pub async fn move_task(&mut self, gesture: &DragGesture) -> SessionResult<()> {
        if gesture.is_noop() {
            return Ok(());
        }
        let next = compute_reorder(&self.board, gesture)?;
        let snapshot = self.stage(next);
        if let Err(err) = self.remote.push_board(&self.board).await {
            return Err(self.roll_back(snapshot, err));
        }
        debug!(task_id = %gesture.task_id, "task moved");
        Ok(())
    }

    /// Creates a task at the end of `column_id`.
    ///
    /// When the server stores the task but refuses the new ordering, the task
    /// is deleted again before the failure is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownColumn`],
    /// [`SessionError::InvalidTask`] for a blank title, or
    /// [`SessionError::Sync`] after rolling back.
    pub async fn create_task(
        &mut self,
        column_id: &ColumnId,
        draft: TaskDraft,
    ) -> SessionResult<Task> {
        if !self.board.columns.contains_key(column_id) {
            return Err(SessionError::UnknownColumn(column_id.clone()));
        }
        let task = Task::from_draft(TaskId::generate(), column_id.clone(), draft)?;

        let mut next = self.board.clone();
        next.tasks.insert(task.id().clone(), task.clone());
        if let Some(column) = next.columns.get_mut(column_id) {
            column.push(task.id().clone());
        }

        let snapshot = self.stage(next);
        let stored = match self.remote.create_task(&task).await {
            Ok(stored) => stored,
            Err(err) => return Err(self.roll_back(snapshot, err)),
        };
        if let Err(err) = self.remote.push_board(&self.board).await {
            self.withdraw_created(stored.id()).await;
            return Err(self.roll_back(snapshot, err));
        }
        info!(task_id = %stored.id(), column_id = %column_id, "task created");
        Ok(stored)
    }

    /// Replaces the editable fields of a live task.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownTask`],
    /// [`SessionError::InvalidTask`] for a blank title, or
    /// [`SessionError::Sync`] after rolling back.
    pub async fn edit_task(&mut self, task_id: &TaskId, draft: TaskDraft) -> SessionResult<Task> {
        let mut task = self
            .board
            .task(task_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownTask(task_id.clone()))?;
        task.apply_draft(draft)?;

        let mut next = self.board.clone();
        next.tasks.insert(task_id.clone(), task.clone());

        let snapshot = self.stage(next);
        match self.remote.update_task(&task).await {
            Ok(stored) => {
                info!(task_id = %task_id, "task edited");
                Ok(stored)
            }
            Err(err) => Err(self.roll_back(snapshot, err)),
        }
    }

    /// Permanently deletes a live task.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownTask`] or [`SessionError::Sync`] after
    /// rolling back.
    pub async fn delete_task(&mut self, task_id: &TaskId) -> SessionResult<()> {
        if self.board.task(task_id).is_none() {
            return Err(SessionError::UnknownTask(task_id.clone()));
        }
        let mut next = self.board.clone();
        next.remove_task(task_id);

        let snapshot = self.stage(next);
        if let Err(err) = self.remote.delete_task(task_id).await {
            return Err(self.roll_back(snapshot, err));
        }
        info!(task_id = %task_id, "task deleted");
        Ok(())
    }

    /// Moves a live task into the archive.
    ///
    /// The archived record returned by the server, carrying its timestamp,
    /// is added to the local archive.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownTask`] or [`SessionError::Sync`] after
    /// rolling back.
    pub async fn archive_task(&mut self, task_id: &TaskId) -> SessionResult<Task> {
        if self.board.task(task_id).is_none() {
            return Err(SessionError::UnknownTask(task_id.clone()));
        }
        let mut next = self.board.clone();
        next.remove_task(task_id);

        let snapshot = self.stage(next);
        match self.remote.archive_task(task_id).await {
            Ok(archived) => {
                self.archive.insert(task_id.clone(), archived.clone());
                info!(task_id = %task_id, "task archived");
                Ok(archived)
            }
            Err(err) => Err(self.roll_back(snapshot, err)),
        }
    }

    /// Returns an archived task to the board, then reloads board and archive.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownArchivedTask`] or
    /// [`SessionError::Sync`] after rolling back.
    pub async fn restore_task(&mut self, task_id: &TaskId) -> SessionResult<Task> {
        let Some(archived) = self.archive.get(task_id).cloned() else {
            return Err(SessionError::UnknownArchivedTask(task_id.clone()));
        };
        let mut task = archived.into_live();
        let mut next = self.board.clone();
        if !next.columns.contains_key(home_column(&task)) {
            task.move_to(ColumnId::from(FALLBACK_COLUMN));
        }
        remove_from_orderings(&mut next.columns, task_id);
        if let Some(column) = next.columns.get_mut(home_column(&task)) {
            column.push(task_id.clone());
        }
        next.tasks.insert(task_id.clone(), task);

        let snapshot = self.stage(next);
        self.archive.shift_remove(task_id);
        let restored = match self.remote.restore_task(task_id).await {
            Ok(restored) => restored,
            Err(err) => return Err(self.roll_back(snapshot, err)),
        };
        info!(task_id = %task_id, status = %restored.status(), "task restored");

        if let Err(err) = self.reload().await {
            warn!(error = %err, "reload after restore failed, keeping local state");
        }
        Ok(restored)
    }

    /// Appends an empty column and pushes the board.
    ///
    /// `id` and `title` are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyColumnField`],
    /// [`SessionError::DuplicateColumn`], or [`SessionError::Sync`] after
    /// rolling back.
    pub async fn add_column(&mut self, id: &str, title: &str) -> SessionResult<Column> {
        let (trimmed_id, trimmed_title) = (id.trim(), title.trim());
        if trimmed_id.is_empty() {
            return Err(SessionError::EmptyColumnField("id"));
        }
        if trimmed_title.is_empty() {
            return Err(SessionError::EmptyColumnField("title"));
        }
        let column_id = ColumnId::from(trimmed_id);
        if self.board.columns.contains_key(&column_id) {
            return Err(SessionError::DuplicateColumn(column_id));
        }

        let column = Column::new(column_id.clone(), trimmed_title);
        let mut next = self.board.clone();
        next.columns.insert(column_id.clone(), column.clone());

        let snapshot = self.stage(next);
        if let Err(err) = self.remote.push_board(&self.board).await {
            return Err(self.roll_back(snapshot, err));
        }
        info!(column_id = %column_id, "column added");
        Ok(column)
    }

    /// Deletes a task the server stored before the rest of a command failed.
    async fn withdraw_created(&self, task_id: &TaskId) {
        match self.remote.delete_task(task_id).await {
            Ok(()) => debug!(task_id = %task_id, "withdrew partially created task"),
            Err(err) => warn!(
                task_id = %task_id,
                error = %err,
                "could not withdraw partially created task, server keeps it"
            ),
        }
    }

    async fn reload(&mut self) -> SessionResult<()> {
        let board = self.remote.fetch_board().await?;
        let archive = self.remote.fetch_archived().await?;
        self.board = board;
        self.archive = archive;
        Ok(())
    }

    fn stage(&mut self, next: Board) -> Snapshot {
        Snapshot {
            board: std::mem::replace(&mut self.board, next),
            archive: self.archive.clone(),
        }
    }

    fn roll_back(&mut self, snapshot: Snapshot, err: BoardRemoteError) -> SessionError {
        warn!(error = %err, "sync failed, rolling back local board");
        self.board = snapshot.board;
        self.archive = snapshot.archive;
        SessionError::Sync(err)
    }
}
