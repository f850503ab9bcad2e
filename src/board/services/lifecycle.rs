//! Server-side board lifecycle: listing, bulk sync and per-task mutations.

use crate::board::{
    domain::{
        ArchiveMap, Board, BoardErrorKind, ColumnId, ColumnMap, FALLBACK_COLUMN, OrderingPolicy,
        Task, TaskId, TaskMap, TaskValidationError, home_column, orphaned_tasks,
        remove_from_orderings, validate_task, validate_task_map,
    },
    ports::{BoardStore, BoardStoreError},
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Validated payload of a bulk board update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkUpdateRequest {
    tasks: TaskMap,
    columns: ColumnMap,
    rejected: Vec<String>,
}

impl BulkUpdateRequest {
    /// Parses a `{tasks, columns}` payload.
    ///
    /// Task records failing the schema are dropped and listed in
    /// [`BulkUpdateRequest::rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BadRequest`] when either key is missing
    /// or null, or when either document has the wrong shape.
    pub fn from_json(payload: &Value) -> BoardServiceResult<Self> {
        let (Some(raw_tasks), Some(raw_columns)) = (
            payload.get("tasks").filter(|value| !value.is_null()),
            payload.get("columns").filter(|value| !value.is_null()),
        ) else {
            return Err(BoardServiceError::BadRequest(
                "Missing tasks or columns".to_owned(),
            ));
        };

        let validated = validate_task_map(raw_tasks)
            .map_err(|err| BoardServiceError::BadRequest(format!("Invalid tasks: {err}")))?;
        let columns = serde_json::from_value::<ColumnMap>(raw_columns.clone())
            .map_err(|err| BoardServiceError::BadRequest(format!("Invalid columns: {err}")))?;

        Ok(Self {
            tasks: validated.tasks,
            columns,
            rejected: validated.rejected,
        })
    }

    /// Wraps an already validated board.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self {
            tasks: board.tasks,
            columns: board.columns,
            rejected: Vec::new(),
        }
    }

    /// Returns the keys of records dropped during parsing.
    #[must_use]
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

/// Outcome of a bulk update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkUpdateSummary {
    /// Tasks written to the store.
    pub tasks_stored: usize,
    /// Records dropped for failing the task schema.
    pub tasks_dropped: usize,
}

/// Service-level errors for board operations.
#[derive(Debug, Clone, Error)]
pub enum BoardServiceError {
    /// A single-task payload failed the task schema.
    #[error("invalid task format: {0}")]
    InvalidFormat(#[from] TaskValidationError),

    /// The payload id differs from the id being updated.
    #[error("task id {body} does not match target {target}")]
    IdMismatch {
        /// Id named by the request path.
        target: TaskId,
        /// Id carried by the payload.
        body: TaskId,
    },

    /// A bulk payload is malformed.
    #[error("{0}")]
    BadRequest(String),

    /// No live task has the id.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// No archived task has the id.
    #[error("archived task not found: {0}")]
    ArchivedNotFound(TaskId),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
}

impl BoardServiceError {
    /// Returns the caller-facing failure category.
    #[must_use]
    pub const fn kind(&self) -> BoardErrorKind {
        match self {
            Self::InvalidFormat(_) | Self::IdMismatch { .. } => BoardErrorKind::InvalidFormat,
            Self::BadRequest(_) => BoardErrorKind::BadRequest,
            Self::NotFound(_) | Self::ArchivedNotFound(_) => BoardErrorKind::NotFound,
            Self::Store(_) => BoardErrorKind::Internal,
        }
    }

    /// Returns the short message shown to API callers.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidFormat(_) | Self::IdMismatch { .. } => "Invalid task format".to_owned(),
            Self::BadRequest(message) => message.clone(),
            Self::NotFound(_) => "Task not found".to_owned(),
            Self::ArchivedNotFound(_) => "Archived task not found".to_owned(),
            Self::Store(BoardStoreError::Write { .. }) => "Failed to save board data".to_owned(),
            Self::Store(_) => "Failed to read board data".to_owned(),
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Board lifecycle orchestration over a [`BoardStore`].
///
/// Every operation is a whole-document read-modify-write. Operations issued
/// through clones of one service run one at a time.
pub struct BoardService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    policy: OrderingPolicy,
    gate: Arc<Mutex<()>>,
}

impl<S, C> Clone for BoardService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            policy: self.policy,
            gate: Arc::clone(&self.gate),
        }
    }
}

impl<S, C> BoardService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Creates a board service.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, policy: OrderingPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the ordering policy.
    #[must_use]
    pub const fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    /// Returns the board with column membership settled from task status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when a document cannot be read.
    pub async fn list(&self) -> BoardServiceResult<Board> {
        let _gate = self.gate.lock().await;
        let tasks = self.store.load_tasks().await?;
        let columns = self.store.load_columns().await?;
        let settled = self.policy.settle_for_read(&tasks, &columns);

        let orphans = orphaned_tasks(&tasks, &settled);
        if !orphans.is_empty() {
            warn!(orphans = ?orphans, "tasks reference columns that do not exist");
        }
        debug!(tasks = tasks.len(), columns = settled.len(), "listed board");
        Ok(Board::new(tasks, settled))
    }

    /// Returns the archived tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the archive cannot be read.
    pub async fn list_archived(&self) -> BoardServiceResult<ArchiveMap> {
        let _gate = self.gate.lock().await;
        let archive = self.store.load_archive().await?;
        debug!(archived = archive.len(), "listed archive");
        Ok(archive)
    }

    /// Replaces the task and column documents with a client snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when a document cannot be written.
    pub async fn bulk_update(
        &self,
        request: BulkUpdateRequest,
    ) -> BoardServiceResult<BulkUpdateSummary> {
        let BulkUpdateRequest {
            tasks,
            columns,
            rejected,
        } = request;
        if !rejected.is_empty() {
            warn!(rejected = ?rejected, "bulk update dropped invalid tasks");
        }

        let _gate = self.gate.lock().await;
        let settled = self.policy.settle_for_write(&tasks, columns);
        self.store.save_tasks(&tasks).await?;
        self.store.save_columns(&settled).await?;

        let summary = BulkUpdateSummary {
            tasks_stored: tasks.len(),
            tasks_dropped: rejected.len(),
        };
        info!(
            tasks = summary.tasks_stored,
            dropped = summary.tasks_dropped,
            columns = settled.len(),
            "board updated"
        );
        Ok(summary)
    }

    /// Stores a new task, replacing any live task with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::InvalidFormat`] when the payload fails the
    /// task schema, or [`BoardServiceError::Store`] on persistence failure.
    pub async fn create(&self, payload: &Value) -> BoardServiceResult<Task> {
        let task = validate_task(payload)?.into_live();

        let _gate = self.gate.lock().await;
        let mut tasks = self.store.load_tasks().await?;
        if tasks.insert(task.id().clone(), task.clone()).is_some() {
            warn!(task_id = %task.id(), "create replaced an existing task");
        }
        self.store.save_tasks(&tasks).await?;
        self.resettle_columns(&tasks).await?;

        info!(task_id = %task.id(), status = %task.status(), "task created");
        Ok(task)
    }

    /// Replaces the live task `task_id` wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::InvalidFormat`] or
    /// [`BoardServiceError::IdMismatch`] for a bad payload,
    /// [`BoardServiceError::NotFound`] when the task is not live, or
    /// [`BoardServiceError::Store`] on persistence failure.
    pub async fn update(&self, task_id: &TaskId, payload: &Value) -> BoardServiceResult<Task> {
        let task = validate_task(payload)?.into_live();
        if task.id() != task_id {
            return Err(BoardServiceError::IdMismatch {
                target: task_id.clone(),
                body: task.id().clone(),
            });
        }

        let _gate = self.gate.lock().await;
        let mut tasks = self.store.load_tasks().await?;
        let Some(slot) = tasks.get_mut(task_id) else {
            return Err(BoardServiceError::NotFound(task_id.clone()));
        };
        slot.clone_from(&task);
        self.store.save_tasks(&tasks).await?;
        self.resettle_columns(&tasks).await?;

        info!(task_id = %task_id, status = %task.status(), "task updated");
        Ok(task)
    }

    /// Moves a live task into the archive, stamping it with the clock.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] when the task is not live, or
    /// [`BoardServiceError::Store`] on persistence failure.
    pub async fn archive(&self, task_id: &TaskId) -> BoardServiceResult<Task> {
        let _gate = self.gate.lock().await;
        let mut tasks = self.store.load_tasks().await?;
        let mut columns = self.store.load_columns().await?;
        let mut archive = self.store.load_archive().await?;

        let Some(task) = tasks.shift_remove(task_id) else {
            return Err(BoardServiceError::NotFound(task_id.clone()));
        };
        let archived = task.into_archived(self.clock.utc());
        remove_from_orderings(&mut columns, task_id);
        archive.insert(task_id.clone(), archived.clone());

        // Archive first: a partial failure leaves a duplicate, never a loss.
        self.store.save_archive(&archive).await?;
        self.store.save_tasks(&tasks).await?;
        let settled = self.policy.settle_for_write(&tasks, columns);
        self.store.save_columns(&settled).await?;

        info!(task_id = %task_id, "task archived");
        Ok(archived)
    }

    /// Returns an archived task to the end of its column.
    ///
    /// A task whose column no longer exists is reassigned to `todo`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::ArchivedNotFound`] when the task is not
    /// archived, or [`BoardServiceError::Store`] on persistence failure.
    pub async fn restore(&self, task_id: &TaskId) -> BoardServiceResult<Task> {
        let _gate = self.gate.lock().await;
        let mut tasks = self.store.load_tasks().await?;
        let mut columns = self.store.load_columns().await?;
        let mut archive = self.store.load_archive().await?;

        let Some(archived) = archive.shift_remove(task_id) else {
            return Err(BoardServiceError::ArchivedNotFound(task_id.clone()));
        };
        let mut task = archived.into_live();
        let column_id = if columns.contains_key(home_column(&task)) {
            ColumnId::from(home_column(&task))
        } else {
            warn!(
                task_id = %task_id,
                status = %task.status(),
                "column missing on restore, falling back to todo"
            );
            task.move_to(ColumnId::from(FALLBACK_COLUMN));
            ColumnId::from(FALLBACK_COLUMN)
        };

        remove_from_orderings(&mut columns, task_id);
        if let Some(column) = columns.get_mut(&column_id) {
            column.push(task_id.clone());
        } else {
            warn!(task_id = %task_id, "no todo column, restored task is orphaned");
        }
        tasks.insert(task_id.clone(), task.clone());

        // Live documents first: a partial failure leaves a duplicate, never a loss.
        self.store.save_tasks(&tasks).await?;
        let settled = self.policy.settle_for_write(&tasks, columns);
        self.store.save_columns(&settled).await?;
        self.store.save_archive(&archive).await?;

        info!(task_id = %task_id, status = %task.status(), "task restored");
        Ok(task)
    }

    /// Permanently removes a live task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] when the task is not live, or
    /// [`BoardServiceError::Store`] on persistence failure.
    pub async fn delete(&self, task_id: &TaskId) -> BoardServiceResult<()> {
        let _gate = self.gate.lock().await;
        let mut tasks = self.store.load_tasks().await?;
        let mut columns = self.store.load_columns().await?;

        if tasks.shift_remove(task_id).is_none() {
            return Err(BoardServiceError::NotFound(task_id.clone()));
        }
        remove_from_orderings(&mut columns, task_id);

        self.store.save_tasks(&tasks).await?;
        let settled = self.policy.settle_for_write(&tasks, columns);
        self.store.save_columns(&settled).await?;

        info!(task_id = %task_id, "task deleted");
        Ok(())
    }

    async fn resettle_columns(&self, tasks: &TaskMap) -> BoardServiceResult<()> {
        if !self.policy.reconciles_writes() {
            return Ok(());
        }
        let columns = self.store.load_columns().await?;
        let settled = self.policy.settle_for_write(tasks, columns);
        self.store.save_columns(&settled).await?;
        Ok(())
    }
}
