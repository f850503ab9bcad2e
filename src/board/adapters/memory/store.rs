//! In-memory board store for tests and ephemeral boards.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{ArchiveMap, Board, ColumnMap, TaskMap, default_columns},
    ports::{BoardStore, BoardStoreError, BoardStoreResult},
};

/// Thread-safe in-memory board store.
///
/// Starts out like a freshly seeded file store: no tasks, the default
/// columns, and an empty archive.
#[derive(Debug, Clone)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug)]
struct InMemoryBoardState {
    tasks: TaskMap,
    columns: ColumnMap,
    archive: ArchiveMap,
}

impl InMemoryBoardStore {
    /// Creates a store holding the seeded documents.
    #[must_use]
    pub fn new() -> Self {
        Self::with_board(Board::new(TaskMap::new(), default_columns()))
    }

    /// Creates a store holding `board` and an empty archive.
    #[must_use]
    pub fn with_board(board: Board) -> Self {
        Self::with_documents(board, ArchiveMap::new())
    }

    /// Creates a store holding `board` and `archive`.
    #[must_use]
    pub fn with_documents(board: Board, archive: ArchiveMap) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryBoardState {
                tasks: board.tasks,
                columns: board.columns,
                archive,
            })),
        }
    }

    /// Returns the stored documents exactly as last saved.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Unavailable`] when the lock is poisoned.
    pub fn snapshot(&self) -> BoardStoreResult<(Board, ArchiveMap)> {
        let state = self.read()?;
        Ok((
            Board::new(state.tasks.clone(), state.columns.clone()),
            state.archive.clone(),
        ))
    }

    fn read(&self) -> BoardStoreResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state
            .read()
            .map_err(|err| BoardStoreError::Unavailable(err.to_string()))
    }

    fn write(&self) -> BoardStoreResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state
            .write()
            .map_err(|err| BoardStoreError::Unavailable(err.to_string()))
    }
}

impl Default for InMemoryBoardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BoardStore for InMemoryBoardStore {
    async fn load_tasks(&self) -> BoardStoreResult<TaskMap> {
        Ok(self.read()?.tasks.clone())
    }

    async fn save_tasks(&self, tasks: &TaskMap) -> BoardStoreResult<()> {
        self.write()?.tasks.clone_from(tasks);
        Ok(())
    }

    async fn load_columns(&self) -> BoardStoreResult<ColumnMap> {
        Ok(self.read()?.columns.clone())
    }

    async fn save_columns(&self, columns: &ColumnMap) -> BoardStoreResult<()> {
        self.write()?.columns.clone_from(columns);
        Ok(())
    }

    async fn load_archive(&self) -> BoardStoreResult<ArchiveMap> {
        Ok(self.read()?.archive.clone())
    }

    async fn save_archive(&self, archive: &ArchiveMap) -> BoardStoreResult<()> {
        self.write()?.archive.clone_from(archive);
        Ok(())
    }
}
