//! Persistence port for the three board documents.

use crate::board::domain::{ArchiveMap, ColumnMap, TaskMap};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board store operations.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// Whole-document persistence of tasks, columns and archived tasks.
///
/// Documents are read and written independently; there is no
/// multi-document transaction.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Loads the live task document.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the document cannot be read or
    /// parsed.
    async fn load_tasks(&self) -> BoardStoreResult<TaskMap>;

    /// Replaces the live task document.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Write`] when the document cannot be
    /// written.
    async fn save_tasks(&self, tasks: &TaskMap) -> BoardStoreResult<()>;

    /// Loads the column document.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the document cannot be read or
    /// parsed.
    async fn load_columns(&self) -> BoardStoreResult<ColumnMap>;

    /// Replaces the column document.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Write`] when the document cannot be
    /// written.
    async fn save_columns(&self, columns: &ColumnMap) -> BoardStoreResult<()>;

    /// Loads the archived task document.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the document cannot be read or
    /// parsed.
    async fn load_archive(&self) -> BoardStoreResult<ArchiveMap>;

    /// Replaces the archived task document.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Write`] when the document cannot be
    /// written.
    async fn save_archive(&self, archive: &ArchiveMap) -> BoardStoreResult<()>;
}

/// The three persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Live tasks.
    Tasks,
    /// Columns and their orderings.
    Columns,
    /// Archived tasks.
    Archive,
}

impl DocumentKind {
    /// Returns the document name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Columns => "columns",
            Self::Archive => "archived tasks",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by board store implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardStoreError {
    /// The document could not be read.
    #[error("failed to read {document} document: {cause}")]
    Read {
        /// Document being read.
        document: DocumentKind,
        /// Underlying failure.
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The document could not be written.
    #[error("failed to write {document} document: {cause}")]
    Write {
        /// Document being written.
        document: DocumentKind,
        /// Underlying failure.
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The document was read but is not valid JSON of the expected shape.
    #[error("malformed {document} document: {reason}")]
    Malformed {
        /// Document being parsed.
        document: DocumentKind,
        /// Parser message.
        reason: String,
    },

    /// The store backend itself is unavailable.
    #[error("board store unavailable: {0}")]
    Unavailable(String),
}

impl BoardStoreError {
    /// Wraps a read failure.
    pub fn read(
        document: DocumentKind,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Read {
            document,
            cause: Arc::new(err),
        }
    }

    /// Wraps a write failure.
    pub fn write(
        document: DocumentKind,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Write {
            document,
            cause: Arc::new(err),
        }
    }

    /// Describes a parse failure.
    pub fn malformed(document: DocumentKind, reason: impl fmt::Display) -> Self {
        Self::Malformed {
            document,
            reason: reason.to_string(),
        }
    }
}
