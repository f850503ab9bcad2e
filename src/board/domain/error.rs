//! Error types for board domain validation and reordering.

use super::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons a candidate record fails the task schema.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The candidate is not a JSON object.
    #[error("task must be a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("task field '{0}' is missing")]
    MissingField(&'static str),

    /// A field that must be a string holds another JSON type.
    #[error("task field '{0}' must be a string")]
    NotAString(&'static str),

    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The priority is not one of `low`, `medium` or `high`.
    #[error(transparent)]
    Priority(#[from] ParsePriorityError),

    /// The due date is neither a string nor null.
    #[error("task field 'dueDate' must be a string or null")]
    InvalidDueDate,

    /// The archive stamp is neither a string nor null.
    #[error("task field 'archivedAt' must be a string or null")]
    InvalidArchivedAt,

    /// A document entry is keyed differently from its own `id`.
    #[error("task keyed '{key}' carries id '{id}'")]
    KeyMismatch {
        /// Key of the entry in the document.
        key: String,
        /// Id carried by the record.
        id: TaskId,
    },
}

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing an ordering policy name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown ordering policy '{0}', expected 'preserve' or 'derive'")]
pub struct ParseOrderingPolicyError(pub String);

/// Errors returned when a drag gesture cannot be applied to a board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReorderError {
    /// The gesture names a column the board does not have.
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// The dragged task is not in the board's task set.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// The source index lies past the end of the source ordering.
    #[error("source index {index} is out of range for column {column_id} (length {len})")]
    SourceIndexOutOfRange {
        /// Source column.
        column_id: ColumnId,
        /// Requested index.
        index: usize,
        /// Length of the source ordering.
        len: usize,
    },

    /// The ordering holds a different task at the source index.
    #[error("column {column_id} holds {found} at index {index}, not {task_id}")]
    TaskNotAtSource {
        /// Dragged task.
        task_id: TaskId,
        /// Source column.
        column_id: ColumnId,
        /// Source index.
        index: usize,
        /// Task actually found at the index.
        found: TaskId,
    },
}

/// Caller-facing failure taxonomy shared by the service, the HTTP surface,
/// and remote clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardErrorKind {
    /// Malformed single-task payload; never persisted.
    InvalidFormat,
    /// Malformed bulk-update payload.
    BadRequest,
    /// The targeted id is absent from the relevant document.
    NotFound,
    /// Persistence or serialisation failure.
    Internal,
}

impl BoardErrorKind {
    /// Returns the canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for BoardErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
