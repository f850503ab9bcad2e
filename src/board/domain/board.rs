//! The board aggregate and the archive.

use super::{ColumnMap, Task, TaskId, default_columns, remove_from_orderings};
use indexmap::IndexMap;
use serde::Serialize;

/// Insertion-ordered map of live tasks keyed by id.
pub type TaskMap = IndexMap<TaskId, Task>;

/// Insertion-ordered map of archived tasks keyed by id.
///
/// Every value carries an `archivedAt` stamp.
pub type ArchiveMap = IndexMap<TaskId, Task>;

/// All live tasks and all columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    /// Live tasks.
    pub tasks: TaskMap,
    /// Columns in display order.
    pub columns: ColumnMap,
}

impl Board {
    /// Creates a board from its two documents.
    #[must_use]
    pub const fn new(tasks: TaskMap, columns: ColumnMap) -> Self {
        Self { tasks, columns }
    }

    /// Creates an empty board with the default columns.
    #[must_use]
    pub fn with_default_columns() -> Self {
        Self::new(TaskMap::new(), default_columns())
    }

    /// Returns the task with `task_id`, if live.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// Returns the tasks of `column_id` in display order.
    ///
    /// Ids without a live task are skipped.
    #[must_use]
    pub fn column_tasks(&self, column_id: &str) -> Vec<&Task> {
        self.columns
            .get(column_id)
            .map(|column| {
                column
                    .task_ids()
                    .iter()
                    .filter_map(|task_id| self.tasks.get(task_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Removes a task and strips it from every ordering.
    pub fn remove_task(&mut self, task_id: &TaskId) -> Option<Task> {
        let removed = self.tasks.shift_remove(task_id);
        remove_from_orderings(&mut self.columns, task_id);
        removed
    }
}
