//! Board columns and their task orderings.

use super::{ColumnId, TaskId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column receiving tasks whose status is empty.
pub const FALLBACK_COLUMN: &str = "todo";

/// Insertion-ordered map of columns keyed by id.
pub type ColumnMap = IndexMap<ColumnId, Column>;

/// A workflow stage holding an ordered list of task ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    id: ColumnId,
    title: String,
    #[serde(default)]
    task_ids: Vec<TaskId>,
}

impl Column {
    /// Creates an empty column.
    #[must_use]
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Sets the initial ordering, dropping repeated ids.
    #[must_use]
    pub fn with_task_ids(mut self, task_ids: impl IntoIterator<Item = TaskId>) -> Self {
        self.replace_task_ids(task_ids);
        self
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the ordering.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns `true` when `task_id` is in the ordering.
    #[must_use]
    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.task_ids.contains(task_id)
    }

    /// Empties the ordering.
    pub fn clear(&mut self) {
        self.task_ids.clear();
    }

    /// Replaces the ordering, keeping only the first occurrence of each id.
    pub fn replace_task_ids(&mut self, task_ids: impl IntoIterator<Item = TaskId>) {
        self.task_ids.clear();
        for task_id in task_ids {
            self.push(task_id);
        }
    }

    /// Appends `task_id` unless already present. Returns `true` if appended.
    pub fn push(&mut self, task_id: TaskId) -> bool {
        if self.contains(&task_id) {
            return false;
        }
        self.task_ids.push(task_id);
        true
    }

    /// Inserts `task_id` at `index`, clamped to the ordering length.
    ///
    /// A previous occurrence of the same id is removed first.
    pub fn insert(&mut self, index: usize, task_id: TaskId) {
        self.remove(&task_id);
        let position = index.min(self.task_ids.len());
        self.task_ids.insert(position, task_id);
    }

    /// Removes and returns the id at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<TaskId> {
        (index < self.task_ids.len()).then(|| self.task_ids.remove(index))
    }

    /// Removes every occurrence of `task_id`. Returns `true` if any was found.
    pub fn remove(&mut self, task_id: &TaskId) -> bool {
        let before = self.task_ids.len();
        self.task_ids.retain(|id| id != task_id);
        self.task_ids.len() != before
    }
}

/// Returns the columns seeded on first run: `todo`, `inprogress`, `done`.
#[must_use]
pub fn default_columns() -> ColumnMap {
    [
        Column::new(FALLBACK_COLUMN, "To Do"),
        Column::new("inprogress", "In Progress"),
        Column::new("done", "Done"),
    ]
    .into_iter()
    .map(|column| (column.id().clone(), column))
    .collect()
}

/// Strips `task_id` from the ordering of every column.
pub fn remove_from_orderings(columns: &mut ColumnMap, task_id: &TaskId) {
    for column in columns.values_mut() {
        column.remove(task_id);
    }
}
