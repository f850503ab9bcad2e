//! Derivation of column membership from task status.
//!
//! A task's `status` is the canonical record of which column owns it.
//! Column orderings are rebuilt from it so the two cannot drift: every live
//! task appears in exactly the column its status names, or in none when that
//! column does not exist.

use super::{ColumnMap, FALLBACK_COLUMN, ParseOrderingPolicyError, Task, TaskId, TaskMap};
use std::fmt;
use std::str::FromStr;

/// Returns the column id a task belongs in.
///
/// An empty status falls back to [`FALLBACK_COLUMN`].
#[must_use]
pub fn home_column(task: &Task) -> &str {
    if task.status().is_empty() {
        FALLBACK_COLUMN
    } else {
        task.status().as_str()
    }
}

/// Rebuilds every column ordering from task status.
///
/// Orderings are reset, then each task is appended to its home column in
/// task-map order. Tasks whose home column does not exist are left out of
/// every ordering.
#[must_use]
pub fn reconcile(tasks: &TaskMap, columns: &ColumnMap) -> ColumnMap {
    let mut settled = columns.clone();
    for column in settled.values_mut() {
        column.clear();
    }
    append_members(tasks, &mut settled);
    settled
}

/// Rebuilds column orderings from task status, keeping stored positions.
///
/// Membership is identical to [`reconcile`]. Within a column, ids already in
/// the stored ordering that still belong there keep their relative order;
/// remaining members follow in task-map order.
#[must_use]
pub fn reconcile_preserving_order(tasks: &TaskMap, columns: &ColumnMap) -> ColumnMap {
    let mut settled = columns.clone();
    for (column_id, column) in &mut settled {
        let kept: Vec<TaskId> = column
            .task_ids()
            .iter()
            .filter(|task_id| {
                tasks
                    .get(*task_id)
                    .is_some_and(|task| home_column(task) == column_id.as_str())
            })
            .cloned()
            .collect();
        column.replace_task_ids(kept);
    }
    append_members(tasks, &mut settled);
    settled
}

fn append_members(tasks: &TaskMap, columns: &mut ColumnMap) {
    for task in tasks.values() {
        if let Some(column) = columns.get_mut(home_column(task)) {
            column.push(task.id().clone());
        }
    }
}

/// Returns the ids of tasks whose home column does not exist.
#[must_use]
pub fn orphaned_tasks<'a>(tasks: &'a TaskMap, columns: &ColumnMap) -> Vec<&'a TaskId> {
    tasks
        .values()
        .filter(|task| !columns.contains_key(home_column(task)))
        .map(Task::id)
        .collect()
}

/// How the service settles column orderings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderingPolicy {
    /// Settle with [`reconcile_preserving_order`] on reads and before every
    /// write, so custom positions survive and status stays canonical.
    #[default]
    Preserve,
    /// Settle with [`reconcile`] on reads only; writes store the orderings
    /// they were given.
    Derive,
}

impl OrderingPolicy {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preserve => "preserve",
            Self::Derive => "derive",
        }
    }

    /// Returns `true` when writes reconcile before persisting.
    #[must_use]
    pub const fn reconciles_writes(self) -> bool {
        matches!(self, Self::Preserve)
    }

    /// Returns the column orderings to serve for a read.
    #[must_use]
    pub fn settle_for_read(self, tasks: &TaskMap, columns: &ColumnMap) -> ColumnMap {
        match self {
            Self::Preserve => reconcile_preserving_order(tasks, columns),
            Self::Derive => reconcile(tasks, columns),
        }
    }

    /// Returns the column orderings to persist for a write.
    #[must_use]
    pub fn settle_for_write(self, tasks: &TaskMap, columns: ColumnMap) -> ColumnMap {
        match self {
            Self::Preserve => reconcile_preserving_order(tasks, &columns),
            Self::Derive => columns,
        }
    }
}

impl FromStr for OrderingPolicy {
    type Err = ParseOrderingPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "derive" => Ok(Self::Derive),
            _ => Err(ParseOrderingPolicyError(value.to_owned())),
        }
    }
}

impl fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
