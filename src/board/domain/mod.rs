//! Domain model for the Kanban board.
//!
//! Tasks, columns, the board aggregate and the archive, plus the pure
//! algorithms that keep them consistent: schema validation, reconciliation
//! of column membership from task status, and drag reordering. Nothing in
//! this module performs I/O.

mod board;
mod column;
mod error;
mod ids;
mod reconcile;
mod reorder;
mod task;
mod validation;

pub use board::{ArchiveMap, Board, TaskMap};
pub use column::{Column, ColumnMap, FALLBACK_COLUMN, default_columns, remove_from_orderings};
pub use error::{
    BoardErrorKind, ParseOrderingPolicyError, ParsePriorityError, ReorderError,
    TaskValidationError,
};
pub use ids::{ColumnId, TaskId};
pub use reconcile::{
    OrderingPolicy, home_column, orphaned_tasks, reconcile, reconcile_preserving_order,
};
pub use reorder::{DragGesture, DragLocation, compute_reorder};
pub use task::{DUE_SOON_DAYS, DueState, Priority, Task, TaskData, TaskDraft};
pub use validation::{
    ValidatedTasks, is_valid_task, validate_task, validate_task_entry, validate_task_map,
};
