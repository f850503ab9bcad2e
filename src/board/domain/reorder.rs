//! Drag-and-drop reordering of tasks within and across columns.

use super::{Board, ColumnId, ReorderError, TaskId};

/// A position inside a column ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DragLocation {
    /// Column holding the position.
    pub column_id: ColumnId,
    /// Zero-based index in the column ordering.
    pub index: usize,
}

impl DragLocation {
    /// Creates a location.
    #[must_use]
    pub fn new(column_id: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column_id: column_id.into(),
            index,
        }
    }
}

/// A completed drag gesture.
///
/// `destination` is `None` when the drag was cancelled or dropped outside
/// any column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    /// Dragged task.
    pub task_id: TaskId,
    /// Where the task was picked up.
    pub source: DragLocation,
    /// Where the task was dropped.
    pub destination: Option<DragLocation>,
}

impl DragGesture {
    /// Creates a gesture that has not been dropped anywhere.
    #[must_use]
    pub fn new(task_id: impl Into<TaskId>, source: DragLocation) -> Self {
        Self {
            task_id: task_id.into(),
            source,
            destination: None,
        }
    }

    /// Sets the drop location.
    #[must_use]
    pub fn dropped_at(mut self, destination: DragLocation) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Returns `true` when applying the gesture leaves the board unchanged.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.destination
            .as_ref()
            .is_none_or(|destination| *destination == self.source)
    }
}

/// Applies a drag gesture to `board` and returns the resulting board.
///
/// Within one column the id is removed from the source index and reinserted
/// at the destination index of the shortened ordering. Across columns the id
/// moves from the source ordering into the destination ordering and the
/// task's status becomes the destination column. Destination indices past
/// the end append. A no-op gesture returns an unchanged copy.
///
/// # Errors
///
/// Returns [`ReorderError`] when a column or the task is unknown, or when
/// the source position does not hold the dragged task. `board` is never
/// modified.
pub fn compute_reorder(board: &Board, gesture: &DragGesture) -> Result<Board, ReorderError> {
    let Some(destination) = gesture.destination.as_ref().filter(|_| !gesture.is_noop()) else {
        return Ok(board.clone());
    };
    let source = &gesture.source;

    for column_id in [&source.column_id, &destination.column_id] {
        if !board.columns.contains_key(column_id) {
            return Err(ReorderError::UnknownColumn(column_id.clone()));
        }
    }
    ensure_at_source(board, gesture)?;

    let mut next = board.clone();
    if source.column_id != destination.column_id {
        next.tasks
            .get_mut(&gesture.task_id)
            .ok_or_else(|| ReorderError::UnknownTask(gesture.task_id.clone()))?
            .move_to(destination.column_id.clone());
    }

    if let Some(column) = next.columns.get_mut(&source.column_id) {
        column.remove_at(source.index);
    }
    if let Some(column) = next.columns.get_mut(&destination.column_id) {
        column.insert(destination.index, gesture.task_id.clone());
    }
    Ok(next)
}

fn ensure_at_source(board: &Board, gesture: &DragGesture) -> Result<(), ReorderError> {
    let source = &gesture.source;
    let ordering = board
        .columns
        .get(&source.column_id)
        .map(|column| column.task_ids())
        .unwrap_or_default();

    match ordering.get(source.index) {
        None => Err(ReorderError::SourceIndexOutOfRange {
            column_id: source.column_id.clone(),
            index: source.index,
            len: ordering.len(),
        }),
        Some(found) if *found != gesture.task_id => Err(ReorderError::TaskNotAtSource {
            task_id: gesture.task_id.clone(),
            column_id: source.column_id.clone(),
            index: source.index,
            found: found.clone(),
        }),
        Some(_) => Ok(()),
    }
}
