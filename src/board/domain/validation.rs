//! Task schema validation for untrusted JSON records.
//!
//! Records arrive from request bodies and from documents on disk. Single
//! records are rejected outright when invalid; whole documents are filtered,
//! with invalid entries reported back to the caller rather than failing the
//! document.

use super::{ColumnId, Priority, Task, TaskData, TaskId, TaskMap, TaskValidationError};
use serde_json::{Map, Value};

/// Returns `true` when `candidate` satisfies the task schema.
#[must_use]
pub fn is_valid_task(candidate: &Value) -> bool {
    validate_task(candidate).is_ok()
}

/// Validates `candidate` against the task schema and builds a [`Task`].
///
/// `id`, `title`, `description`, `priority` and `status` must be strings,
/// `title` must not be blank, `priority` must match `low`, `medium` or `high`
/// in any case, and `dueDate` and `archivedAt` may each be absent, null or a
/// string.
///
/// # Errors
///
/// Returns the first [`TaskValidationError`] found.
pub fn validate_task(candidate: &Value) -> Result<Task, TaskValidationError> {
    let record = candidate
        .as_object()
        .ok_or(TaskValidationError::NotAnObject)?;

    let id = required_string(record, "id")?;
    let title = required_string(record, "title")?;
    let description = required_string(record, "description")?;
    let priority = Priority::try_from(required_string(record, "priority")?)?;
    let status = required_string(record, "status")?;

    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }

    let due_date = match record.get("dueDate") {
        None | Some(Value::Null) => None,
        Some(Value::String(due_date)) => Some(due_date.clone()),
        Some(_) => return Err(TaskValidationError::InvalidDueDate),
    };

    let archived_at = match record.get("archivedAt") {
        None | Some(Value::Null) => None,
        Some(Value::String(stamp)) => Some(stamp.clone()),
        Some(_) => return Err(TaskValidationError::InvalidArchivedAt),
    };

    Ok(Task::from_data(TaskData {
        id: TaskId::new(id),
        title: title.to_owned(),
        description: description.to_owned(),
        priority,
        status: ColumnId::new(status),
        due_date,
        archived_at,
    }))
}

fn required_string<'a>(
    record: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, TaskValidationError> {
    match record.get(field) {
        None => Err(TaskValidationError::MissingField(field)),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(TaskValidationError::NotAString(field)),
    }
}

/// Validates one entry of a task document keyed by `key`.
///
/// # Errors
///
/// Returns the [`validate_task`] error, or
/// [`TaskValidationError::KeyMismatch`] when the record's `id` differs from
/// `key`.
pub fn validate_task_entry(key: &str, candidate: &Value) -> Result<Task, TaskValidationError> {
    let task = validate_task(candidate)?;
    if task.id().as_str() != key {
        return Err(TaskValidationError::KeyMismatch {
            key: key.to_owned(),
            id: task.id().clone(),
        });
    }
    Ok(task)
}

/// Outcome of filtering a map of candidate records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedTasks {
    /// Records that passed validation, in document order.
    pub tasks: TaskMap,
    /// Map keys of the records that were dropped.
    pub rejected: Vec<String>,
}

/// Filters a JSON object of candidate records through
/// [`validate_task_entry`].
///
/// Valid records keep their position; invalid ones, including records keyed
/// under another task's id, are dropped and their keys reported in
/// [`ValidatedTasks::rejected`].
///
/// # Errors
///
/// Returns [`TaskValidationError::NotAnObject`] when `document` is not a
/// JSON object.
pub fn validate_task_map(document: &Value) -> Result<ValidatedTasks, TaskValidationError> {
    let entries = document
        .as_object()
        .ok_or(TaskValidationError::NotAnObject)?;

    let mut validated = ValidatedTasks::default();
    for (key, candidate) in entries {
        match validate_task_entry(key, candidate) {
            Ok(task) => {
                validated.tasks.insert(task.id().clone(), task);
            }
            Err(_) => validated.rejected.push(key.clone()),
        }
    }
    Ok(validated)
}
