//! Task record and related value types.

use super::{ColumnId, ParsePriorityError, TaskId, TaskValidationError};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default priority for new tasks.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task on the board or in the archive.
///
/// Instances are only produced by the validator or from a [`TaskDraft`], so
/// every `Task` satisfies the task schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    priority: Priority,
    status: ColumnId,
    due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    archived_at: Option<String>,
}

/// Parameter object for assembling a task from already validated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskData {
    /// Task identifier.
    pub id: TaskId,
    /// Non-empty title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Priority.
    pub priority: Priority,
    /// Owning column.
    pub status: ColumnId,
    /// Optional due date as sent by the client.
    pub due_date: Option<String>,
    /// Archive stamp as stored, set only for archived tasks.
    pub archived_at: Option<String>,
}

impl Task {
    /// Assembles a task from validated fields.
    #[must_use]
    pub fn from_data(data: TaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            due_date: data.due_date,
            archived_at: data.archived_at,
        }
    }

    /// Creates a task in `status` from user-entered draft fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EmptyTitle`] when the draft title is
    /// blank.
    pub fn from_draft(
        id: TaskId,
        status: ColumnId,
        draft: TaskDraft,
    ) -> Result<Self, TaskValidationError> {
        let fields = draft.normalized()?;
        Ok(Self {
            id,
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            status,
            due_date: fields.due_date,
            archived_at: None,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the column this task claims to belong to.
    #[must_use]
    pub const fn status(&self) -> &ColumnId {
        &self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    /// Returns the archive stamp as stored, set only while archived.
    #[must_use]
    pub fn archived_at(&self) -> Option<&str> {
        self.archived_at.as_deref()
    }

    /// Returns the archive stamp parsed as an RFC 3339 timestamp.
    ///
    /// Stamps written by other tools may be in another format; those yield
    /// `None`.
    #[must_use]
    pub fn archived_timestamp(&self) -> Option<DateTime<Utc>> {
        let stamp = self.archived_at.as_deref()?;
        DateTime::parse_from_rfc3339(stamp)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc))
    }

    /// Classifies the due date relative to `today`.
    ///
    /// Returns `None` when the task has no due date or the date is not in
    /// `YYYY-MM-DD` form (an RFC 3339 timestamp is read by its date part).
    #[must_use]
    pub fn due_state(&self, today: NaiveDate) -> Option<DueState> {
        let due = parse_due_date(self.due_date.as_deref()?)?;
        let days_left = (due - today).num_days();
        Some(if days_left < 0 {
            DueState::Overdue
        } else if days_left <= DUE_SOON_DAYS {
            DueState::DueSoon
        } else {
            DueState::Upcoming
        })
    }

    /// Reassigns the task to another column.
    pub fn move_to(&mut self, status: ColumnId) {
        self.status = status;
    }

    /// Replaces the user-editable fields, keeping id and status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EmptyTitle`] when the draft title is
    /// blank.
    pub fn apply_draft(&mut self, draft: TaskDraft) -> Result<(), TaskValidationError> {
        let fields = draft.normalized()?;
        self.title = fields.title;
        self.description = fields.description;
        self.priority = fields.priority;
        self.due_date = fields.due_date;
        Ok(())
    }

    /// Returns the archived copy of this task stamped with `at`.
    #[must_use]
    pub fn into_archived(mut self, at: DateTime<Utc>) -> Self {
        self.archived_at = Some(at.to_rfc3339_opts(SecondsFormat::AutoSi, true));
        self
    }

    /// Returns the live copy of this task with the archive stamp removed.
    #[must_use]
    pub fn into_live(mut self) -> Self {
        self.archived_at = None;
        self
    }
}

/// Days ahead of a due date at which a task counts as due soon.
pub const DUE_SOON_DAYS: i64 = 3;

/// Urgency of a task's due date on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueState {
    /// The due date has passed.
    Overdue,
    /// Due today or within [`DUE_SOON_DAYS`] days.
    DueSoon,
    /// Due later than that.
    Upcoming,
}

fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|parsed| parsed.date_naive())
    })
}

/// User-entered task fields, as collected by an add or edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title; trimmed and required.
    pub title: String,
    /// Description; trimmed.
    pub description: String,
    /// Priority.
    pub priority: Priority,
    /// Due date; blank values are stored as `None`.
    pub due_date: Option<String>,
}

impl TaskDraft {
    /// Creates a draft with the given title and default remaining fields.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    fn normalized(self) -> Result<Self, TaskValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(Self {
            title: title.to_owned(),
            description: self.description.trim().to_owned(),
            priority: self.priority,
            due_date: self
                .due_date
                .filter(|due_date| !due_date.trim().is_empty()),
        })
    }
}
