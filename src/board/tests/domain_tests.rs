//! Tests for task validation and the basic board types.

use crate::board::domain::{
    Board, Column, ColumnId, DueState, Priority, Task, TaskDraft, TaskId, TaskValidationError,
    default_columns, is_valid_task, validate_task, validate_task_entry, validate_task_map,
};
use chrono::{NaiveDate, TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use super::fixtures::{column, task};

fn valid_record() -> Value {
    json!({
        "id": "task-1",
        "title": "Write release notes",
        "description": "",
        "priority": "medium",
        "status": "todo",
        "dueDate": null
    })
}

fn with_field(field: &str, value: Value) -> Value {
    let mut record = valid_record();
    if let Some(object) = record.as_object_mut() {
        object.insert(field.to_owned(), value);
    }
    record
}

fn without_field(field: &str) -> Value {
    let mut record = valid_record();
    if let Some(object) = record.as_object_mut() {
        object.remove(field);
    }
    record
}

#[rstest]
fn valid_record_builds_task() {
    let built = validate_task(&valid_record()).expect("record is valid");

    assert_eq!(built.id().as_str(), "task-1");
    assert_eq!(built.title(), "Write release notes");
    assert_eq!(built.priority(), Priority::Medium);
    assert_eq!(built.status().as_str(), "todo");
    assert_eq!(built.due_date(), None);
    assert_eq!(built.archived_at(), None);
}

#[rstest]
#[case::upper("HIGH", Priority::High)]
#[case::mixed("Low", Priority::Low)]
#[case::lower("medium", Priority::Medium)]
fn priority_matches_case_insensitively(#[case] raw: &str, #[case] expected: Priority) {
    let built = validate_task(&with_field("priority", json!(raw))).expect("priority accepted");
    assert_eq!(built.priority(), expected);
}

#[rstest]
fn unknown_priority_is_rejected() {
    let result = validate_task(&with_field("priority", json!("urgent")));
    assert!(matches!(result, Err(TaskValidationError::Priority(_))));
}

#[rstest]
#[case::id("id")]
#[case::title("title")]
#[case::description("description")]
#[case::priority("priority")]
#[case::status("status")]
fn missing_required_field_is_named(#[case] field: &'static str) {
    let result = validate_task(&without_field(field));
    assert_eq!(result, Err(TaskValidationError::MissingField(field)));
}

#[rstest]
#[case::id("id")]
#[case::title("title")]
#[case::status("status")]
fn non_string_field_is_named(#[case] field: &'static str) {
    let result = validate_task(&with_field(field, json!(7)));
    assert_eq!(result, Err(TaskValidationError::NotAString(field)));
}

#[rstest]
fn blank_title_is_rejected() {
    let result = validate_task(&with_field("title", json!("   ")));
    assert_eq!(result, Err(TaskValidationError::EmptyTitle));
}

#[rstest]
#[case::absent(without_field("dueDate"), None)]
#[case::null(with_field("dueDate", Value::Null), None)]
#[case::string(with_field("dueDate", json!("2025-03-01")), Some("2025-03-01"))]
fn due_date_may_be_absent_null_or_string(#[case] record: Value, #[case] expected: Option<&str>) {
    let built = validate_task(&record).expect("due date accepted");
    assert_eq!(built.due_date(), expected);
}

#[rstest]
fn numeric_due_date_is_rejected() {
    let result = validate_task(&with_field("dueDate", json!(20_250_301)));
    assert_eq!(result, Err(TaskValidationError::InvalidDueDate));
}

#[rstest]
fn archived_at_accepts_any_string() {
    let rfc3339 = validate_task(&with_field("archivedAt", json!("2025-01-02T03:04:05Z")))
        .expect("timestamp accepted");
    assert_eq!(rfc3339.archived_at(), Some("2025-01-02T03:04:05Z"));
    assert_eq!(
        rfc3339.archived_timestamp(),
        Some(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).single().expect("valid date"))
    );

    let date_only =
        validate_task(&with_field("archivedAt", json!("2024-01-01"))).expect("date accepted");
    assert_eq!(date_only.archived_at(), Some("2024-01-01"));
    assert_eq!(date_only.archived_timestamp(), None);

    let numeric = validate_task(&with_field("archivedAt", json!(1_704_067_200)));
    assert_eq!(numeric, Err(TaskValidationError::InvalidArchivedAt));
}

#[rstest]
#[case::array(json!([1, 2]))]
#[case::string(json!("task"))]
#[case::null(Value::Null)]
fn non_object_is_invalid(#[case] candidate: Value) {
    assert!(!is_valid_task(&candidate));
    assert_eq!(validate_task(&candidate), Err(TaskValidationError::NotAnObject));
}

#[rstest]
fn task_map_drops_invalid_records() {
    let document = json!({
        "task-1": valid_record(),
        "broken": {"id": "broken", "title": "No priority"},
    });

    let validated = validate_task_map(&document).expect("document is an object");

    assert_eq!(validated.rejected, vec!["broken".to_owned()]);
    assert_eq!(validated.tasks.len(), 1);
    assert!(validated.tasks.contains_key("task-1"));
}

#[rstest]
fn task_map_rejects_records_keyed_under_another_id() {
    let document = json!({
        "task-1": valid_record(),
        "copy-of-task-1": valid_record(),
    });

    let validated = validate_task_map(&document).expect("document is an object");

    assert_eq!(validated.rejected, vec!["copy-of-task-1".to_owned()]);
    assert_eq!(validated.tasks.len(), 1);
    assert_eq!(
        validate_task_entry("copy-of-task-1", &valid_record()),
        Err(TaskValidationError::KeyMismatch {
            key: "copy-of-task-1".to_owned(),
            id: TaskId::from("task-1"),
        })
    );
}

#[rstest]
fn task_map_rejects_non_object_document() {
    let result = validate_task_map(&json!([valid_record()]));
    assert_eq!(result, Err(TaskValidationError::NotAnObject));
}

#[rstest]
fn task_serialises_with_camel_case_and_null_due_date() {
    let value = serde_json::to_value(task("a", "todo")).expect("task serialises");

    assert_eq!(value["dueDate"], Value::Null);
    assert_eq!(value["priority"], json!("high"));
    assert!(value.get("archivedAt").is_none());
}

#[rstest]
fn archived_task_round_trips_through_validation() {
    let stamp = Utc
        .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid date");
    let archived = task("a", "todo").into_archived(stamp);

    let value = serde_json::to_value(&archived).expect("task serialises");
    let parsed = validate_task(&value).expect("archived record is valid");

    assert_eq!(parsed, archived);
    assert_eq!(parsed.clone().into_live().archived_at(), None);
}

#[rstest]
fn draft_is_trimmed_and_blank_due_date_dropped() {
    let draft = TaskDraft::new("  Ship it  ")
        .with_description("  soon ")
        .with_due_date("   ");

    let built = Task::from_draft(TaskId::from("t"), ColumnId::from("todo"), draft)
        .expect("draft has a title");

    assert_eq!(built.title(), "Ship it");
    assert_eq!(built.description(), "soon");
    assert_eq!(built.due_date(), None);
}

#[rstest]
fn blank_draft_title_is_rejected() {
    let result = Task::from_draft(
        TaskId::from("t"),
        ColumnId::from("todo"),
        TaskDraft::new(" "),
    );
    assert_eq!(result, Err(TaskValidationError::EmptyTitle));
}

#[rstest]
fn apply_draft_keeps_id_and_status() {
    let mut edited = task("a", "done");
    edited
        .apply_draft(TaskDraft::new("Renamed").with_priority(Priority::Low))
        .expect("draft has a title");

    assert_eq!(edited.id().as_str(), "a");
    assert_eq!(edited.status().as_str(), "done");
    assert_eq!(edited.title(), "Renamed");
    assert_eq!(edited.priority(), Priority::Low);
}

#[rstest]
fn generated_ids_are_prefixed_and_unique() {
    let first = TaskId::generate();
    let second = TaskId::generate();

    assert!(first.as_str().starts_with("task-"));
    assert_ne!(first, second);
}

#[rstest]
fn default_columns_are_todo_inprogress_done() {
    let defaults = default_columns();
    let ids: Vec<&str> = defaults.keys().map(ColumnId::as_str).collect();

    assert_eq!(ids, vec!["todo", "inprogress", "done"]);
    assert!(defaults.values().all(|column| column.task_ids().is_empty()));
    assert_eq!(
        defaults.get("inprogress").map(Column::title),
        Some("In Progress")
    );
}

#[rstest]
fn column_insert_moves_existing_id_and_clamps() {
    let mut ordering = column("todo", &["a", "b", "c"]);

    ordering.insert(10, TaskId::from("a"));
    let ids: Vec<&str> = ordering.task_ids().iter().map(TaskId::as_str).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);

    assert!(!ordering.push(TaskId::from("b")));
    assert_eq!(ordering.remove_at(5), None);
}

#[rstest]
fn column_deserialises_without_task_ids() {
    let parsed: Column =
        serde_json::from_value(json!({"id": "qa", "title": "QA"})).expect("column parses");
    assert!(parsed.task_ids().is_empty());
}

#[rstest]
fn remove_task_strips_every_ordering() {
    let mut board = Board::new(
        super::fixtures::tasks(&[("a", "todo")]),
        super::fixtures::columns(&[("todo", &["a"]), ("done", &["a"])]),
    );

    let removed = board.remove_task(&TaskId::from("a"));

    assert!(removed.is_some());
    assert!(board.tasks.is_empty());
    assert!(board.columns.values().all(|column| column.task_ids().is_empty()));
}

#[rstest]
#[case::yesterday("2025-03-09", Some(DueState::Overdue))]
#[case::today("2025-03-10", Some(DueState::DueSoon))]
#[case::in_three_days("2025-03-13", Some(DueState::DueSoon))]
#[case::in_four_days("2025-03-14", Some(DueState::Upcoming))]
#[case::timestamp("2025-03-09T23:00:00Z", Some(DueState::Overdue))]
#[case::unparseable("next week", None)]
fn due_state_is_relative_to_today(#[case] due_date: &str, #[case] expected: Option<DueState>) {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date");
    let dated = Task::from_draft(
        TaskId::from("t"),
        ColumnId::from("todo"),
        TaskDraft::new("Ship").with_due_date(due_date),
    )
    .expect("draft is valid");

    assert_eq!(dated.due_state(today), expected);
}

#[rstest]
fn task_without_due_date_has_no_due_state() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date");
    assert_eq!(task("a", "todo").due_state(today), None);
}
