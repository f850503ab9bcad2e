//! Tests for deriving column membership from task status.

use crate::board::domain::{
    ColumnMap, OrderingPolicy, TaskMap, orphaned_tasks, reconcile, reconcile_preserving_order,
};
use rstest::rstest;

use super::fixtures::{columns, ordering, tasks};

fn membership(settled: &ColumnMap) -> Vec<(String, Vec<String>)> {
    settled
        .keys()
        .map(|column_id| {
            let mut ids = ordering(settled, column_id.as_str());
            ids.sort();
            (column_id.as_str().to_owned(), ids)
        })
        .collect()
}

#[rstest]
fn partitions_tasks_by_status() {
    let settled = reconcile(
        &tasks(&[("a", "todo"), ("b", "done")]),
        &columns(&[("todo", &[]), ("done", &[])]),
    );

    assert_eq!(ordering(&settled, "todo"), vec!["a"]);
    assert_eq!(ordering(&settled, "done"), vec!["b"]);
}

#[rstest]
fn empty_status_lands_in_todo() {
    let settled = reconcile(
        &tasks(&[("a", "")]),
        &columns(&[("todo", &[]), ("done", &["a"])]),
    );

    assert_eq!(ordering(&settled, "todo"), vec!["a"]);
    assert!(ordering(&settled, "done").is_empty());
}

#[rstest]
fn unknown_status_is_orphaned() {
    let task_map = tasks(&[("a", "todo"), ("z", "archive-me")]);
    let column_map = columns(&[("todo", &[])]);

    let settled = reconcile(&task_map, &column_map);

    assert_eq!(ordering(&settled, "todo"), vec!["a"]);
    let orphans: Vec<&str> = orphaned_tasks(&task_map, &settled)
        .into_iter()
        .map(|task_id| task_id.as_str())
        .collect();
    assert_eq!(orphans, vec!["z"]);
}

#[rstest]
fn stale_orderings_are_discarded() {
    let settled = reconcile(
        &tasks(&[("b", "todo"), ("a", "todo")]),
        &columns(&[("todo", &["ghost", "a", "b"]), ("done", &["b"])]),
    );

    assert_eq!(ordering(&settled, "todo"), vec!["b", "a"]);
    assert!(ordering(&settled, "done").is_empty());
}

#[rstest]
fn column_order_and_titles_survive() {
    let column_map = columns(&[("done", &[]), ("todo", &[])]);
    let settled = reconcile(&TaskMap::new(), &column_map);

    let ids: Vec<&str> = settled.keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["done", "todo"]);
    assert_eq!(
        settled.get("done").map(|column| column.title()),
        Some("DONE")
    );
}

#[rstest]
fn preserving_keeps_curated_positions() {
    let settled = reconcile_preserving_order(
        &tasks(&[("a", "todo"), ("b", "todo"), ("c", "todo")]),
        &columns(&[("todo", &["c", "a"])]),
    );

    assert_eq!(ordering(&settled, "todo"), vec!["c", "a", "b"]);
}

#[rstest]
fn preserving_drops_ids_that_moved_or_vanished() {
    let settled = reconcile_preserving_order(
        &tasks(&[("a", "done"), ("b", "todo")]),
        &columns(&[("todo", &["a", "ghost", "b", "b"]), ("done", &[])]),
    );

    assert_eq!(ordering(&settled, "todo"), vec!["b"]);
    assert_eq!(ordering(&settled, "done"), vec!["a"]);
}

#[rstest]
#[case::curated(&[("todo", &["c", "a"] as &[&str]), ("done", &["b"])])]
#[case::empty(&[("todo", &[] as &[&str]), ("done", &[])])]
#[case::scrambled(&[("todo", &["b", "x"] as &[&str]), ("done", &["a", "c"])])]
fn preserving_has_same_membership_as_reconcile(#[case] stored: &[(&str, &[&str])]) {
    let task_map = tasks(&[("a", "todo"), ("b", "done"), ("c", "todo"), ("o", "gone")]);
    let column_map = columns(stored);

    assert_eq!(
        membership(&reconcile_preserving_order(&task_map, &column_map)),
        membership(&reconcile(&task_map, &column_map))
    );
}

#[rstest]
fn derive_policy_writes_orderings_verbatim() {
    let task_map = tasks(&[("a", "todo")]);
    let column_map = columns(&[("todo", &[]), ("done", &["a"])]);

    let written = OrderingPolicy::Derive.settle_for_write(&task_map, column_map.clone());
    assert_eq!(written, column_map);

    let read = OrderingPolicy::Derive.settle_for_read(&task_map, &written);
    assert_eq!(ordering(&read, "todo"), vec!["a"]);
}

#[rstest]
fn preserve_policy_settles_writes() {
    let task_map = tasks(&[("a", "todo")]);
    let column_map = columns(&[("todo", &[]), ("done", &["a"])]);

    let written = OrderingPolicy::Preserve.settle_for_write(&task_map, column_map);

    assert_eq!(ordering(&written, "todo"), vec!["a"]);
    assert!(ordering(&written, "done").is_empty());
}

#[rstest]
#[case("preserve", OrderingPolicy::Preserve)]
#[case(" Derive ", OrderingPolicy::Derive)]
fn policy_parses_by_name(#[case] raw: &str, #[case] expected: OrderingPolicy) {
    assert_eq!(raw.parse::<OrderingPolicy>(), Ok(expected));
}

#[rstest]
fn policy_rejects_unknown_name() {
    assert!("sorted".parse::<OrderingPolicy>().is_err());
}
