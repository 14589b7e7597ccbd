// tests/end_to_end.rs
//! A small workspace pulled end to end, into memory and onto disk.

mod common;

use common::*;
use notion_pull::{
    FileSystemSink, MemorySink, Orchestrator, PropertyKind, PropertySchema, PropertyTypeValue,
};
use pretty_assertions::assert_eq;

const NOTES_DOCUMENT: &str = "---
title: \"Notes\"
created: 2024-03-01T09:00:00.000Z
last_edited: 2024-03-02T17:45:30.000Z
---

Hello

**[Tasks](./Tasks/_index.csv)**
";

const TASKS_INDEX: &str = "Title,Done\nBuy milk,false\n";

fn workspace() -> MockNotion {
    let schema = PropertySchema::default()
        .with_property("Done", "done", PropertyKind::Checkbox)
        .with_property("Title", "title", PropertyKind::Title);
    let buy_milk = entry_in(
        "Title",
        3,
        "Buy milk",
        vec![("Done", PropertyTypeValue::Checkbox { checkbox: false })],
    );

    MockNotion::new()
        .with_page(
            page(1, "Notes"),
            vec![paragraph(1, "Hello"), child_database(2, "Tasks")],
        )
        .with_database(2, "Tasks", schema, vec![buy_milk])
}

#[tokio::test]
async fn test_notes_with_task_database_in_memory() {
    let notion = workspace();
    let sink = MemorySink::new();

    let report = Orchestrator::new(&notion, &sink)
        .pull(&id(1), 1)
        .await
        .unwrap();

    let documents = sink.documents().await;
    assert_eq!(
        documents.keys().collect::<Vec<_>>(),
        vec!["Notes.md", "Notes/Tasks/_index.csv"]
    );
    assert_eq!(documents["Notes.md"], NOTES_DOCUMENT);
    assert_eq!(documents["Notes/Tasks/_index.csv"], TASKS_INDEX);

    assert_eq!(report.pages_written, 1);
    assert_eq!(report.databases_written, 1);
    assert_eq!(report.entries_written, 0);
    assert_eq!(
        report.to_string(),
        "1 pages, 1 databases, 0 entry documents written"
    );
}

#[tokio::test]
async fn test_notes_with_task_database_on_disk() {
    let notion = workspace();
    let output = tempfile::tempdir().unwrap();
    let sink = FileSystemSink::new(output.path());

    Orchestrator::new(&notion, &sink)
        .pull(&id(1), 1)
        .await
        .unwrap();

    let notes = std::fs::read_to_string(output.path().join("Notes.md")).unwrap();
    assert_eq!(notes, NOTES_DOCUMENT);

    let index = std::fs::read_to_string(output.path().join("Notes/Tasks/_index.csv")).unwrap();
    assert_eq!(index, TASKS_INDEX);
}

#[tokio::test]
async fn test_database_root_writes_index_under_its_title() {
    let notion = workspace();
    let sink = MemorySink::new();

    Orchestrator::new(&notion, &sink)
        .pull(&id(2), 0)
        .await
        .unwrap();

    assert_eq!(sink.get("Tasks/_index.csv").await.as_deref(), Some(TASKS_INDEX));
    assert_eq!(sink.documents().await.len(), 1);
}

#[tokio::test]
async fn test_rerun_overwrites_previous_export() {
    let notion = workspace();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(output.path().join("Notes.md"), "stale").unwrap();
    let sink = FileSystemSink::new(output.path());

    Orchestrator::new(&notion, &sink)
        .pull(&id(1), 0)
        .await
        .unwrap();

    let notes = std::fs::read_to_string(output.path().join("Notes.md")).unwrap();
    assert_eq!(notes, NOTES_DOCUMENT);
}
