// Recovery on read, propagation on write

use std::fs;

use chrono::NaiveDate;
use liftlog_app_lib::db::FileBackend;
use liftlog_app_lib::{AppError, EntryDraft, WorkoutSet, WorkoutStore};
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn corrupt_documents_load_as_empty_history() {
    let dir = tempdir().expect("temp dir");
    let backend = FileBackend::new(dir.path()).expect("file backend");

    let cases = [
        ("truncated", r#"{"Combo 1": [{"date": "2024-01-01", "exercise": "Leg"#),
        ("not-json", "this is not json"),
        ("array-root", "[1, 2, 3]"),
        ("empty", ""),
    ];
    for (owner, content) in cases {
        fs::write(backend.document_path(owner), content).expect("seed corrupt file");
    }

    let store = WorkoutStore::new(backend);
    for (owner, _) in cases {
        assert!(store.load(owner).is_empty(), "owner {owner}");
        assert!(store.snapshot(owner).is_empty(), "owner {owner}");
    }
}

#[test]
fn corrupt_document_does_not_block_new_entries() {
    let dir = tempdir().expect("temp dir");
    let backend = FileBackend::new(dir.path()).expect("file backend");
    fs::write(backend.document_path("athlete"), "{{{").expect("seed corrupt file");

    let store = WorkoutStore::new(backend);
    store
        .record_on("athlete", "Combo 5", "Dumbbell lunge", &[WorkoutSet::new(10, 14.0)], date(2024, 6, 1))
        .expect("record over corrupt document");

    assert_eq!(store.snapshot("athlete").len(), 1);
}

#[test]
fn unreadable_document_path_loads_as_empty() {
    let dir = tempdir().expect("temp dir");
    let backend = FileBackend::new(dir.path()).expect("file backend");
    fs::create_dir_all(backend.document_path("athlete")).expect("directory in place of document");

    let store = WorkoutStore::new(backend);
    assert!(store.load("athlete").is_empty());
}

#[test]
fn write_failure_is_returned_and_draft_survives() {
    let dir = tempdir().expect("temp dir");
    let root = dir.path().join("documents");
    let backend = FileBackend::new(&root).expect("file backend");

    // Replace the document directory with a plain file so every write fails.
    fs::remove_dir_all(&root).expect("remove root");
    fs::write(&root, "occupied").expect("file in place of root");

    let store = WorkoutStore::new(backend);
    let mut draft = EntryDraft::new("Combo 1", "Barbell bench press");
    draft.push_set(8, 60.0);

    let err = store.submit("athlete", &draft).expect_err("write must fail");
    assert!(err.is_write_failure(), "unexpected error {err:?}");
    assert_eq!(draft.sets(), &[WorkoutSet::new(8, 60.0)]);

    assert!(store.clear("athlete").is_err());
    assert!(store.load("athlete").is_empty());
}

#[test]
fn incomplete_draft_is_a_validation_error() {
    let dir = tempdir().expect("temp dir");
    let store = WorkoutStore::new(FileBackend::new(dir.path()).expect("file backend"));

    let draft = EntryDraft::new("Combo 1", "Barbell bench press");
    let err = store.submit("athlete", &draft).expect_err("no sets");
    assert!(matches!(err, AppError::Validation { .. }));
    assert!(store.load("athlete").is_empty());
}
