// End-to-end flows through the store and the aggregation views

use chrono::NaiveDate;
use liftlog_app_lib::config::{AppConfig, BackendKind};
use liftlog_app_lib::db::migrations;
use liftlog_app_lib::db::{DocumentBackend, FileBackend, SqliteBackend};
use liftlog_app_lib::services::aggregation::{tabulate, volume_series};
use liftlog_app_lib::{WorkoutEntry, WorkoutHistory, WorkoutSet, WorkoutStore};
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn sample_history() -> WorkoutHistory {
    let mut history = WorkoutHistory::new();
    history.insert(
        "Combo 1".to_string(),
        vec![
            WorkoutEntry::new(
                date(2024, 1, 2),
                "Combo 1",
                "Barbell bench press",
                vec![WorkoutSet::new(8, 60.0), WorkoutSet::new(6, 62.5)],
            ),
            WorkoutEntry::new(
                date(2024, 1, 2),
                "Combo 1",
                "Leg raises",
                vec![WorkoutSet::new(15, 0.0)],
            ),
        ],
    );
    history.insert(
        "Combo 2".to_string(),
        vec![WorkoutEntry::new(
            date(2024, 1, 4),
            "Combo 2",
            "Barbell Squat",
            vec![WorkoutSet::new(5, 100.0)],
        )],
    );
    history
}

fn assert_round_trip<B: DocumentBackend>(store: &WorkoutStore<B>) {
    let history = sample_history();
    store.save("athlete-1", &history).expect("save history");
    assert_eq!(store.load("athlete-1"), history);
}

#[test]
fn file_backend_round_trips_canonical_history() {
    let dir = tempdir().expect("temp dir");
    let store = WorkoutStore::new(FileBackend::new(dir.path()).expect("file backend"));
    assert_round_trip(&store);
}

#[test]
fn sqlite_backend_round_trips_canonical_history() {
    let dir = tempdir().expect("temp dir");
    let store = WorkoutStore::new(
        SqliteBackend::open(dir.path().join("test.sqlite")).expect("sqlite backend"),
    );
    assert_round_trip(&store);
}

#[test]
fn sqlite_backend_records_schema_migration() {
    let dir = tempdir().expect("temp dir");
    let backend = SqliteBackend::open(dir.path().join("test.sqlite")).expect("sqlite backend");

    let history = backend
        .pool()
        .with_connection(|conn| migrations::get_migration_history(conn))
        .expect("migration history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].version, 1);

    backend.write("athlete-1", "{}").expect("write");
    backend.purge("athlete-1").expect("purge");
    assert!(backend.read("athlete-1").expect("read").is_none());
}

#[test]
fn recorded_entries_feed_both_views() {
    let dir = tempdir().expect("temp dir");
    let store = WorkoutStore::new(FileBackend::new(dir.path()).expect("file backend"));

    store
        .record_on("athlete-1", "Combo 1", "Bench", &[WorkoutSet::new(5, 50.0)], date(2024, 1, 1))
        .expect("first entry");
    store
        .record_on("athlete-1", "Combo 1", "Bench", &[WorkoutSet::new(5, 60.0)], date(2024, 1, 1))
        .expect("second entry");
    store
        .record_on("athlete-1", "Combo 2", "Squat", &[WorkoutSet::new(5, 100.0)], date(2024, 1, 2))
        .expect("third entry");

    let snapshot = store.snapshot("athlete-1");
    let rows = tabulate(&snapshot);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].exercise, "Bench");
    assert_eq!(rows[2].date, date(2024, 1, 2));

    let series = volume_series(&snapshot);
    assert_eq!(series["Bench"].len(), 1);
    assert_eq!(series["Bench"][0].volume, 2200.0);
    assert_eq!(series["Squat"][0].volume, 500.0);
}

#[test]
fn owners_do_not_share_history() {
    let dir = tempdir().expect("temp dir");
    let store = WorkoutStore::new(FileBackend::new(dir.path()).expect("file backend"));

    store
        .record_on("alice", "Combo 3", "Db Front raise", &[WorkoutSet::new(12, 8.0)], date(2024, 5, 1))
        .expect("alice entry");

    assert_eq!(store.snapshot("alice").len(), 1);
    assert!(store.load("bob").is_empty());
}

#[test]
fn clear_leaves_empty_views() {
    let dir = tempdir().expect("temp dir");
    let store = WorkoutStore::new(FileBackend::new(dir.path()).expect("file backend"));
    store.save("athlete-1", &sample_history()).expect("save");

    store.clear("athlete-1").expect("clear");

    assert!(store.load("athlete-1").is_empty());
    let snapshot = store.snapshot("athlete-1");
    assert!(tabulate(&snapshot).is_empty());
    assert!(volume_series(&snapshot).is_empty());
}

#[test]
fn configured_store_uses_selected_backend() {
    let dir = tempdir().expect("temp dir");
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        backend: BackendKind::Sqlite,
        ..AppConfig::default()
    };

    let store = config.open_store().expect("store");
    store
        .record_on("athlete-1", "Combo 4", "Bicep 21", &[WorkoutSet::new(21, 10.0)], date(2024, 2, 1))
        .expect("entry");

    assert!(config.sqlite_path().exists());
    assert_eq!(store.snapshot("athlete-1").len(), 1);
}
