// Documents written by older revisions, read through the current store

use chrono::NaiveDate;
use liftlog_app_lib::db::{DocumentBackend, MemoryBackend};
use liftlog_app_lib::services::aggregation::{group_totals, tabulate, volume_series};
use liftlog_app_lib::{WorkoutSet, WorkoutStore};

const MIXED_DOCUMENT: &str = r#"{
    "Combo 2": [
        {"date": "2024-01-02", "day": "Combo 2", "exercise": "Barbell Squat", "sets": 3, "reps": 10, "weight": 20},
        {"date": "2024-01-01", "day": "Combo 2", "exercise": "Barbell Squat",
         "sets": [{"reps": 5, "weight": 80}, {"reps": 5, "weight": 85}]}
    ],
    "Combo 2_last": "Barbell Squat",
    "Combo 1": [
        {"date": "2024-01-01", "day": "Combo 1", "exercise": "Leg raises", "sets": 4}
    ]
}"#;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn seeded_store() -> WorkoutStore<MemoryBackend> {
    let backend = MemoryBackend::new();
    backend
        .insert_raw("legacy", MIXED_DOCUMENT)
        .expect("seed document");
    WorkoutStore::new(backend)
}

#[test]
fn flat_records_load_as_single_sets() {
    let store = seeded_store();
    let history = store.load("legacy");

    let flat = &history["Combo 2"][0];
    assert_eq!(flat.sets, vec![WorkoutSet::new(10, 20.0)]);

    let nested = &history["Combo 2"][1];
    assert_eq!(nested.sets.len(), 2);

    let count_only = &history["Combo 1"][0];
    assert!(count_only.sets.is_empty());
    assert!(!history.contains_key("Combo 2_last"));
}

#[test]
fn mixed_shapes_aggregate_consistently() {
    let store = seeded_store();
    let snapshot = store.snapshot("legacy");

    let rows = tabulate(&snapshot);
    let order: Vec<_> = rows
        .iter()
        .map(|row| (row.date, row.exercise.as_str(), row.set_count))
        .collect();
    assert_eq!(
        order,
        vec![
            (date(2024, 1, 1), "Barbell Squat", 2),
            (date(2024, 1, 1), "Leg raises", 0),
            (date(2024, 1, 2), "Barbell Squat", 1),
        ]
    );

    let totals = group_totals(&snapshot);
    let leg_raises = totals
        .iter()
        .find(|group| group.exercise == "Leg raises")
        .expect("leg raises group");
    assert_eq!(leg_raises.volume, 0.0);

    let series = volume_series(&snapshot);
    let squat: Vec<_> = series["Barbell Squat"]
        .iter()
        .map(|point| (point.date, point.volume))
        .collect();
    assert_eq!(
        squat,
        vec![
            (date(2024, 1, 1), 2.0 * 10.0 * 165.0),
            (date(2024, 1, 2), 1.0 * 10.0 * 20.0),
        ]
    );
    assert_eq!(series["Leg raises"].len(), 1);
}

#[test]
fn appending_rewrites_legacy_records_in_canonical_shape() {
    let store = seeded_store();
    store
        .record_on(
            "legacy",
            "Combo 2",
            "Db Bridges",
            &[WorkoutSet::new(12, 10.0)],
            date(2024, 1, 3),
        )
        .expect("append");

    let document = store
        .backend()
        .read("legacy")
        .expect("read")
        .expect("document present");
    let raw: serde_json::Value = serde_json::from_str(&document).expect("valid json");

    let rewritten = &raw["Combo 2"][0];
    assert!(rewritten["sets"].is_array());
    assert_eq!(rewritten["sets"][0]["reps"], 10);
    assert!(rewritten.get("reps").is_none());
    assert_eq!(raw["Combo 2"].as_array().map(Vec::len), Some(3));
    assert_eq!(raw["Combo 2_last"], "Barbell Squat");
}
