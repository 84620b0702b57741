//! Read-only views over a snapshot of workout entries.
//!
//! Every function here is pure: it takes entries by reference and returns a
//! fresh structure, so `tabulate` and `volume_series` can be called on the
//! same snapshot in any order.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::models::analytics::{GroupTotals, VolumePoint, VolumeSeries, WorkoutRow};
use crate::models::workout::{is_reserved_day, WorkoutEntry, WorkoutHistory};

type GroupKey = (NaiveDate, String);

#[derive(Default)]
struct GroupAccumulator {
    sets: u64,
    reps: u64,
    weight: f64,
}

/// All entries of all workout days, in document order then append order.
pub fn flatten(history: &WorkoutHistory) -> Vec<WorkoutEntry> {
    history
        .iter()
        .filter(|(day, _)| !is_reserved_day(day))
        .flat_map(|(_, entries)| entries.iter().cloned())
        .collect()
}

/// One row per entry, ordered by `(date, exercise)`. Entries sharing a key
/// keep their relative order.
pub fn tabulate(entries: &[WorkoutEntry]) -> Vec<WorkoutRow> {
    let mut ordered: Vec<&WorkoutEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| (a.date, &a.exercise).cmp(&(b.date, &b.exercise)));

    let rows: Vec<WorkoutRow> = ordered
        .into_iter()
        .map(|entry| WorkoutRow {
            date: entry.date,
            exercise: entry.exercise.clone(),
            set_count: entry.sets.len(),
            reps_per_set: entry.sets.iter().map(|set| set.reps).collect(),
            weight_per_set: entry.sets.iter().map(|set| set.weight).collect(),
        })
        .collect();

    debug!(target: "app::aggregation", rows = rows.len(), "tabulated entries");
    rows
}

/// Totals per `(date, exercise)` group, ascending by that key.
pub fn group_totals(entries: &[WorkoutEntry]) -> Vec<GroupTotals> {
    let mut groups: BTreeMap<GroupKey, GroupAccumulator> = BTreeMap::new();

    for entry in entries {
        let group = groups
            .entry((entry.date, entry.exercise.clone()))
            .or_default();
        group.sets += entry.sets.len() as u64;
        group.reps += entry.total_reps();
        group.weight += entry.total_weight();
    }

    groups
        .into_iter()
        .map(|((date, exercise), group)| GroupTotals {
            date,
            exercise,
            total_sets: group.sets,
            total_reps: group.reps,
            total_weight: group.weight,
            volume: volume(group.sets, group.reps, group.weight),
        })
        .collect()
}

/// Per exercise, the volume of each logged date in ascending date order.
pub fn volume_series(entries: &[WorkoutEntry]) -> VolumeSeries {
    let mut series = VolumeSeries::new();

    for totals in group_totals(entries) {
        series
            .entry(totals.exercise)
            .or_insert_with(Vec::new)
            .push(VolumePoint {
                date: totals.date,
                volume: totals.volume,
            });
    }

    debug!(target: "app::aggregation", exercises = series.len(), "built volume series");
    series
}

/// Distinct exercise names, sorted.
pub fn exercises(entries: &[WorkoutEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.exercise.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn volume(sets: u64, reps: u64, weight: f64) -> f64 {
    sets as f64 * reps as f64 * weight
}
