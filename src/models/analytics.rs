use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One table row per logged entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRow {
    pub date: NaiveDate,
    pub exercise: String,
    pub set_count: usize,
    pub reps_per_set: Vec<u32>,
    pub weight_per_set: Vec<f64>,
}

/// Totals for one (date, exercise) group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupTotals {
    pub date: NaiveDate,
    pub exercise: String,
    pub total_sets: u64,
    pub total_reps: u64,
    pub total_weight: f64,
    /// `total_sets * total_reps * total_weight`.
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub volume: f64,
}

/// Exercise name -> volume points in ascending date order.
pub type VolumeSeries = BTreeMap<String, Vec<VolumePoint>>;
