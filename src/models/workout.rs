use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Persisted document shape: day label -> entries in append order. Day
/// labels keep the order they have in the stored document.
pub type WorkoutHistory = IndexMap<String, Vec<WorkoutEntry>>;

/// A loaded document: the workout days plus any non-list keys stored next
/// to them, which are written back untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredDocument {
    pub history: WorkoutHistory,
    pub extras: Map<String, Value>,
}

/// Suffix of bookkeeping keys that share the document with workout days.
pub const RESERVED_DAY_SUFFIX: &str = "_last";

pub fn is_reserved_day(day: &str) -> bool {
    day.ends_with(RESERVED_DAY_SUFFIX)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WorkoutSet {
    pub reps: u32,
    /// Kilograms.
    pub weight: f64,
}

impl WorkoutSet {
    pub fn new(reps: u32, weight: f64) -> Self {
        Self { reps, weight }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub day: String,
    pub exercise: String,
    pub sets: Vec<WorkoutSet>,
}

impl WorkoutEntry {
    pub fn new(
        date: NaiveDate,
        day: impl Into<String>,
        exercise: impl Into<String>,
        sets: Vec<WorkoutSet>,
    ) -> Self {
        Self {
            date,
            day: day.into(),
            exercise: exercise.into(),
            sets,
        }
    }

    pub fn total_reps(&self) -> u64 {
        self.sets.iter().map(|set| u64::from(set.reps)).sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.sets.iter().map(|set| set.weight).sum()
    }
}

/// An entry being filled in one set at a time.
///
/// Drafts are the only place an entry may have no sets; `finish` refuses to
/// produce a persisted entry until at least one set was added.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    day: String,
    exercise: String,
    sets: Vec<WorkoutSet>,
}

impl EntryDraft {
    pub fn new(day: impl Into<String>, exercise: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            exercise: exercise.into(),
            sets: Vec::new(),
        }
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    pub fn sets(&self) -> &[WorkoutSet] {
        &self.sets
    }

    pub fn push_set(&mut self, reps: u32, weight: f64) -> &mut Self {
        self.sets.push(WorkoutSet::new(reps, weight));
        self
    }

    pub fn remove_last_set(&mut self) -> Option<WorkoutSet> {
        self.sets.pop()
    }

    pub fn finish(self, date: NaiveDate) -> AppResult<WorkoutEntry> {
        validate_submission(&self.exercise, &self.sets)?;
        Ok(WorkoutEntry {
            date,
            day: self.day,
            exercise: self.exercise,
            sets: self.sets,
        })
    }
}

pub(crate) fn validate_submission(exercise: &str, sets: &[WorkoutSet]) -> AppResult<()> {
    if exercise.trim().is_empty() {
        return Err(AppError::validation("exercise name must not be empty"));
    }
    if sets.is_empty() {
        return Err(AppError::validation(
            "a completed entry needs at least one set",
        ));
    }
    Ok(())
}
