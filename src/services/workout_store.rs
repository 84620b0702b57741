use chrono::{Local, NaiveDate};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::db::DocumentBackend;
use crate::error::{AppError, AppResult};
use crate::models::workout::{
    is_reserved_day, validate_submission, EntryDraft, StoredDocument, WorkoutEntry,
    WorkoutHistory, WorkoutSet,
};
use crate::services::aggregation;
use crate::services::normalizer::parse_document;

const EMPTY_DOCUMENT: &str = "{}";

/// Owns the persisted history of every owner key on one backend.
///
/// `load` is best effort: a missing, unreadable or corrupt document loads as
/// an empty history. Read-modify-write operations only tolerate a missing or
/// corrupt document; a backend read error aborts them before anything is
/// written. Writes are a single attempt and their errors are returned
/// unchanged.
pub struct WorkoutStore<B: DocumentBackend> {
    backend: B,
}

impl<B: DocumentBackend> WorkoutStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn load(&self, owner: &str) -> WorkoutHistory {
        match self.backend.read(owner) {
            Ok(Some(content)) => {
                let history = parse_document(&content).history;
                debug!(
                    target: "app::store",
                    owner,
                    days = history.len(),
                    "history loaded"
                );
                history
            }
            Ok(None) => {
                debug!(target: "app::store", owner, "no history yet");
                WorkoutHistory::new()
            }
            Err(err) => {
                warn!(
                    target: "app::store",
                    owner,
                    error = %err,
                    "history unreadable, treating as empty"
                );
                WorkoutHistory::new()
            }
        }
    }

    /// Every entry across all workout days, reserved keys excluded.
    pub fn snapshot(&self, owner: &str) -> Vec<WorkoutEntry> {
        aggregation::flatten(&self.load(owner))
    }

    /// Replaces the owner's whole document with `history`.
    pub fn save(&self, owner: &str, history: &WorkoutHistory) -> AppResult<()> {
        self.write_document(owner, history, &Map::new())?;
        debug!(target: "app::store", owner, days = history.len(), "history saved");
        Ok(())
    }

    pub fn append(&self, owner: &str, day: &str, entry: &WorkoutEntry) -> AppResult<()> {
        let mut document = self.load_for_update(owner)?;
        document
            .history
            .entry(day.to_string())
            .or_default()
            .push(entry.clone());
        self.write_document(owner, &document.history, &document.extras)?;
        info!(
            target: "app::store",
            owner,
            day,
            exercise = %entry.exercise,
            sets = entry.sets.len(),
            "workout entry appended"
        );
        Ok(())
    }

    pub fn clear(&self, owner: &str) -> AppResult<()> {
        self.backend.write(owner, EMPTY_DOCUMENT)?;
        info!(target: "app::store", owner, "history cleared");
        Ok(())
    }

    /// Logs a completed exercise for today and returns the stored entry.
    pub fn record(
        &self,
        owner: &str,
        day: &str,
        exercise: &str,
        sets: &[WorkoutSet],
    ) -> AppResult<WorkoutEntry> {
        self.record_on(owner, day, exercise, sets, today())
    }

    pub fn record_on(
        &self,
        owner: &str,
        day: &str,
        exercise: &str,
        sets: &[WorkoutSet],
        date: NaiveDate,
    ) -> AppResult<WorkoutEntry> {
        ensure_workout_day(day)?;
        validate_submission(exercise, sets)?;

        let entry = WorkoutEntry::new(date, day, exercise, sets.to_vec());
        self.append(owner, day, &entry)?;
        Ok(entry)
    }

    fn load_for_update(&self, owner: &str) -> AppResult<StoredDocument> {
        match self.backend.read(owner) {
            Ok(Some(content)) => Ok(parse_document(&content)),
            Ok(None) => Ok(StoredDocument::default()),
            Err(err) => {
                warn!(
                    target: "app::store",
                    owner,
                    error = %err,
                    "history unreadable, refusing to rewrite it"
                );
                Err(err)
            }
        }
    }

    fn write_document(
        &self,
        owner: &str,
        history: &WorkoutHistory,
        extras: &Map<String, Value>,
    ) -> AppResult<()> {
        let mut root = Map::new();
        for (day, entries) in history {
            root.insert(day.clone(), serde_json::to_value(entries)?);
        }
        for (key, value) in extras {
            if !root.contains_key(key) {
                root.insert(key.clone(), value.clone());
            }
        }

        let document = serde_json::to_string(&Value::Object(root))?;
        self.backend.write(owner, &document)
    }

    /// Persists a finished draft. The draft is left untouched so a failed
    /// write can be retried.
    pub fn submit(&self, owner: &str, draft: &EntryDraft) -> AppResult<WorkoutEntry> {
        self.record(owner, draft.day(), draft.exercise(), draft.sets())
    }
}

fn ensure_workout_day(day: &str) -> AppResult<()> {
    if day.trim().is_empty() {
        return Err(AppError::validation("day label must not be empty"));
    }
    if is_reserved_day(day) {
        return Err(AppError::validation(format!(
            "day label '{day}' is reserved for bookkeeping"
        )));
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
