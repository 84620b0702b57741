//! Maps every record shape the history has ever been written in onto
//! [`WorkoutEntry`].
//!
//! Two shapes are accepted:
//!
//! * nested: `"sets": [{"reps": .., "weight": ..}, ..]`
//! * flat: scalar `"reps"` / `"weight"` next to a scalar `"sets"` count,
//!   read as a single set
//!
//! A `sets` list only counts as nested when every item is an object with
//! `reps` or `weight`. Normalization never fails. Anything unrecognized
//! falls back to an empty value so old history stays readable.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::models::workout::{StoredDocument, WorkoutEntry, WorkoutHistory, WorkoutSet};

/// Date given to records whose date is missing or unreadable.
pub const FALLBACK_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    Nested,
    Flat,
    Unrecognized,
}

pub fn detect_shape(record: &Value) -> RecordShape {
    let Some(fields) = record.as_object() else {
        return RecordShape::Unrecognized;
    };

    // A set list wins even if stray scalar reps/weight sit next to it.
    if let Some(Value::Array(items)) = fields.get("sets") {
        if items.iter().all(is_set_object) {
            return RecordShape::Nested;
        }
    }

    if is_scalar(fields.get("reps")) || is_scalar(fields.get("weight")) {
        return RecordShape::Flat;
    }

    RecordShape::Unrecognized
}

pub fn normalize(record: &Value) -> WorkoutEntry {
    normalize_with_day(record, "")
}

/// Like [`normalize`], but records without a `day` take `fallback_day`,
/// normally the document key the record was stored under.
pub fn normalize_with_day(record: &Value, fallback_day: &str) -> WorkoutEntry {
    let empty = Map::new();
    let fields = record.as_object().unwrap_or_else(|| {
        warn!(target: "app::normalizer", kind = value_kind(record), "record is not an object");
        &empty
    });

    let date = read_date(fields.get("date"));
    let exercise = match fields.get("exercise").and_then(Value::as_str) {
        Some(name) => name.to_string(),
        None => {
            warn!(target: "app::normalizer", %date, "record has no exercise name");
            String::new()
        }
    };
    let day = fields
        .get("day")
        .and_then(Value::as_str)
        .unwrap_or(fallback_day)
        .to_string();

    let sets = match detect_shape(record) {
        RecordShape::Nested => read_set_list(fields.get("sets")),
        RecordShape::Flat => {
            if let Some(count) = fields.get("sets") {
                debug!(
                    target: "app::normalizer",
                    exercise = %exercise,
                    legacy_count = %count,
                    "flat record, reading as a single set"
                );
            }
            vec![WorkoutSet::new(
                read_count(fields.get("reps")),
                read_weight(fields.get("weight")),
            )]
        }
        RecordShape::Unrecognized => {
            debug!(target: "app::normalizer", exercise = %exercise, "record carries no sets");
            Vec::new()
        }
    };

    WorkoutEntry {
        date,
        day,
        exercise,
        sets,
    }
}

/// Parses a whole persisted document. Unparsable content reads as no history.
pub fn normalize_document(content: &str) -> WorkoutHistory {
    parse_document(content).history
}

/// Like [`normalize_document`], but also keeps the non-list keys so a
/// rewrite can carry them over.
pub fn parse_document(content: &str) -> StoredDocument {
    let mut document = StoredDocument::default();
    if content.trim().is_empty() {
        return document;
    }

    let root = match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(root)) => root,
        Ok(other) => {
            warn!(
                target: "app::normalizer",
                kind = value_kind(&other),
                "document root is not an object, treating as empty"
            );
            return document;
        }
        Err(err) => {
            warn!(target: "app::normalizer", error = %err, "document is not valid JSON, treating as empty");
            return document;
        }
    };

    for (day, value) in root {
        match value {
            Value::Array(records) => {
                let entries = records
                    .iter()
                    .map(|record| normalize_with_day(record, &day))
                    .collect();
                document.history.insert(day, entries);
            }
            other => {
                debug!(
                    target: "app::normalizer",
                    day = %day,
                    kind = value_kind(&other),
                    "keeping non-list document key aside"
                );
                document.extras.insert(day, other);
            }
        }
    }

    document
}

fn read_set_list(value: Option<&Value>) -> Vec<WorkoutSet> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|set| {
            WorkoutSet::new(
                read_count(set.get("reps")),
                read_weight(set.get("weight")),
            )
        })
        .collect()
}

fn is_set_object(item: &Value) -> bool {
    item.as_object()
        .map(|set| set.contains_key("reps") || set.contains_key("weight"))
        .unwrap_or(false)
}

fn read_date(value: Option<&Value>) -> NaiveDate {
    let parsed = value.and_then(Value::as_str).and_then(|raw| {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
            .ok()
            .or_else(|| {
                raw.get(..10)
                    .and_then(|prefix| NaiveDate::parse_from_str(prefix, ISO_DATE_FORMAT).ok())
            })
    });

    parsed.unwrap_or_else(|| {
        warn!(target: "app::normalizer", raw = ?value, "unreadable entry date");
        FALLBACK_DATE
    })
}

fn read_count(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(number)) => {
            if let Some(count) = number.as_u64() {
                u32::try_from(count).unwrap_or(u32::MAX)
            } else {
                number.as_f64().map(float_to_count).unwrap_or(0)
            }
        }
        Some(Value::String(text)) => text.trim().parse::<f64>().map(float_to_count).unwrap_or(0),
        _ => 0,
    }
}

fn float_to_count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.trunc().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn read_weight(value: Option<&Value>) -> f64 {
    let weight = match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

fn is_scalar(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Number(_)) | Some(Value::String(_)))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
