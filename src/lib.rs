//! Workout history store and aggregation engine.
//!
//! The presentation layer hands plain values to [`WorkoutStore`] and renders
//! whatever [`services::aggregation`] derives from a loaded snapshot.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use models::workout::{EntryDraft, WorkoutEntry, WorkoutHistory, WorkoutSet};
pub use services::workout_store::WorkoutStore;
