pub mod aggregation;
pub mod normalizer;
pub mod workout_store;
