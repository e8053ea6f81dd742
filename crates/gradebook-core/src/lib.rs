//! gradebook-core — Student records, grading, and roster persistence.
//!
//! This crate holds everything the console front end drives: the student
//! model and its derived grades, the in-memory roster, the line codec used
//! for the data file, and configuration.

pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod roster;
pub mod statistics;
pub mod store;
