//! Gradebook error types.
//!
//! `StudentError` covers operator-facing validation failures that the
//! interactive controller recovers from. `DecodeError` covers a persisted
//! line that cannot be turned back into a student.

use thiserror::Error;

use crate::model::RollNo;

/// Errors raised while building or registering a student record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudentError {
    /// Marks fell outside the inclusive 0..=100 range.
    #[error("marks must be between 0 and 100, got {marks} for {subject:?}")]
    InvalidMarks { subject: String, marks: i64 },

    /// The student name was empty or whitespace.
    #[error("name cannot be empty")]
    EmptyName,

    /// A student with this roll number is already on the roster.
    #[error("student with roll number {0} already exists")]
    DuplicateRollNo(RollNo),
}

/// Errors raised while decoding one persisted line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The line has no `|` separating roll number and name.
    #[error("expected at least roll number and name, found {found} field(s)")]
    MissingFields { found: usize },

    /// The first field is not an integer.
    #[error("invalid roll number: {0:?}")]
    InvalidRollNo(String),

    /// The name field is empty.
    #[error("name field is empty")]
    MissingName,
}

/// Reasons a single `subject:marks` field is dropped from an otherwise
/// valid line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubjectFieldError {
    #[error("expected subject:marks, found {0:?}")]
    NotAPair(String),

    #[error("marks are not an integer in {0:?}")]
    InvalidMarks(String),

    #[error(transparent)]
    OutOfRange(#[from] StudentError),
}

/// Reasons a whole line is left out of a loaded roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Duplicate(#[from] StudentError),
}
