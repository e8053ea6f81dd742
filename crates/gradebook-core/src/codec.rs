//! Pipe-delimited line codec for student records.
//!
//! One student per line:
//!
//! ```text
//! <roll_no>|<name>[|<subject>:<marks>...]
//! ```
//!
//! Neither `|` nor `:` is escaped. A name or subject containing either will
//! not survive a round trip.

use crate::error::{DecodeError, SubjectFieldError};
use crate::model::{RollNo, Student};

pub const FIELD_SEPARATOR: char = '|';
pub const MARKS_SEPARATOR: char = ':';

/// Encode a student as a single line, without the trailing newline.
pub fn encode(student: &Student) -> String {
    let mut line = format!(
        "{}{FIELD_SEPARATOR}{}",
        student.roll_no(),
        student.name()
    );
    for subject in student.subjects() {
        line.push(FIELD_SEPARATOR);
        line.push_str(&subject.name);
        line.push(MARKS_SEPARATOR);
        line.push_str(&subject.marks.to_string());
    }
    line
}

/// A decoded student plus any subject fields that had to be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLine {
    pub student: Student,
    pub skipped: Vec<SkippedField>,
}

/// A subject field dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    /// Raw field text.
    pub field: String,
    pub reason: SubjectFieldError,
}

/// Decode a line, discarding the list of skipped subject fields.
pub fn decode(line: &str) -> Result<Student, DecodeError> {
    decode_line(line).map(|decoded| decoded.student)
}

/// Decode a line into a student.
///
/// The line fails as a whole only when the roll number or name is missing
/// or unusable. A malformed subject field is dropped and reported in
/// [`DecodedLine::skipped`].
pub fn decode_line(line: &str) -> Result<DecodedLine, DecodeError> {
    let fields = split_fields(line.trim());
    if fields.len() < 2 {
        return Err(DecodeError::MissingFields {
            found: fields.len(),
        });
    }

    let roll_no: RollNo = fields[0]
        .parse()
        .map_err(|_| DecodeError::InvalidRollNo(fields[0].to_string()))?;
    let mut student = Student::new(roll_no, fields[1]).map_err(|_| DecodeError::MissingName)?;

    let mut skipped = Vec::new();
    for field in &fields[2..] {
        if let Err(reason) = decode_subject(&mut student, field) {
            skipped.push(SkippedField {
                field: field.to_string(),
                reason,
            });
        }
    }

    Ok(DecodedLine { student, skipped })
}

fn decode_subject(student: &mut Student, field: &str) -> Result<(), SubjectFieldError> {
    let (name, marks) = field
        .split_once(MARKS_SEPARATOR)
        .ok_or_else(|| SubjectFieldError::NotAPair(field.to_string()))?;
    let marks: i64 = marks
        .parse()
        .map_err(|_| SubjectFieldError::InvalidMarks(field.to_string()))?;
    student.add_subject(name, marks)?;
    Ok(())
}

/// Split on `|`, dropping trailing empty fields so `7|Alice|` reads the same
/// as `7|Alice`.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}
