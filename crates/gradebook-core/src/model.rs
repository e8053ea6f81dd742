//! Core data model types for gradebook.
//!
//! A [`Student`] owns an ordered list of subject marks and derives its total,
//! average, and [`Grade`] from them.

use std::fmt;

use crate::error::StudentError;

/// Operator-assigned student identifier.
pub type RollNo = i64;

/// Inclusive upper bound for a subject's marks.
pub const MAX_MARKS: i64 = 100;

/// Marks recorded for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// Subject name as entered.
    pub name: String,
    /// Marks in `0..=100`.
    pub marks: u8,
}

/// A student and their subject marks.
///
/// Subjects keep insertion order; re-adding a subject replaces its marks in
/// place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    roll_no: RollNo,
    name: String,
    subjects: Vec<Subject>,
}

impl Student {
    /// Create a student with no subjects.
    ///
    /// Fails with [`StudentError::EmptyName`] when `name` is blank.
    pub fn new(roll_no: RollNo, name: impl Into<String>) -> Result<Self, StudentError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StudentError::EmptyName);
        }
        Ok(Self {
            roll_no,
            name,
            subjects: Vec::new(),
        })
    }

    pub fn roll_no(&self) -> RollNo {
        self.roll_no
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subjects in insertion order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }


    /// Record marks for a subject.
    ///
    /// Out-of-range marks are rejected and the subject list is left as it
    /// was. An existing subject keeps its position and takes the new marks.
    pub fn add_subject(&mut self, name: impl Into<String>, marks: i64) -> Result<(), StudentError> {
        let name = name.into();
        let marks = match u8::try_from(marks) {
            Ok(m) if i64::from(m) <= MAX_MARKS => m,
            _ => return Err(StudentError::InvalidMarks { subject: name, marks }),
        };

        match self.subjects.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.marks = marks,
            None => self.subjects.push(Subject { name, marks }),
        }
        Ok(())
    }

    /// Sum of all marks; 0 with no subjects.
    pub fn total(&self) -> u32 {
        self.subjects.iter().map(|s| u32::from(s.marks)).sum()
    }

    /// Mean marks per subject; exactly 0.0 with no subjects.
    pub fn average(&self) -> f64 {
        if self.subjects.is_empty() {
            return 0.0;
        }
        f64::from(self.total()) / self.subjects.len() as f64
    }

    pub fn grade(&self) -> Grade {
        Grade::from_average(self.average())
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Roll No: {} | Name: {} | Total: {} | Avg: {:.2} | Grade: {}",
            self.roll_no,
            self.name,
            self.total(),
            self.average(),
            self.grade()
        )?;
        writeln!(f, "Subjects:")?;
        for subject in &self.subjects {
            writeln!(f, "  {}: {}", subject.name, subject.marks)?;
        }
        Ok(())
    }
}

/// Letter grade derived from average marks.
///
/// Variants are ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 6] = [Grade::APlus, Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// Map an average onto a grade. Each threshold is inclusive.
    pub fn from_average(average: f64) -> Self {
        if average >= 90.0 {
            Grade::APlus
        } else if average >= 80.0 {
            Grade::A
        } else if average >= 70.0 {
            Grade::B
        } else if average >= 60.0 {
            Grade::C
        } else if average >= 50.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
