//! In-memory roster of students, kept in insertion order.

use crate::error::StudentError;
use crate::model::{RollNo, Student};

/// Ordered collection of students with unique roll numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the student holding `roll_no`.
    pub fn find_by_roll(&self, roll_no: RollNo) -> Option<&Student> {
        self.students.iter().find(|s| s.roll_no() == roll_no)
    }

    pub fn contains(&self, roll_no: RollNo) -> bool {
        self.find_by_roll(roll_no).is_some()
    }

    /// Append a student to the end of the roster.
    ///
    /// A roll number already present is refused and the roster is left
    /// unchanged.
    pub fn add(&mut self, student: Student) -> Result<(), StudentError> {
        if self.contains(student.roll_no()) {
            return Err(StudentError::DuplicateRollNo(student.roll_no()));
        }
        self.students.push(student);
        Ok(())
    }

    /// Every student in roster order.
    pub fn all(&self) -> &[Student] {
        &self.students
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Student> {
        self.students.iter()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Student;
    type IntoIter = std::slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
