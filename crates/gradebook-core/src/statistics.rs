//! Roster-level aggregate statistics.

use std::collections::BTreeMap;

use crate::model::{Grade, RollNo};
use crate::roster::Roster;

/// A student's average, tagged with their roll number.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub roll_no: RollNo,
    pub name: String,
    pub average: f64,
}

/// Summary across every student on a roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSummary {
    pub students: usize,
    /// Mean of per-student averages; 0.0 for an empty roster.
    pub class_average: f64,
    /// Highest average. Ties go to the student listed first.
    pub highest: Option<Standing>,
    /// Lowest average. Ties go to the student listed first.
    pub lowest: Option<Standing>,
    /// Student count per grade, best grade first. Every grade is present.
    pub grade_distribution: BTreeMap<Grade, usize>,
}

impl RosterSummary {
    pub fn compute(roster: &Roster) -> Self {
        let mut grade_distribution: BTreeMap<Grade, usize> =
            Grade::ALL.iter().map(|&g| (g, 0)).collect();
        let mut highest: Option<Standing> = None;
        let mut lowest: Option<Standing> = None;
        let mut sum = 0.0;

        for student in roster {
            let average = student.average();
            sum += average;
            *grade_distribution.entry(student.grade()).or_default() += 1;

            let standing = || Standing {
                roll_no: student.roll_no(),
                name: student.name().to_string(),
                average,
            };
            if highest.as_ref().map_or(true, |h| average > h.average) {
                highest = Some(standing());
            }
            if lowest.as_ref().map_or(true, |l| average < l.average) {
                lowest = Some(standing());
            }
        }

        let class_average = if roster.is_empty() {
            0.0
        } else {
            sum / roster.len() as f64
        };

        Self {
            students: roster.len(),
            class_average,
            highest,
            lowest,
            grade_distribution,
        }
    }

    /// Class average mapped onto the grade scale.
    pub fn class_grade(&self) -> Grade {
        Grade::from_average(self.class_average)
    }
}
