//! The `gradebook report` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::roster::Roster;
use gradebook_core::statistics::RosterSummary;
use gradebook_core::store;

pub fn execute(data_file: PathBuf) -> Result<()> {
    let roster = match store::load(&data_file)? {
        Some(report) => report.roster,
        None => Roster::new(),
    };

    if roster.is_empty() {
        println!("No students found.");
        return Ok(());
    }

    println!("{}", student_table(&roster));
    print_summary(&RosterSummary::compute(&roster));
    Ok(())
}

fn student_table(roster: &Roster) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Roll No", "Name", "Subjects", "Total", "Avg", "Grade"]);

    for student in roster {
        table.add_row(vec![
            Cell::new(student.roll_no()),
            Cell::new(student.name()),
            Cell::new(student.subjects().len()),
            Cell::new(student.total()),
            Cell::new(format!("{:.2}", student.average())),
            Cell::new(student.grade()),
        ]);
    }

    table
}

fn print_summary(summary: &RosterSummary) {
    println!(
        "\nStudents: {} | Class average: {:.2} ({})",
        summary.students,
        summary.class_average,
        summary.class_grade()
    );
    if let Some(top) = &summary.highest {
        println!("Highest: {} (Roll No {}) {:.2}", top.name, top.roll_no, top.average);
    }
    if let Some(bottom) = &summary.lowest {
        println!(
            "Lowest: {} (Roll No {}) {:.2}",
            bottom.name, bottom.roll_no, bottom.average
        );
    }

    let distribution: Vec<String> = summary
        .grade_distribution
        .iter()
        .map(|(grade, count)| format!("{grade}: {count}"))
        .collect();
    println!("Grades: {}", distribution.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::codec;

    #[test]
    fn table_has_one_row_per_student() {
        let mut roster = Roster::new();
        for line in ["1|Alice|Math:95|Art:85", "2|Bob"] {
            roster.add(codec::decode(line).unwrap()).unwrap();
        }
        let table = student_table(&roster);
        assert_eq!(table.row_iter().count(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("Alice"));
        assert!(rendered.contains("90.00"));
        assert!(rendered.contains("A+"));
    }
}
