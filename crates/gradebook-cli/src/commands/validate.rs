//! The `gradebook validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::store;

pub fn execute(data_file: PathBuf) -> Result<()> {
    let Some(report) = store::load(&data_file)? else {
        anyhow::bail!("data file not found: {}", data_file.display());
    };

    println!(
        "Data file: {} ({} students)",
        data_file.display(),
        report.roster.len()
    );

    for skipped in &report.skipped_lines {
        println!(
            "  [line {}] WARNING: record skipped: {} ({:?})",
            skipped.line_no, skipped.reason, skipped.content
        );
    }
    for skipped in &report.skipped_subjects {
        println!(
            "  [line {}] WARNING: subject field skipped: {}",
            skipped.line_no, skipped.field.reason
        );
    }

    if report.is_clean() {
        println!("Data file valid.");
    } else {
        let total_warnings = report.skipped_lines.len() + report.skipped_subjects.len();
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
