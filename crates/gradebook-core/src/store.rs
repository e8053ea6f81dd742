//! Whole-file persistence for a [`Roster`].
//!
//! The data file is read once in full at startup and rewritten in full at
//! shutdown. Saving goes through a temporary file in the same directory that
//! is renamed over the target, so a failed save leaves the old file in place.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::codec::{self, SkippedField};
use crate::error::LineError;
use crate::roster::Roster;

/// Outcome of loading a data file.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Every student that decoded cleanly, in file order.
    pub roster: Roster,
    /// Lines left out entirely.
    pub skipped_lines: Vec<SkippedLine>,
    /// Subject fields dropped from lines that were otherwise kept.
    pub skipped_subjects: Vec<SkippedSubject>,
}

impl LoadReport {
    /// Returns `true` if nothing in the file was discarded.
    pub fn is_clean(&self) -> bool {
        self.skipped_lines.is_empty() && self.skipped_subjects.is_empty()
    }
}

/// A line excluded from the roster.
#[derive(Debug, Clone)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_no: usize,
    pub content: String,
    pub reason: LineError,
}

/// A subject field dropped from a kept line.
#[derive(Debug, Clone)]
pub struct SkippedSubject {
    /// 1-based line number.
    pub line_no: usize,
    pub field: SkippedField,
}

/// Load a roster from `path`.
///
/// Returns `Ok(None)` when the file does not exist. Malformed lines and
/// duplicate roll numbers are skipped and recorded in the report; only an
/// I/O failure is returned as an error.
pub fn load(path: &Path) -> Result<Option<LoadReport>> {
    if !path.exists() {
        tracing::debug!("no data file at {}", path.display());
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read data file: {}", path.display()))?;

    let report = load_str(&content);
    tracing::debug!(
        "loaded {} student(s) from {} ({} line(s) skipped)",
        report.roster.len(),
        path.display(),
        report.skipped_lines.len()
    );
    Ok(Some(report))
}

/// Decode the full contents of a data file, skipping malformed lines.
///
/// This is the decode step of [`load`], run once the file has been read.
pub fn load_str(content: &str) -> LoadReport {
    let mut report = LoadReport::default();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let outcome = codec::decode_line(line)
            .map_err(LineError::from)
            .and_then(|decoded| {
                report.roster.add(decoded.student)?;
                Ok(decoded.skipped)
            });

        match outcome {
            Ok(skipped) => {
                for field in skipped {
                    tracing::warn!(
                        "line {line_no}: skipping subject field {:?}: {}",
                        field.field,
                        field.reason
                    );
                    report.skipped_subjects.push(SkippedSubject { line_no, field });
                }
            }
            Err(reason) => {
                tracing::warn!("line {line_no}: skipping record: {reason}");
                report.skipped_lines.push(SkippedLine {
                    line_no,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    report
}

/// Overwrite `path` with every student in `roster`, one line each.
pub fn save(path: &Path, roster: &Roster) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    for student in roster {
        writeln!(tmp, "{}", codec::encode(student))
            .with_context(|| format!("failed to write data for {}", path.display()))?;
    }
    tmp.flush()?;

    // The temp file is created owner-only; keep the mode of the file it replaces.
    if let Some(meta) = std::fs::metadata(path).ok().filter(|m| m.is_file()) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .with_context(|| format!("failed to copy permissions of {}", path.display()))?;
    }

    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write data file: {}", path.display()))?;

    tracing::debug!("saved {} student(s) to {}", roster.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, StudentError};
    use crate::model::Student;

    fn roster_of(lines: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for line in lines {
            roster.add(codec::decode(line).unwrap()).unwrap();
        }
        roster
    }

    #[test]
    fn bad_roll_number_skips_only_that_line() {
        let report = load_str("7|Alice|Math:70\nx|Bob|Math:80\n");
        assert_eq!(report.roster.len(), 1);
        let alice = report.roster.find_by_roll(7).unwrap();
        assert_eq!(alice.name(), "Alice");
        assert_eq!(codec::encode(alice), "7|Alice|Math:70");

        assert_eq!(report.skipped_lines.len(), 1);
        let skipped = &report.skipped_lines[0];
        assert_eq!(skipped.line_no, 2);
        assert_eq!(
            skipped.reason,
            LineError::Decode(DecodeError::InvalidRollNo("x".into()))
        );
    }

    #[test]
    fn blank_lines_ignored() {
        let report = load_str("\n1|A\n   \n\n2|B|Math:50\n");
        assert_eq!(report.roster.len(), 2);
        assert!(report.is_clean());
    }

    #[test]
    fn later_duplicate_is_skipped() {
        let report = load_str("1|A|Math:10\n1|Imposter|Math:99\n");
        assert_eq!(report.roster.len(), 1);
        assert_eq!(report.roster.find_by_roll(1).unwrap().name(), "A");
        assert_eq!(
            report.skipped_lines[0].reason,
            LineError::Duplicate(StudentError::DuplicateRollNo(1))
        );
    }

    #[test]
    fn skipped_subjects_recorded_with_line_numbers() {
        let report = load_str("1|A|Math:10\n2|B|Art|PE:70\n");
        assert_eq!(report.roster.len(), 2);
        assert_eq!(report.skipped_subjects.len(), 1);
        assert_eq!(report.skipped_subjects[0].line_no, 2);
        assert_eq!(report.skipped_subjects[0].field.field, "Art");
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load(&dir.path().join("students.txt")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        let roster = roster_of(&["7|Alice|Math:70|Art:95", "3|Bob", "9|Carol|PE:40"]);

        save(&path, &roster).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "7|Alice|Math:70|Art:95\n3|Bob\n9|Carol|PE:40\n");

        let report = load(&path).unwrap().unwrap();
        assert_eq!(report.roster, roster);
    }

    #[test]
    fn empty_roster_saves_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        std::fs::write(&path, "1|Old|Math:1\n").unwrap();

        save(&path, &Roster::new()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        let report = load(&path).unwrap().unwrap();
        assert!(report.roster.is_empty());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("students.txt");
        let mut roster = Roster::new();
        roster.add(Student::new(1, "A").unwrap()).unwrap();

        assert!(save(&path, &roster).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn failed_save_keeps_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        // A non-empty directory at the target makes the final rename fail.
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep.txt"), "1|Old|Math:1\n").unwrap();

        let roster = roster_of(&["2|New|Math:99"]);
        assert!(save(&path, &roster).is_err());

        assert!(path.is_dir());
        assert_eq!(
            std::fs::read_to_string(path.join("keep.txt")).unwrap(),
            "1|Old|Math:1\n"
        );
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(leftovers, ["students.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        std::fs::write(&path, "1|Old|Math:1\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        save(&path, &roster_of(&["2|New|Math:99"])).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "2|New|Math:99\n");
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(load(&path).is_err());
    }
}
