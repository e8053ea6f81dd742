//! The default interactive session: load, run the menu, save.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use gradebook_core::roster::Roster;
use gradebook_core::store;

use crate::menu::Menu;

pub fn execute(data_file: PathBuf) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&data_file, stdin.lock(), stdout.lock(), io::stderr());
    Ok(())
}

/// Run a whole session against the given streams.
///
/// Load, save and terminal failures are reported and never returned. The
/// roster is saved even when `out` or `err` can no longer be written to.
pub fn run<R, W, E>(data_file: &Path, input: R, mut out: W, mut err: E)
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let roster = load_roster(data_file, &mut out, &mut err);

    let mut menu = Menu::new(roster, input, &mut out);
    if let Err(e) = menu.run() {
        tracing::warn!("terminal I/O failed: {e}");
        tell(&mut err, format_args!("Warning: terminal I/O failed: {e}"));
    }
    let roster = menu.into_roster();

    match store::save(data_file, &roster) {
        Ok(()) => tell(&mut out, format_args!("Data saved to {}", data_file.display())),
        Err(e) => {
            tracing::warn!("save failed: {e:#}");
            tell(&mut err, format_args!("Warning: Failed to save data: {e:#}"));
        }
    }
}

fn load_roster(data_file: &Path, out: &mut impl Write, err: &mut impl Write) -> Roster {
    match store::load(data_file) {
        Ok(None) => {
            tell(out, format_args!("No existing data file. Starting fresh."));
            Roster::new()
        }
        Ok(Some(report)) => {
            for skipped in &report.skipped_lines {
                tell(
                    err,
                    format_args!(
                        "Warning: skipped line {}: {}",
                        skipped.line_no, skipped.reason
                    ),
                );
            }
            tell(
                out,
                format_args!(
                    "Loaded {} student(s) from {}",
                    report.roster.len(),
                    data_file.display()
                ),
            );
            report.roster
        }
        Err(e) => {
            tracing::warn!("load failed: {e:#}");
            tell(err, format_args!("Warning: Failed to load data: {e:#}"));
            Roster::new()
        }
    }
}

/// Write one line to a terminal stream; a failed write is only logged.
fn tell(stream: &mut impl Write, line: fmt::Arguments<'_>) {
    if let Err(e) = writeln!(stream, "{line}") {
        tracing::warn!("terminal write failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Outcome {
        out: String,
        err: String,
    }

    fn session(path: &Path, input: &str) -> Outcome {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(path, input.as_bytes(), &mut out, &mut err);
        Outcome {
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    /// A terminal stream that has gone away.
    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn fresh_start_then_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");

        let first = session(&path, "1\n7\nAlice\n1\nMath\n70\n4\n");
        assert!(first.out.starts_with("No existing data file. Starting fresh."));
        assert!(first.out.contains("Data saved to"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "7|Alice|Math:70\n");

        let second = session(&path, "3\n7\n4\n");
        assert!(second.out.contains("Loaded 1 student(s)"));
        assert!(second.out.contains("Name: Alice"));
        assert!(second.err.is_empty());
    }

    #[test]
    fn malformed_lines_are_reported_and_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        std::fs::write(&path, "7|Alice|Math:70\nx|Bob|Math:80\n").unwrap();

        let outcome = session(&path, "4\n");
        assert!(outcome.out.contains("Loaded 1 student(s)"));
        assert!(outcome.err.contains("skipped line 2"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "7|Alice|Math:70\n");
    }

    #[test]
    fn unreadable_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        std::fs::write(&path, [0xff, 0xfe]).unwrap();

        let outcome = session(&path, "2\n4\n");
        assert!(outcome.err.contains("Failed to load data"));
        assert!(outcome.out.contains("No students found."));
    }

    #[test]
    fn save_failure_is_reported_not_returned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("students.txt");

        let outcome = session(&path, "4\n");
        assert!(outcome.err.contains("Failed to save data"));
        assert!(!path.exists());
    }

    #[test]
    fn closed_input_still_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        std::fs::write(&path, "1|A|Math:50\n").unwrap();

        let outcome = session(&path, "");
        assert!(outcome.out.contains("Data saved to"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1|A|Math:50\n");
    }

    #[test]
    fn closed_stdout_still_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        // The unpaired `Art` field is dropped on load, so a rewrite shows up.
        std::fs::write(&path, "1|A|Math:50|Art\n").unwrap();

        let mut err = Vec::new();
        run(&path, "1\n2\nB\n0\n4\n".as_bytes(), BrokenWriter, &mut err);

        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("terminal I/O failed: closed"));
        assert!(!err.contains("Failed to save data"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1|A|Math:50\n");
    }

    #[test]
    fn closed_stderr_does_not_stop_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        std::fs::write(&path, "1|A|Math:50\nx|Bad\n").unwrap();

        let mut out = Vec::new();
        run(&path, "1\n2\nB\n0\n4\n".as_bytes(), &mut out, BrokenWriter);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Loaded 1 student(s)"));
        assert!(out.contains("Student added successfully!"));
        assert!(out.contains("Data saved to"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1|A|Math:50\n2|B\n");
    }
}
