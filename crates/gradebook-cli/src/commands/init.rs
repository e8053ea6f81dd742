//! The `gradebook init` command.

use std::path::Path;

use anyhow::{Context, Result};

use gradebook_core::config::LOCAL_CONFIG_FILE;

pub fn execute() -> Result<()> {
    let path = Path::new(LOCAL_CONFIG_FILE);
    if path.exists() {
        println!("{LOCAL_CONFIG_FILE} already exists, skipping.");
        return Ok(());
    }

    std::fs::write(path, SAMPLE_CONFIG)
        .with_context(|| format!("failed to write {LOCAL_CONFIG_FILE}"))?;
    println!("Created {LOCAL_CONFIG_FILE}");

    println!("\nNext steps:");
    println!("  1. Edit {LOCAL_CONFIG_FILE} to choose where records are kept");
    println!("  2. Run: gradebook");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

# File the roster is loaded from at startup and saved to on exit.
# One student per line: <roll_no>|<name>|<subject>:<marks>|...
# Overridden by GRADEBOOK_DATA_FILE and by --data-file.
data_file = "students.txt"
"#;
