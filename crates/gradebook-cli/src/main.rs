//! gradebook CLI — interactive student grade management.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gradebook_core::config::load_config_from;

mod commands;
mod menu;
mod prompt;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Student grade management console")]
struct Cli {
    /// Data file holding the roster (overrides config)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the data file for malformed records
    Validate,

    /// Print a summary table of every student
    Report,

    /// Create a starter gradebook.toml
    Init,
}

impl Cli {
    fn resolve_data_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }
        Ok(load_config_from(self.config.as_deref())?.data_file)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradebook=error".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        None => cli
            .resolve_data_file()
            .and_then(commands::session::execute),
        Some(Commands::Validate) => cli
            .resolve_data_file()
            .and_then(commands::validate::execute),
        Some(Commands::Report) => cli
            .resolve_data_file()
            .and_then(commands::report::execute),
        Some(Commands::Init) => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
