//! `tutorly` CLI: manage students, sessions and attendance from a terminal.
//!
//! ## Usage
//!
//! ```sh
//! # Interactive session (reads commands from stdin)
//! tutorly
//!
//! # Use a specific data file
//! tutorly --data ./book.json
//!
//! # Run commands non-interactively
//! tutorly -c "student add n/Alice Tan p/91234567" -c "student list"
//! ```

mod config;
mod logging;
mod repl;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::config::Overrides;
use crate::repl::Outcome;

#[derive(Parser)]
#[command(
    name = "tutorly",
    version,
    about = "Track students, tutoring sessions and attendance"
)]
struct Cli {
    /// Config file (defaults to <config dir>/tutorly/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON data file to load and save
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// File to write logs to
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Command to run instead of starting the interactive prompt (repeatable)
    #[arg(short, long = "command", value_name = "COMMAND")]
    commands: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(config::default_config_path);
    let file = match &config_path {
        Some(path) => config::load_config_file(path).context("Failed to load config file")?,
        None => None,
    };
    let settings = config::resolve(
        file,
        Overrides {
            data_file: cli.data,
            log_file: cli.log_file,
        },
    );

    match logging::init(&settings.log_file, &settings.log_level) {
        Ok(()) | Err(logging::LoggingError::SubscriberAlreadySet) => {}
        Err(e) => return Err(e).context("Failed to initialize logging"),
    }
    info!(data_file = %settings.data_file.display(), "starting tutorly");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut book = repl::open_book(&settings.data_file, &mut out)?;

    if cli.commands.is_empty() {
        return repl::run(io::stdin().lock(), &mut out, &mut book, &settings.data_file);
    }

    let mut failed = false;
    for command in &cli.commands {
        match repl::run_line(command, &mut book, &settings.data_file, &mut out)? {
            Outcome::Continue => {}
            Outcome::Exit => break,
            Outcome::Failed => failed = true,
        }
    }
    out.flush()?;
    if failed {
        process::exit(1);
    }
    Ok(())
}
