//! Line-oriented command loop.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tutorly_core::{parse_command, storage, AddressBook};

const PROMPT: &str = "tutorly> ";

/// What happened to a single line of input.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
    /// The command was rejected; the message has been printed.
    Failed,
}

/// Runs one command line and persists the book if it changed.
///
/// Command errors are printed to `out` and reported as [`Outcome::Failed`];
/// only I/O failures on `out` or the data file are returned as `Err`.
pub fn run_line<W: Write>(
    line: &str,
    book: &mut AddressBook,
    data_file: &Path,
    out: &mut W,
) -> Result<Outcome> {
    let executed = parse_command(line).and_then(|command| command.execute(book));
    let result = match executed {
        Ok(result) => result,
        Err(e) => {
            info!(command = line, error = %e, "command rejected");
            writeln!(out, "{e}")?;
            return Ok(Outcome::Failed);
        }
    };

    writeln!(out, "{}", result.feedback)?;
    if result.modified {
        storage::save(data_file, book)
            .with_context(|| format!("Failed to save data file: {}", data_file.display()))?;
    }
    Ok(if result.exit {
        Outcome::Exit
    } else {
        Outcome::Continue
    })
}

/// Reads commands from `input` until `exit` or end of input.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    book: &mut AddressBook,
    data_file: &Path,
) -> Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()?;
    for line in input.lines() {
        let line = line.context("Failed to read from stdin")?;
        if !line.trim().is_empty() && run_line(&line, book, data_file, out)? == Outcome::Exit {
            return Ok(());
        }
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

/// Loads the data file, starting empty if it is missing or unusable.
pub fn open_book<W: Write>(data_file: &Path, out: &mut W) -> Result<AddressBook> {
    match storage::load(data_file) {
        Ok(Some(book)) => Ok(book),
        Ok(None) => {
            info!(path = %data_file.display(), "starting with an empty address book");
            Ok(AddressBook::new())
        }
        Err(e) => {
            warn!(path = %data_file.display(), error = %e, "ignoring unreadable data file");
            writeln!(
                out,
                "Warning: could not load {} ({e}); starting with an empty address book",
                data_file.display()
            )?;
            Ok(AddressBook::new())
        }
    }
}
