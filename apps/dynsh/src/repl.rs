//! Interactive read-eval-print loop.

use std::path::Path;

use anyhow::{Context, Result};
use dynsh_core::Session;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

use crate::command::{Outcome, handle_line};

/// Runs the shell until `exit`, end of input or a terminal error.
///
/// A failing command only prints its error; the loop then reads the next
/// line with the session unchanged.
///
/// # Errors
///
/// Fails if the line editor cannot be created or the terminal cannot be read.
pub fn run(session: &mut Session, history: Option<&Path>) -> Result<()> {
    let mut rl = DefaultEditor::new().context("failed to initialize line editor")?;

    if let Some(path) = history {
        if let Err(e) = rl.load_history(path) {
            debug!(path = %path.display(), error = %e, "no history loaded");
        }
    }

    println!("dynsh {}: type `help` for commands", env!("CARGO_PKG_VERSION"));

    let result = loop {
        match rl.readline(&session.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Err(e) = rl.add_history_entry(line) {
                    warn!(error = %e, "failed to record history entry");
                }

                match handle_line(session, line) {
                    Ok(Outcome::Output(text)) => println!("{text}"),
                    Ok(Outcome::Silent) => {}
                    Ok(Outcome::Exit) => break Ok(()),
                    Err(e) => eprintln!("error: {e:#}"),
                }
            }
            Err(ReadlineError::Interrupted) => {}
            Err(ReadlineError::Eof) => break Ok(()),
            Err(e) => break Err(e).context("failed to read line"),
        }
    };

    if let Some(path) = history {
        if let Err(e) = rl.save_history(path) {
            warn!(path = %path.display(), error = %e, "failed to save history");
        }
    }
    println!("Goodbye");

    result
}
