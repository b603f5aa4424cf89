//! Shell line handling: argument splitting and command dispatch.
//!
//! Commands are dry runs: the translated request is rendered as it would be
//! sent (endpoint, target header and JSON body) instead of being executed.

use anyhow::{Result, anyhow, bail};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use dynsh_core::request::{
    build_delete, build_describe, build_get, build_put, build_query, build_scan, build_update,
};
use dynsh_core::{DynamoRequest, DynshResult, Session};
use tracing::debug;

use crate::cli::{ShellCommand, ShellLine};

/// Content type of the DynamoDB JSON protocol.
const CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// What the shell should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text.
    Output(String),
    /// Nothing to print.
    Silent,
    /// Leave the shell.
    Exit,
}

/// Splits a shell line into arguments.
///
/// Arguments are separated by spaces. A `"` opens or closes a grouped argument
/// that may contain spaces; the quotes themselves are dropped. `\"` is a
/// literal quote, inside or outside a group. Any other backslash is kept so
/// that string escapes reach the expression parser untouched.
///
/// # Errors
///
/// Fails if a group is left open.
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_group = false;
    let mut has_token = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
                has_token = true;
            }
            '"' => {
                in_group = !in_group;
                has_token = true;
            }
            ' ' | '\t' if !in_group => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            _ => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_group {
        bail!("unterminated quoted argument in: {line}");
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

/// Parses and runs one shell line.
///
/// # Errors
///
/// Fails if the line cannot be split or parsed, or if the command fails.
pub fn handle_line(session: &mut Session, line: &str) -> Result<Outcome> {
    let args = split_args(line)?;
    if args.is_empty() {
        return Ok(Outcome::Silent);
    }
    debug!(?args, "parsed shell line");

    match ShellLine::try_parse_from(&args) {
        Ok(parsed) => Ok(execute(session, parsed.command)?),
        Err(err) => clap_outcome(&err),
    }
}

/// Runs one parsed command against the session.
///
/// # Errors
///
/// Fails if the command needs a table and none is selected, or if building
/// the request fails.
pub fn execute(session: &mut Session, command: ShellCommand) -> DynshResult<Outcome> {
    let request = match command {
        ShellCommand::Use { table } => {
            session.use_table(&table)?;
            return Ok(Outcome::Silent);
        }
        ShellCommand::Help => return Ok(Outcome::Output(help_text())),
        ShellCommand::Exit => return Ok(Outcome::Exit),
        ShellCommand::Desc => build_describe(session.require_table()?),
        ShellCommand::Query(opts) => build_query(session.require_table()?, &opts.into())?,
        ShellCommand::Scan(opts) => build_scan(session.require_table()?, &opts.into())?,
        ShellCommand::Get(opts) => build_get(session.require_table()?, &opts.into())?,
        ShellCommand::Put(opts) => build_put(session.require_table()?, &opts.into())?,
        ShellCommand::Update(opts) => build_update(session.require_table()?, &opts.into())?,
        ShellCommand::Delete(opts) => build_delete(session.require_table()?, &opts.into())?,
    };
    Ok(Outcome::Output(render(session, &request)?))
}

/// Renders a request the way it would go over the wire.
///
/// # Errors
///
/// Fails if the body cannot be serialized.
pub fn render(session: &Session, request: &DynamoRequest) -> DynshResult<String> {
    Ok(format!(
        "POST {}\nContent-Type: {CONTENT_TYPE}\nX-Amz-Target: {}\n\n{}",
        session.endpoint(),
        request.target(),
        request.to_json()?
    ))
}

fn help_text() -> String {
    ShellLine::command().render_long_help().to_string()
}

/// Turns a clap failure into help output or a one-line error.
fn clap_outcome(err: &clap::Error) -> Result<Outcome> {
    let rendered = err.render().to_string();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            Ok(Outcome::Output(rendered))
        }
        _ => Err(anyhow!(
            "{}",
            rendered.trim_start_matches("error: ").trim_end()
        )),
    }
}
