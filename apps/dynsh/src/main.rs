//! dynsh - interactive DynamoDB shell.
//!
//! Lets an operator write conditions, updates and projections inline, e.g.
//! `query -k "pk = 'user#1' AND begins_with(sk, 'order')"`, and translates
//! them into DynamoDB placeholder expressions with their name and value
//! tables.
//!
//! # Usage
//!
//! ```text
//! dynsh --region eu-west-1                       # interactive shell
//! dynsh -t users scan -f "attribute_exists(email)"  # one command
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AWS_REGION` | *(unset)* | Region, takes precedence over `DEFAULT_REGION` |
//! | `DEFAULT_REGION` | `us-east-1` | Region |
//! | `DYNSH_ENDPOINT_URL` | *(regional endpoint)* | Endpoint override |
//! | `DYNSH_VERBOSE` | `false` | Log translated expressions |
//! | `DYNSH_HISTORY` | `~/.dynsh_history` | Line editor history file |
//! | `LOG_LEVEL` | `warn` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod cli;
mod command;
mod repl;

use anyhow::{Context, Result};
use clap::Parser;
use dynsh_core::{DynshConfig, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::command::Outcome;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the configured level.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.overlay(DynshConfig::from_env());
    config.validate()?;

    init_tracing(config.effective_log_level())?;

    info!(
        region = %config.region,
        endpoint = ?config.endpoint_url,
        "starting dynsh"
    );

    let mut session = Session::from_config(&config);
    if let Some(table) = &cli.table {
        session.use_table(table)?;
    }

    match cli.command {
        Some(command) => {
            if let Outcome::Output(text) = command::execute(&mut session, command)? {
                println!("{text}");
            }
        }
        None => repl::run(&mut session, config.history_file.as_deref())?,
    }

    Ok(())
}
