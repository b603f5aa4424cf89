//! Error types for the shell.

use dynsh_expr::ExpressionError;

/// Error returned by a single shell command.
///
/// None of these end the session: the command loop prints the message and
/// reads the next line.
#[derive(Debug, thiserror::Error)]
pub enum DynshError {
    /// An expression, key or item literal could not be translated.
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    /// The command needs a table but none was selected with `use`.
    #[error("no table selected, run `use <table>` first")]
    NoTableSelected,

    /// A key literal is not a usable primary key.
    #[error("invalid key: {reason}")]
    InvalidKey {
        /// What is wrong with the key.
        reason: String,
    },

    /// An item literal is not a usable item.
    #[error("invalid item: {reason}")]
    InvalidItem {
        /// What is wrong with the item.
        reason: String,
    },

    /// A required argument was not supplied.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for shell commands.
pub type DynshResult<T> = Result<T, DynshError>;
