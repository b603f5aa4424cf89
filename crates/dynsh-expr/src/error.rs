//! Errors produced while translating an expression.
//!
//! Every variant is fatal for the expression being translated: the engine never
//! returns a partially substituted string.

use std::fmt;

/// Delimited literal or path construct that can be left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    /// `'...'`
    String,
    /// `[...]`
    List,
    /// `<<...>>`
    Set,
    /// `{...}`
    Map,
    /// `` `...` `` around an attribute name.
    Backtick,
    /// `[...]` index after an attribute name.
    Index,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Backtick => "escaped name",
            Self::Index => "index",
        })
    }
}

/// Errors produced during expression translation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    /// No literal form matches where a value is required.
    #[error("Could not parse value at: {input}")]
    UnparsableValue {
        /// Remaining input at the failure point.
        input: String,
    },
    /// A string, list, set, map, escaped name or index was never closed.
    #[error("Unterminated {construct}: {input}")]
    Unterminated {
        /// The construct left open.
        construct: Construct,
        /// Remaining input from the opening delimiter.
        input: String,
    },
    /// A backslash inside a string was followed by something other than
    /// `"`, `'` or `\`.
    #[error("Unexpected escape character '\\{found}' in: {input}")]
    InvalidEscape {
        /// The character following the backslash.
        found: char,
        /// Remaining input from the opening quote.
        input: String,
    },
    /// An attribute path segment is empty or otherwise malformed.
    #[error("Malformed attribute path: {message} at: {input}")]
    MalformedPath {
        /// Explanation.
        message: &'static str,
        /// Remaining input at the failure point.
        input: String,
    },
    /// A map entry is missing its name or contains stray delimiters.
    #[error("Malformed map entry at: {input}")]
    MalformedMap {
        /// Remaining input at the failure point.
        input: String,
    },
    /// An unexpected token was encountered.
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        /// What was expected.
        expected: &'static str,
        /// What was found.
        found: String,
    },
}

impl ExpressionError {
    pub(crate) fn unterminated(construct: Construct, input: &str) -> Self {
        Self::Unterminated {
            construct,
            input: input.to_owned(),
        }
    }

    pub(crate) fn malformed_path(message: &'static str, input: &str) -> Self {
        Self::MalformedPath {
            message,
            input: input.to_owned(),
        }
    }
}
