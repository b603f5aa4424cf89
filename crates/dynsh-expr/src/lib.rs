//! Expression translation engine for dynsh.
//!
//! DynamoDB requires every attribute name and literal value in an expression
//! to be replaced by a placeholder (`#0`, `:0`) and shipped in two side-tables.
//! This crate lets the shell accept the friendlier inline form instead:
//!
//! ```text
//! pk = 'user#1' AND begins_with(sk, 'order') AND info.tags[0] = <<'a','b'>>
//! ```
//!
//! becomes `#0 = :0 AND begins_with(#1, :1) AND #2.#3[0] = :2` plus the
//! name and value tables. The pipeline is a single left-to-right pass:
//!
//! 1. **Keywords**: operators, function names and punctuation are copied through.
//! 2. **Literals**: strings, numbers, booleans, null, lists, sets and maps
//!    become value placeholders.
//! 3. **Paths**: anything else is an attribute path and becomes name placeholders.
#![allow(clippy::doc_markdown)]

pub mod context;
pub mod error;
pub mod literal;
pub mod path;
pub mod tokenizer;
pub mod translator;

pub use context::ExpressionContext;
pub use error::{Construct, ExpressionError};
pub use literal::parse_literal;
pub use translator::ExpressionTranslator;
