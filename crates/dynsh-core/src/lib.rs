//! Session state, configuration and request building for dynsh.
//!
//! The shell front end parses a command line into one of the argument
//! structs in [`request`], and this crate turns it into a DynamoDB input by
//! running every expression through a single
//! [`ExpressionTranslator`](dynsh_expr::ExpressionTranslator).
#![allow(clippy::doc_markdown)]

mod config;
mod error;
pub mod request;
mod session;

pub use config::DynshConfig;
pub use error::{DynshError, DynshResult};
pub use request::DynamoRequest;
pub use session::Session;
