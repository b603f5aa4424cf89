//! Expression translator: the entry point used by the request builder.
//!
//! One [`ExpressionTranslator`] is created per shell command. Every expression
//! of that command (key condition, filter, projection, update, condition) is
//! fed through the same translator so that all placeholders land in one pair
//! of side-tables.

use dynsh_model::input::{ExpressionAttributeNames, ExpressionAttributeValues};
use tracing::debug;

use crate::context::ExpressionContext;
use crate::error::ExpressionError;
use crate::literal::parse_value;
use crate::path::parse_path;
use crate::tokenizer::match_keyword;

/// Translates friendly expressions into wire expressions with placeholders.
#[derive(Debug, Default)]
pub struct ExpressionTranslator {
    ctx: ExpressionContext,
}

impl ExpressionTranslator {
    /// Create a translator with an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a condition, filter or update expression.
    ///
    /// Keywords and operators are copied through with their original spacing,
    /// literals become `:n` placeholders and everything else is treated as an
    /// attribute path. A sign directly before a digit belongs to the number
    /// unless it follows an operand: `a = -7` compares with `-7` while
    /// `SET a = b - 1` subtracts. Returns `Ok(None)` for blank input.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] if a literal or path is malformed. The
    /// context may already hold placeholders allocated before the failure, so
    /// the translator should be discarded.
    pub fn translate_expression(&mut self, raw: &str) -> Result<Option<String>, ExpressionError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while !rest.is_empty() {
            if starts_signed_number(rest) && !ends_with_operand(&out) {
                if let Some((value, remaining)) = parse_value(rest)? {
                    out.push_str(&self.ctx.add_value(value));
                    rest = remaining;
                    continue;
                }
            }
            if let Some((keyword, remaining)) = match_keyword(rest) {
                out.push_str(keyword);
                rest = remaining;
            } else if let Some((value, remaining)) = parse_value(rest)? {
                out.push_str(&self.ctx.add_value(value));
                rest = remaining;
            } else {
                let (path, remaining) = parse_path(&mut self.ctx, rest)?;
                out.push_str(&path);
                rest = remaining;
            }
        }

        debug!(input = raw, output = %out, "translated expression");
        Ok(Some(out))
    }

    /// Translate a comma-separated list of attribute paths.
    ///
    /// Spaces around the commas are dropped: `a, b.c` becomes `#0,#1.#2`.
    /// Returns `Ok(None)` for blank input.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::MalformedPath`] for an empty entry (a lone,
    /// leading or trailing comma) and [`ExpressionError::UnexpectedToken`] when
    /// two paths are not separated by a comma.
    pub fn translate_projection(&mut self, raw: &str) -> Result<Option<String>, ExpressionError> {
        let mut rest = raw.trim();
        if rest.is_empty() {
            return Ok(None);
        }

        let mut paths = Vec::new();
        loop {
            let (path, remaining) = parse_path(&mut self.ctx, rest)?;
            paths.push(path);
            rest = remaining.trim_start();
            if rest.is_empty() {
                break;
            }
            let Some(next) = rest.strip_prefix(',') else {
                return Err(ExpressionError::UnexpectedToken {
                    expected: "','",
                    found: rest.to_owned(),
                });
            };
            rest = next.trim_start();
            if rest.is_empty() {
                return Err(ExpressionError::malformed_path("trailing comma", raw));
            }
        }

        let out = paths.join(",");
        debug!(input = raw, output = %out, "translated projection");
        Ok(Some(out))
    }

    /// The name table, or `None` if no name has been allocated.
    #[must_use]
    pub fn names(&self) -> Option<&ExpressionAttributeNames> {
        self.ctx.names()
    }

    /// The value table, or `None` if no value has been allocated.
    #[must_use]
    pub fn values(&self) -> Option<&ExpressionAttributeValues> {
        self.ctx.values()
    }

    /// Consume the translator, yielding its context.
    #[must_use]
    pub fn into_context(self) -> ExpressionContext {
        self.ctx
    }
}

/// Returns `true` if `input` starts with `-` or `+` directly followed by a digit.
fn starts_signed_number(input: &str) -> bool {
    let mut chars = input.chars();
    matches!(chars.next(), Some('-' | '+')) && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Returns `true` if the translated output ends with a placeholder, an index or
/// a closing parenthesis, so a following sign is an arithmetic operator.
fn ends_with_operand(out: &str) -> bool {
    out.trim_end()
        .ends_with(|c: char| c.is_ascii_digit() || c == ']' || c == ')')
}
