//! Attribute path parsing: `a.b[0].c`, `` `c d`.e ``.

use crate::context::ExpressionContext;
use crate::error::{Construct, ExpressionError};
use crate::tokenizer::next_token;

/// Characters that end one segment of an unescaped path.
const SEGMENT_DELIMITERS: &[char] = &['.', '['];

/// Parses an attribute path at the start of `input`.
///
/// Each name segment is replaced with a fresh `#n` placeholder. Bracketed
/// indices are copied verbatim, as are the `.` separators between segments.
/// Returns the substituted path and the remaining input.
///
/// # Errors
///
/// Returns [`ExpressionError::MalformedPath`] when a segment name is empty and
/// [`ExpressionError::Unterminated`] for an unclosed backtick or index.
pub fn parse_path<'a>(
    ctx: &mut ExpressionContext,
    input: &'a str,
) -> Result<(String, &'a str), ExpressionError> {
    let (name, mut rest) = if let Some(body) = input.strip_prefix('`') {
        let end = body
            .find('`')
            .ok_or_else(|| ExpressionError::unterminated(Construct::Backtick, input))?;
        (&body[..end], &body[end + 1..])
    } else {
        next_token(input, SEGMENT_DELIMITERS)
    };
    if name.is_empty() {
        return Err(ExpressionError::malformed_path("empty attribute name", input));
    }

    let mut path = ctx.add_name(name);

    while let Some(body) = rest.strip_prefix('[') {
        let end = body
            .find(']')
            .ok_or_else(|| ExpressionError::unterminated(Construct::Index, rest))?;
        path.push_str(&rest[..end + 2]);
        rest = &body[end + 1..];
    }

    if let Some(nested) = rest.strip_prefix('.') {
        let (tail, remaining) = parse_path(ctx, nested)?;
        path.push('.');
        path.push_str(&tail);
        rest = remaining;
    }

    Ok((path, rest))
}
