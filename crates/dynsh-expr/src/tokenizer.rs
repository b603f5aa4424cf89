//! Prefix scanners shared by the literal, path and expression parsers.
//!
//! Each scanner looks at the start of the remaining input and returns the
//! matched text together with the rest, leaving the input untouched when
//! nothing matches.

/// Keywords, operators and punctuation copied verbatim into the wire
/// expression, longest first so the first hit is the longest match.
pub const KEYWORDS: &[&str] = &[
    "attribute_not_exists",
    "attribute_exists",
    "attribute_type",
    "if_not_exists",
    "begins_with",
    "list_append",
    "contains",
    "between",
    "delete",
    "remove",
    "size",
    "add",
    "and",
    "not",
    "set",
    "in",
    "or",
    "<=",
    "<>",
    ">=",
    ">>",
    " ",
    "\t",
    "(",
    ")",
    "+",
    ",",
    "-",
    "<",
    "=",
    ">",
    "]",
];

/// Characters that end an unescaped name or a scalar literal token.
///
/// `[` and `<<` are not here: they open lists and sets.
pub const DELIMITERS: &[char] = &[' ', '\t', ',', '(', ')', ']', '=', '<', '>'];

/// Returns `true` if `c` would extend a name read by [`next_token`].
///
/// Openers of a literal or an escaped name end a keyword as well, so
/// `IN[1, 2]` and ``AND`a b` `` still split after the keyword.
fn continues_name(c: char) -> bool {
    !DELIMITERS.contains(&c) && !matches!(c, '[' | '\'' | '{' | '`')
}

/// Matches the longest keyword at the start of `input`, case-insensitively.
///
/// The matched text keeps the input's original case. Alphabetic keywords must
/// not be followed by anything that continues a name, so `order` and
/// `in-stock` are names rather than `or` + `der` and `in` + `-stock`. A bare
/// `<` never matches the start of a `<<` set literal.
#[must_use]
pub fn match_keyword(input: &str) -> Option<(&str, &str)> {
    KEYWORDS.iter().find_map(|&keyword| {
        let head = input.get(..keyword.len())?;
        if !head.eq_ignore_ascii_case(keyword) {
            return None;
        }
        let rest = &input[keyword.len()..];
        if keyword == "<" && rest.starts_with('<') {
            return None;
        }
        if keyword.starts_with(|c: char| c.is_ascii_alphabetic())
            && rest.starts_with(continues_name)
        {
            return None;
        }
        Some((head, rest))
    })
}

/// Splits `input` before the first [`DELIMITERS`] or `extra` character.
///
/// The returned token may be empty; the remainder starts with the delimiter.
#[must_use]
pub fn next_token<'a>(input: &'a str, extra: &[char]) -> (&'a str, &'a str) {
    let end = input
        .find(|c: char| DELIMITERS.contains(&c) || extra.contains(&c))
        .unwrap_or(input.len());
    input.split_at(end)
}

/// Skips the spaces, tabs and commas separating collection elements.
pub(crate) fn trim_separators(input: &str) -> &str {
    input.trim_start_matches([' ', '\t', ','])
}
