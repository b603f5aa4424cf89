//! Literal value parser.
//!
//! Recognizes, in order of precedence:
//!
//! | Form | Example | Result |
//! |------|---------|--------|
//! | string | `'It\'s'` | `S` |
//! | number | `10`, `-2.5`, `1e3` | `N` (token text kept verbatim) |
//! | boolean | `true`, `FALSE` | `BOOL` |
//! | null | `null` | `NULL` |
//! | list | `['a', 1, [2]]` | `L` |
//! | set | `<<'a','b'>>`, `<<1, 2>>` | `SS` / `NS` |
//! | map | `{ name: 'x', n: 1 }` | `M` |
//!
//! Collections nest arbitrarily. Map field names are taken literally; they are
//! never placeholder-substituted.

use dynsh_model::AttributeValue;
use indexmap::IndexMap;

use crate::error::{Construct, ExpressionError};
use crate::tokenizer::{next_token, trim_separators};

/// Extra delimiters for scalar tokens so `{a: 1}` needs no space before `}`.
const SCALAR_DELIMITERS: &[char] = &['}'];

/// Result of a successful literal parse: the value and the unconsumed input.
pub type Parsed<'a> = (AttributeValue, &'a str);

/// Parses a whole string as a single literal, e.g. an item key
/// `{pk: 'a', sk: 1}`.
///
/// Surrounding whitespace is ignored; anything else after the literal is an
/// error.
pub fn parse_literal(raw: &str) -> Result<AttributeValue, ExpressionError> {
    let input = raw.trim();
    let (value, rest) = parse_value(input)?.ok_or_else(|| unparsable(input))?;
    let rest = rest.trim();
    if !rest.is_empty() {
        return Err(ExpressionError::UnexpectedToken {
            expected: "end of literal",
            found: rest.to_owned(),
        });
    }
    Ok(value)
}

/// Tries to parse a literal at the start of `input`.
///
/// Returns `Ok(None)` when no literal form starts here, so the caller can fall
/// back to an attribute path. Once a delimited form has been opened (`'`, `[`,
/// `<<`, `{`), any problem inside it is an error.
pub fn parse_value(input: &str) -> Result<Option<Parsed<'_>>, ExpressionError> {
    if let Some((s, rest)) = parse_string(input)? {
        return Ok(Some((AttributeValue::S(s), rest)));
    }
    if let Some(parsed) = parse_scalar(input) {
        return Ok(Some(parsed));
    }
    if let Some(parsed) = parse_list(input)? {
        return Ok(Some(parsed));
    }
    if let Some(parsed) = parse_set(input)? {
        return Ok(Some(parsed));
    }
    parse_map(input)
}

fn unparsable(input: &str) -> ExpressionError {
    ExpressionError::UnparsableValue {
        input: input.to_owned(),
    }
}

/// Parses a single-quoted string, resolving `\'`, `\"` and `\\`.
fn parse_string(input: &str) -> Result<Option<(String, &str)>, ExpressionError> {
    let Some(body) = input.strip_prefix('\'') else {
        return Ok(None);
    };

    let mut out = String::new();
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\'' => return Ok(Some((out, &body[i + 1..]))),
            '\\' => match chars.next() {
                Some((_, escaped @ ('\'' | '"' | '\\'))) => out.push(escaped),
                Some((_, found)) => {
                    return Err(ExpressionError::InvalidEscape {
                        found,
                        input: input.to_owned(),
                    });
                }
                None => break,
            },
            other => out.push(other),
        }
    }

    Err(ExpressionError::unterminated(Construct::String, input))
}

/// Returns `true` if `token` is an integer or a finite decimal numeral.
fn is_number(token: &str) -> bool {
    token.parse::<i64>().is_ok() || token.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Parses a number, boolean or null token.
fn parse_scalar(input: &str) -> Option<Parsed<'_>> {
    let (token, rest) = next_token(input, SCALAR_DELIMITERS);
    if token.is_empty() {
        return None;
    }

    let value = if is_number(token) {
        AttributeValue::N(token.to_owned())
    } else if token.eq_ignore_ascii_case("true") {
        AttributeValue::Bool(true)
    } else if token.eq_ignore_ascii_case("false") {
        AttributeValue::Bool(false)
    } else if token.eq_ignore_ascii_case("null") {
        AttributeValue::Null(true)
    } else {
        return None;
    };

    Some((value, rest))
}

/// Parses elements up to `close`, skipping separating spaces and commas.
///
/// `opened` is the input from the opening delimiter, for error messages.
fn parse_elements<'a>(
    body: &'a str,
    close: &str,
    construct: Construct,
    opened: &str,
) -> Result<(Vec<AttributeValue>, &'a str), ExpressionError> {
    let mut rest = trim_separators(body);
    let mut items = Vec::new();

    loop {
        if let Some(after) = rest.strip_prefix(close) {
            return Ok((items, after));
        }
        if rest.is_empty() {
            return Err(ExpressionError::unterminated(construct, opened));
        }
        let (item, after) = parse_value(rest)?.ok_or_else(|| unparsable(rest))?;
        items.push(item);
        rest = trim_separators(after);
    }
}

fn parse_list(input: &str) -> Result<Option<Parsed<'_>>, ExpressionError> {
    let Some(body) = input.strip_prefix('[') else {
        return Ok(None);
    };
    let (items, rest) = parse_elements(body, "]", Construct::List, input)?;
    Ok(Some((AttributeValue::L(items), rest)))
}

/// Parses `<<...>>`.
///
/// The first element decides the set type: a number makes a number set,
/// anything else a string set. Later elements are not checked and are
/// converted to text, so `<<1, 'a'>>` is the number set `["1", "a"]`. An
/// empty set is an empty string set.
fn parse_set(input: &str) -> Result<Option<Parsed<'_>>, ExpressionError> {
    let Some(body) = input.strip_prefix("<<") else {
        return Ok(None);
    };
    let (items, rest) = parse_elements(body, ">>", Construct::Set, input)?;

    let numeric = items.first().is_some_and(AttributeValue::is_n);
    let members = items.into_iter().map(member_text).collect();
    let set = if numeric {
        AttributeValue::Ns(members)
    } else {
        AttributeValue::Ss(members)
    };
    Ok(Some((set, rest)))
}

/// Text of a set member: the raw string or number, else its literal form.
fn member_text(value: AttributeValue) -> String {
    match value {
        AttributeValue::S(s) | AttributeValue::N(s) => s,
        other => other.to_string(),
    }
}

fn parse_map(input: &str) -> Result<Option<Parsed<'_>>, ExpressionError> {
    let Some(body) = input.strip_prefix('{') else {
        return Ok(None);
    };

    let mut rest = body.trim_start_matches([' ', '\t']);
    let mut map = IndexMap::new();

    loop {
        if let Some(after) = rest.strip_prefix('}') {
            return Ok(Some((AttributeValue::M(map), after)));
        }
        let Some(colon) = rest.find(':') else {
            return Err(ExpressionError::unterminated(Construct::Map, input));
        };

        let name = rest[..colon].trim_matches([' ', '\t']);
        if name.is_empty() || name.contains(['{', '}', ',']) {
            return Err(ExpressionError::MalformedMap {
                input: rest.to_owned(),
            });
        }

        let value_input = rest[colon + 1..].trim_start_matches([' ', '\t']);
        let (value, after) = parse_value(value_input)?.ok_or_else(|| unparsable(value_input))?;
        map.insert(name.to_owned(), value);
        rest = trim_separators(after);
    }
}
