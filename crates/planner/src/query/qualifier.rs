//! Rewrites the author-facing source placeholder into the real source alias.
//!
//! Transformation text is opaque SQL; the rewrite is a token scan, not a
//! parse. The only structure it respects is single-quoted string literals,
//! which are never touched.

use crate::query::SOURCE_PLACEHOLDER;
use model::mapping::Mapping;

/// One entry of the derived source relation's SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub expression: String,
    pub alias: String,
}

/// Produces the projection expression for one mapping.
///
/// Never fails: with a transformation the placeholder rewrite is applied,
/// without one the source column is referenced through the alias, and a
/// mapping carrying neither degrades to a `NULL` column.
pub fn qualify(mapping: &Mapping, alias: &str) -> SelectItem {
    let expression = match (&mapping.transformation, &mapping.source_column) {
        (Some(expr), _) => rewrite_placeholder(expr, SOURCE_PLACEHOLDER, alias),
        (None, Some(column)) => format!("{alias}.{column}"),
        (None, None) => "NULL".to_string(),
    };

    SelectItem {
        expression,
        alias: mapping.target_column.clone(),
    }
}

/// Replaces `token.` with `alias.` everywhere the token stands at an
/// identifier boundary outside a single-quoted literal.
///
/// The token is matched case-insensitively (SQL identifiers are), must not
/// be preceded by an identifier character or a dot (so `mysource.x` and
/// `t.source.x` survive), and must be immediately followed by a dot.
/// `''` escapes inside literals are honored.
pub fn rewrite_placeholder(expr: &str, token: &str, alias: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut in_literal = false;
    let mut prev: Option<char> = None;
    let mut chars = expr.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if in_literal {
            out.push(c);
            if c == '\'' {
                if matches!(chars.peek(), Some((_, '\''))) {
                    // escaped quote, still inside the literal
                    out.push('\'');
                    chars.next();
                } else {
                    in_literal = false;
                }
            }
            prev = Some(c);
            continue;
        }

        if c == '\'' {
            in_literal = true;
            out.push(c);
            prev = Some(c);
            continue;
        }

        if at_boundary(prev) && token_at(&expr[i..], token) {
            out.push_str(alias);
            out.push('.');
            // the first token char is consumed; skip the rest plus the dot
            for _ in 0..token.len() {
                chars.next();
            }
            prev = Some('.');
            continue;
        }

        out.push(c);
        prev = Some(c);
    }

    out
}

fn at_boundary(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => !(c.is_ascii_alphanumeric() || c == '_' || c == '.'),
    }
}

fn token_at(rest: &str, token: &str) -> bool {
    let bytes = rest.as_bytes();
    bytes.len() > token.len()
        && bytes[..token.len()].eq_ignore_ascii_case(token.as_bytes())
        && bytes[token.len()] == b'.'
}
