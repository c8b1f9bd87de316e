//! Character classes shared by the tokenizer and the pre-analysis scanner
//!
//! Both passes must agree on which characters are legal in an expression,
//! so the predicates live here and nowhere else. The allowed set is
//! `[A-Za-z0-9+\-*/=()\s.]`.

/// Arithmetic operators as they appear in raw text (`=` is not one of them).
pub const OPERATOR_CHARS: [char; 4] = ['+', '-', '*', '/'];

/// Returns true for `+ - * /`.
pub fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(&c)
}

/// Returns true for any character an expression may legally contain.
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '+' | '-' | '*' | '/' | '=' | '(' | ')' | '.')
}

/// Returns true when every character of `text` is allowed.
pub fn is_valid_text(text: &str) -> bool {
    text.chars().all(is_allowed_char)
}

/// First character of an identifier.
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Subsequent identifier characters.
pub fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric()
}
