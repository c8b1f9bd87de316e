//! User-facing wording for syntax and lexical errors
//!
//! The parser only knows *where* it failed (a token, or the end of input).
//! This module turns that into a sentence a person can act on by looking at
//! the failing token and the characters around it in the line text.

use super::charset::{is_allowed_char, is_operator_char};
use super::lexer::{LexError, Token, TokenKind};

/// Message for a grammar violation at `token`, or at end of input when `None`.
pub fn syntax_error_message(token: Option<&Token>, input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let trimmed_len = input.trim().chars().count();

    let Some(token) = token else {
        return match last_significant_char(&chars) {
            Some(op) if is_operator_char(op) => {
                format!("Expression cannot end with operator '{}'", op)
            }
            _ => "Unexpected end of expression".to_string(),
        };
    };

    let position = token.start_column.max(1);

    if token.kind.is_operator() {
        if position == 1 {
            return format!("Expression cannot start with operator '{}'", token.text);
        }

        if let Some(prev) = previous_significant_char(&chars, position - 1) {
            if is_operator_char(prev) {
                return format!(
                    "Consecutive operators '{}{}' are not allowed",
                    prev, token.text
                );
            }
        }

        if position == trimmed_len {
            return format!("Expression cannot end with operator '{}'", token.text);
        }

        return format!("Unexpected operator '{}' at position {}", token.text, position);
    }

    match token.kind {
        TokenKind::RParen => return "Unmatched closing parenthesis ')'".to_string(),
        TokenKind::LParen => return "Unmatched opening parenthesis '('".to_string(),
        _ => {}
    }

    if let Some(&c) = chars.get(position - 1) {
        if !is_allowed_char(c) {
            return invalid_character_message(c, position);
        }
    }

    format!("Syntax error at position {}: unexpected '{}'", position, token.text)
}

/// Message for a character the tokenizer could not match.
pub fn lex_error_message(error: &LexError) -> String {
    if error.is_invalid_character() {
        invalid_character_message(error.character, error.location.column)
    } else {
        format!(
            "Unexpected character '{}' at position {}",
            error.character, error.location.column
        )
    }
}

pub fn invalid_character_message(c: char, position: usize) -> String {
    format!("Invalid character '{}' at position {}", c, position)
}

/// Last non-whitespace character of the line.
fn last_significant_char(chars: &[char]) -> Option<char> {
    chars.iter().rev().copied().find(|c| !c.is_whitespace())
}

/// Closest non-whitespace character strictly before index `before`.
fn previous_significant_char(chars: &[char], before: usize) -> Option<char> {
    chars[..before.min(chars.len())]
        .iter()
        .rev()
        .copied()
        .find(|c| !c.is_whitespace())
}
