//! Positioned, user-facing diagnostics
//!
//! Every stage of the pipeline reports problems as [`ParseDiagnostic`] values.
//! The constructors here convert each stage's native error into one.

use crate::parser::lexer::{LexError, Token};
use crate::parser::messages::{lex_error_message, syntax_error_message};
use crate::parser::parse::{ParseFailure, SyntaxError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which stage of the pipeline a diagnostic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Lexical,
    Syntactic,
    Runtime,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::Lexical => "lexical",
            DiagnosticKind::Syntactic => "syntactic",
            DiagnosticKind::Runtime => "runtime",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseDiagnostic {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub kind: DiagnosticKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offending_symbol: Option<String>,
}

impl ParseDiagnostic {
    /// Build a diagnostic; line and column are clamped to at least 1.
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        line: usize,
        column: usize,
        offending_symbol: Option<String>,
    ) -> Self {
        Self {
            message: message.into(),
            line: line.max(1),
            column: column.max(1),
            kind,
            offending_symbol,
        }
    }

    pub fn lexical(message: impl Into<String>, column: usize, symbol: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Lexical, message, 1, column, Some(symbol.into()))
    }

    pub fn syntactic(message: impl Into<String>, column: usize, symbol: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Syntactic, message, 1, column, Some(symbol.into()))
    }

    /// Diagnostic for a character the tokenizer rejected
    pub fn from_lex_error(error: &LexError) -> Self {
        Self::new(
            DiagnosticKind::Lexical,
            lex_error_message(error),
            error.location.line,
            error.location.column,
            Some(error.character.to_string()),
        )
    }

    /// Diagnostic for a grammar violation, positioned at the failing token or
    /// one past the last token for end of input
    pub fn from_syntax_error(error: &SyntaxError, tokens: &[Token], input: &str) -> Self {
        let message = syntax_error_message(error.token.as_ref(), input);

        match &error.token {
            Some(token) => Self::new(
                DiagnosticKind::Syntactic,
                message,
                token.start_line,
                token.start_column,
                Some(token.text.clone()),
            ),
            None => {
                let (line, column) = end_of_input_position(tokens);
                Self::new(
                    DiagnosticKind::Syntactic,
                    message,
                    line,
                    column,
                    Some("EOF".to_string()),
                )
            }
        }
    }

    /// Diagnostic for a parse that could not complete at all
    pub fn from_parse_failure(failure: &ParseFailure) -> Self {
        Self::new(
            DiagnosticKind::Runtime,
            format!("Parse error: {}", failure),
            1,
            1,
            None,
        )
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error at {}:{}: {}",
            self.kind, self.line, self.column, self.message
        )
    }
}

/// Line and column just past the last token, or 1:1 for an empty stream.
fn end_of_input_position(tokens: &[Token]) -> (usize, usize) {
    match tokens.last() {
        Some(last) => (last.end_line, last.end_column + 1),
        None => (1, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::cst::SourceLocation;
    use crate::parser::lexer::tokenize;

    #[test]
    fn test_end_of_input_is_one_past_last_token() {
        let input = "3 + 45";
        let tokens = tokenize(input).tokens;
        let diag = ParseDiagnostic::from_syntax_error(&SyntaxError { token: None }, &tokens, input);
        assert_eq!((diag.line, diag.column), (1, 7));
        assert_eq!(diag.offending_symbol.as_deref(), Some("EOF"));
        assert_eq!(diag.kind, DiagnosticKind::Syntactic);
    }

    #[test]
    fn test_end_of_input_without_tokens() {
        let diag = ParseDiagnostic::from_syntax_error(&SyntaxError { token: None }, &[], "");
        assert_eq!((diag.line, diag.column), (1, 1));
    }

    #[test]
    fn test_failing_token_position() {
        let input = "a + b)";
        let tokens = tokenize(input).tokens;
        let error = SyntaxError {
            token: Some(tokens[3].clone()),
        };
        let diag = ParseDiagnostic::from_syntax_error(&error, &tokens, input);
        assert_eq!(diag.column, 6);
        assert_eq!(diag.message, "Unmatched closing parenthesis ')'");
    }

    #[test]
    fn test_parse_failure_is_runtime() {
        let failure = ParseFailure::NestingTooDeep {
            limit: 2,
            location: SourceLocation::new(1, 3),
        };
        let diag = ParseDiagnostic::from_parse_failure(&failure);
        assert_eq!(diag.kind, DiagnosticKind::Runtime);
        assert!(diag.message.starts_with("Parse error: "));
        assert_eq!((diag.line, diag.column), (1, 1));
    }

    #[test]
    fn test_serializes_camel_case() {
        let diag = ParseDiagnostic::syntactic("boom", 2, "+");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["offendingSymbol"], "+");
        assert_eq!(json["kind"], "syntactic");
    }
}
