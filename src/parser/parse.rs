//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, cursor helpers, error recovery, and the main parse
//! entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser with single-token lookahead:
//! - This module: Parser struct, helper methods, and coordination
//! - `rules`: one method per grammar rule, building the CST
//!
//! # Error Recovery
//!
//! A grammar violation never aborts the parse. The parser records a
//! [`SyntaxError`] at the failing token (or at end of input), then repairs
//! locally:
//! - an operator standing where an operand belongs is deleted when the next
//!   token can start an operand,
//! - a missing `)` is deleted-through (one junk token) or virtually inserted,
//! - a missing operand leaves an empty, `recovered` factor node behind.
//!
//! After an error the parser stays in recovery mode until it consumes a token
//! normally, and errors raised while recovering are dropped. This keeps one
//! user mistake to one error instead of a cascade.
//!
//! The only unrecoverable condition is parenthesis nesting deeper than the
//! configured limit, reported as a [`ParseFailure`].

use crate::analysis::constants::MAX_NESTING_DEPTH;
use crate::parser::cst::{CstNode, SourceLocation};
use crate::parser::lexer::{Token, TokenKind};
use thiserror::Error;
use tracing::{debug, trace};

/// A grammar violation at a token, or at end of input when `token` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub token: Option<Token>,
}

impl SyntaxError {
    pub fn is_end_of_input(&self) -> bool {
        self.token.is_none()
    }
}

/// Parser failures that prevent building any tree at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("expression nesting exceeds {limit} levels at line {}, column {}", .location.line, .location.column)]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

/// Result of a completed parse: the (possibly repaired) tree and its errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    pub cst: Option<CstNode>,
    pub errors: Vec<SyntaxError>,
}

/// Parse one line's tokens into a CST with a freshly constructed parser.
pub fn parse(tokens: &[Token]) -> Result<ParseOutput, ParseFailure> {
    Parser::new(tokens).parse()
}

/// Recursive descent parser over one line's token stream
///
/// A parser lives for exactly one `parse` call; [`Parser::parse`] consumes it,
/// so cursor and error state can never leak between lines.
pub struct Parser<'t> {
    pub(crate) tokens: &'t [Token],
    pub(crate) position: usize,
    pub(crate) errors: Vec<SyntaxError>,
    pub(crate) recovering: bool,
    pub(crate) depth: usize,
    pub(crate) max_depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            errors: Vec::new(),
            recovering: false,
            depth: 0,
            max_depth: MAX_NESTING_DEPTH,
        }
    }

    /// Override the parenthesis nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a whole statement and require the input to end after it
    pub fn parse(mut self) -> Result<ParseOutput, ParseFailure> {
        let root = self.parse_statement()?;

        // Redundant input after a complete statement
        if !self.is_at_end() {
            self.report_at_current();
        }

        debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "parsed statement"
        );

        Ok(ParseOutput {
            cst: Some(CstNode::Rule(root)),
            errors: self.errors,
        })
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub(crate) fn peek_kind_ahead(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.position + n).map(|t| t.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(crate) fn check_ahead(&self, n: usize, kind: TokenKind) -> bool {
        self.peek_kind_ahead(n) == Some(kind)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Consume the current token as part of the tree. Leaves recovery mode.
    pub(crate) fn consume(&mut self) -> Option<Token> {
        let token = self.peek()?.clone();
        self.position += 1;
        self.recovering = false;
        Some(token)
    }

    /// Drop the current token during recovery.
    pub(crate) fn skip(&mut self) {
        if let Some(token) = self.peek() {
            trace!(token = %token, "recovery: deleting token");
            self.position += 1;
        }
    }

    pub(crate) fn report_at_current(&mut self) {
        let token = self.peek().cloned();
        self.report(token);
    }

    fn report(&mut self, token: Option<Token>) {
        if self.recovering {
            trace!(?token, "recovery: suppressing follow-on error");
            return;
        }
        if self.errors.last().is_some_and(|e| e.token == token) {
            return;
        }
        trace!(?token, "syntax error");
        self.errors.push(SyntaxError { token });
        self.recovering = true;
    }

    /// Track one more level of parenthesis nesting.
    pub(crate) fn enter_group(&mut self, location: SourceLocation) -> Result<(), ParseFailure> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseFailure::NestingTooDeep {
                limit: self.max_depth,
                location,
            });
        }
        Ok(())
    }

    pub(crate) fn leave_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::cst::RuleName;
    use crate::parser::lexer::tokenize;

    fn parse_source(source: &str) -> ParseOutput {
        let lexed = tokenize(source);
        assert!(lexed.errors.is_empty(), "unexpected lex errors for {:?}", source);
        parse(&lexed.tokens).expect("parse should not fail catastrophically")
    }

    fn error_tokens(output: &ParseOutput) -> Vec<Option<String>> {
        output
            .errors
            .iter()
            .map(|e| e.token.as_ref().map(|t| t.text.clone()))
            .collect()
    }

    #[test]
    fn test_parse_valid_inputs() {
        for source in ["3 + 4 * 5", "(a + b) * c", "x = 10", "x = (y - 2) / 4.5", "a"] {
            let output = parse_source(source);
            assert!(output.errors.is_empty(), "{:?} -> {:?}", source, output.errors);
            assert_eq!(
                output.cst.as_ref().and_then(CstNode::rule_name),
                Some(RuleName::Statement)
            );
        }
    }

    #[test]
    fn test_redundant_input_is_one_error() {
        let output = parse_source("a + b)");
        assert_eq!(error_tokens(&output), vec![Some(")".to_string())]);
    }

    #[test]
    fn test_operator_deletion() {
        let output = parse_source("5 + + 3");
        assert_eq!(error_tokens(&output), vec![Some("+".to_string())]);
        // The tree still contains both operands
        let leaves: Vec<_> = output.cst.as_ref().unwrap().leaves().iter().map(|t| t.text.clone()).collect();
        assert_eq!(leaves, vec!["5", "+", "3"]);
    }

    #[test]
    fn test_missing_operand_at_end() {
        let output = parse_source("3 +");
        assert_eq!(error_tokens(&output), vec![None]);
        assert!(output.cst.is_some());
    }

    #[test]
    fn test_missing_close_paren_then_junk() {
        let output = parse_source("(a b");
        assert_eq!(error_tokens(&output), vec![Some("b".to_string())]);
    }

    #[test]
    fn test_junk_before_close_paren_is_deleted() {
        let output = parse_source("(a b) * 2");
        assert_eq!(error_tokens(&output), vec![Some("b".to_string())]);
        let leaves: Vec<_> = output.cst.as_ref().unwrap().leaves().iter().map(|t| t.text.clone()).collect();
        assert_eq!(leaves, vec!["(", "a", ")", "*", "2"]);
    }

    #[test]
    fn test_separate_mistakes_each_report() {
        let output = parse_source("+ 3 * * 4");
        assert_eq!(output.errors.len(), 2);
    }

    #[test]
    fn test_nesting_limit() {
        let source = format!("{}1{}", "(".repeat(5), ")".repeat(5));
        let lexed = tokenize(&source);
        let result = Parser::new(&lexed.tokens).with_max_depth(4).parse();
        assert!(matches!(
            result,
            Err(ParseFailure::NestingTooDeep { limit: 4, location }) if location.column == 5
        ));
        assert!(Parser::new(&lexed.tokens).with_max_depth(5).parse().is_ok());
    }

    #[test]
    fn test_empty_token_stream() {
        let output = parse(&[]).unwrap();
        assert_eq!(output.errors, vec![SyntaxError { token: None }]);
    }
}
