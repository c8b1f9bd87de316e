//! Grammar rules
//!
//! ```text
//! statement       := assignment | expression
//! assignment      := Identifier "=" expression
//! expression      := term expressionPrime
//! expressionPrime := ( ("+" | "-") term )*
//! term            := factor termPrime
//! termPrime       := ( ("*" | "/") factor )*
//! factor          := NumberLiteral | Identifier | "(" expression ")"
//! ```
//!
//! Every rule always produces its node, even when it matched nothing, so the
//! tree shape depends only on which rules ran.

use super::cst::{RuleName, RuleNode};
use super::lexer::TokenKind;
use super::parse::{ParseFailure, Parser};
use tracing::trace;

/// Token kinds that can begin a factor
fn starts_factor(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::NumberLiteral | TokenKind::Identifier | TokenKind::LParen
    )
}

impl<'t> Parser<'t> {
    pub(crate) fn parse_statement(&mut self) -> Result<RuleNode, ParseFailure> {
        let mut node = RuleNode::new(RuleName::Statement);

        // Two tokens of lookahead decide between the alternatives
        if self.check(TokenKind::Identifier) && self.check_ahead(1, TokenKind::Equals) {
            node.push_rule(self.parse_assignment()?);
        } else {
            node.push_rule(self.parse_expression()?);
        }

        Ok(node)
    }

    fn parse_assignment(&mut self) -> Result<RuleNode, ParseFailure> {
        let mut node = RuleNode::new(RuleName::Assignment);

        if let Some(name) = self.consume() {
            node.push_token(name);
        }
        if let Some(equals) = self.consume() {
            node.push_token(equals);
        }
        node.push_rule(self.parse_expression()?);

        Ok(node)
    }

    fn parse_expression(&mut self) -> Result<RuleNode, ParseFailure> {
        let mut node = RuleNode::new(RuleName::Expression);
        node.push_rule(self.parse_term()?);
        node.push_rule(self.parse_expression_prime()?);
        Ok(node)
    }

    fn parse_expression_prime(&mut self) -> Result<RuleNode, ParseFailure> {
        let mut node = RuleNode::new(RuleName::ExpressionPrime);

        while self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            if let Some(op) = self.consume() {
                node.push_token(op);
            }
            node.push_rule(self.parse_term()?);
        }

        Ok(node)
    }

    fn parse_term(&mut self) -> Result<RuleNode, ParseFailure> {
        let mut node = RuleNode::new(RuleName::Term);
        node.push_rule(self.parse_factor()?);
        node.push_rule(self.parse_term_prime()?);
        Ok(node)
    }

    fn parse_term_prime(&mut self) -> Result<RuleNode, ParseFailure> {
        let mut node = RuleNode::new(RuleName::TermPrime);

        while self.check(TokenKind::Multiply) || self.check(TokenKind::Divide) {
            if let Some(op) = self.consume() {
                node.push_token(op);
            }
            node.push_rule(self.parse_factor()?);
        }

        Ok(node)
    }

    fn parse_factor(&mut self) -> Result<RuleNode, ParseFailure> {
        let mut node = RuleNode::new(RuleName::Factor);

        loop {
            match self.peek_kind() {
                Some(TokenKind::NumberLiteral) | Some(TokenKind::Identifier) => {
                    if let Some(token) = self.consume() {
                        node.push_token(token);
                    }
                    break;
                }
                Some(TokenKind::LParen) => {
                    self.parse_group(&mut node)?;
                    break;
                }
                _ => {
                    self.report_at_current();

                    // Single-token deletion: a stray operator in front of an operand
                    let stray = self
                        .peek_kind()
                        .is_some_and(|k| k.is_operator() || k == TokenKind::Equals);
                    if stray && self.peek_kind_ahead(1).is_some_and(starts_factor) {
                        self.skip();
                        continue;
                    }

                    trace!("recovery: factor left empty");
                    node.recovered = true;
                    break;
                }
            }
        }

        Ok(node)
    }

    /// `"(" expression ")"`, appended to the enclosing factor node
    fn parse_group(&mut self, node: &mut RuleNode) -> Result<(), ParseFailure> {
        let Some(open) = self.consume() else {
            return Ok(());
        };
        self.enter_group(open.start())?;
        node.push_token(open);

        node.push_rule(self.parse_expression()?);
        self.leave_group();

        if self.check(TokenKind::RParen) {
            if let Some(close) = self.consume() {
                node.push_token(close);
            }
            return Ok(());
        }

        self.report_at_current();

        if !self.is_at_end() && self.check_ahead(1, TokenKind::RParen) {
            // Single-token deletion: one junk token before the ')'
            self.skip();
            if let Some(close) = self.consume() {
                node.push_token(close);
            }
        } else {
            // Single-token insertion: behave as if ')' were present
            trace!("recovery: assuming missing ')'");
            node.recovered = true;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::cst::{CstNode, RuleName, RuleNode};
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::parse;

    fn parse_tree(source: &str) -> RuleNode {
        let lexed = tokenize(source);
        let output = parse(&lexed.tokens).unwrap();
        assert!(output.errors.is_empty(), "{:?}", output.errors);
        match output.cst {
            Some(CstNode::Rule(node)) => node,
            other => panic!("expected a rule root, got {:?}", other),
        }
    }

    fn only<'a>(node: &'a RuleNode, name: RuleName) -> &'a RuleNode {
        let mut found = node.rules(name);
        let first = found.next().unwrap_or_else(|| panic!("no {} under {}", name, node.name));
        assert!(found.next().is_none());
        first
    }

    #[test]
    fn test_assignment_dispatch() {
        let root = parse_tree("x = 1");
        let assignment = only(&root, RuleName::Assignment);
        assert_eq!(assignment.tokens(crate::parser::lexer::TokenKind::Identifier).count(), 1);
        only(assignment, RuleName::Expression);
        assert_eq!(root.rules(RuleName::Expression).count(), 0);
    }

    #[test]
    fn test_identifier_without_equals_is_expression() {
        let root = parse_tree("x + 1");
        only(&root, RuleName::Expression);
    }

    #[test]
    fn test_multiplication_nests_under_addition() {
        let root = parse_tree("2 + 3 * 4");
        let expr = only(&root, RuleName::Expression);
        let prime = only(expr, RuleName::ExpressionPrime);
        let rhs = only(prime, RuleName::Term);
        let term_prime = only(rhs, RuleName::TermPrime);
        assert_eq!(term_prime.rules(RuleName::Factor).count(), 1);

        // The left operand's repetition node exists but is empty
        let lhs = only(expr, RuleName::Term);
        assert!(only(lhs, RuleName::TermPrime).is_empty());
    }

    #[test]
    fn test_repetition_collects_under_one_slot() {
        let root = parse_tree("a - b - c");
        let expr = only(&root, RuleName::Expression);
        let prime = only(expr, RuleName::ExpressionPrime);
        assert_eq!(prime.rules(RuleName::Term).count(), 2);
        assert_eq!(
            prime.tokens(crate::parser::lexer::TokenKind::Minus).count(),
            2
        );
    }

    #[test]
    fn test_parenthesized_factor() {
        let root = parse_tree("(a)");
        let leaves: Vec<_> = CstNode::Rule(root)
            .leaves()
            .iter()
            .map(|t| t.text.clone())
            .collect();
        assert_eq!(leaves, vec!["(", "a", ")"]);
    }
}
