//! Indented text outline of a CST
//!
//! Plumbing rules are spliced out: their children are rendered in place of
//! the plumbing node, at the depth the plumbing node itself would have had.

use crate::analysis::constants::OUTLINE_INDENT;
use crate::parser::cst::{CstNode, RuleName, RuleNode};
use crate::parser::lexer::Token;

/// How rule names and terminals are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineStyle {
    /// `ruleName` and `Kind: "text"`
    Full,
    /// `expression` shortened to `expr`, terminals as bare text
    Simplified,
}

impl OutlineStyle {
    fn rule_label(self, name: RuleName) -> &'static str {
        match (self, name) {
            (OutlineStyle::Simplified, RuleName::Expression) => "expr",
            _ => name.name(),
        }
    }

    fn token_label(self, token: &Token) -> String {
        match self {
            OutlineStyle::Full => format!("{}: \"{}\"", token.kind, token.text),
            OutlineStyle::Simplified => token.text.clone(),
        }
    }
}

/// One line per rule node and terminal, depth first.
pub fn cst_to_outline(cst: &CstNode) -> Vec<String> {
    render_outline(cst, OutlineStyle::Full)
}

pub fn cst_to_simplified_outline(cst: &CstNode) -> Vec<String> {
    render_outline(cst, OutlineStyle::Simplified)
}

pub fn render_outline(cst: &CstNode, style: OutlineStyle) -> Vec<String> {
    let mut lines = Vec::new();
    emit(cst, 0, style, &mut lines);
    lines
}

fn emit(node: &CstNode, depth: usize, style: OutlineStyle, lines: &mut Vec<String>) {
    match node {
        CstNode::Token(token) => {
            lines.push(format!("{}{}", OUTLINE_INDENT.repeat(depth), style.token_label(token)));
        }
        CstNode::Rule(rule) if rule.name.is_plumbing() => {
            for child in rule.iter_children() {
                emit(child, depth, style, lines);
            }
        }
        CstNode::Rule(rule) => emit_rule(rule, depth, style, lines),
    }
}

fn emit_rule(rule: &RuleNode, depth: usize, style: OutlineStyle, lines: &mut Vec<String>) {
    lines.push(format!("{}{}", OUTLINE_INDENT.repeat(depth), style.rule_label(rule.name)));
    for child in rule.iter_children() {
        emit(child, depth + 1, style, lines);
    }
}
