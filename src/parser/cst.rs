//! Concrete syntax tree definitions
//!
//! A CST keeps every rule invocation of the grammar, including the plumbing
//! rules (`statement`, `expressionPrime`, `termPrime`) that only encode
//! dispatch and repetition. Rule nodes group their children by slot, keyed by
//! the rule or token kind that produced them, in first-insertion order.

use super::lexer::{Token, TokenKind};
use crate::analysis::constants::PLUMBING_RULES;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The closed set of grammar rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleName {
    Statement,
    Assignment,
    Expression,
    ExpressionPrime,
    Term,
    TermPrime,
    Factor,
}

impl RuleName {
    pub const ALL: [RuleName; 7] = [
        RuleName::Statement,
        RuleName::Assignment,
        RuleName::Expression,
        RuleName::ExpressionPrime,
        RuleName::Term,
        RuleName::TermPrime,
        RuleName::Factor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RuleName::Statement => "statement",
            RuleName::Assignment => "assignment",
            RuleName::Expression => "expression",
            RuleName::ExpressionPrime => "expressionPrime",
            RuleName::Term => "term",
            RuleName::TermPrime => "termPrime",
            RuleName::Factor => "factor",
        }
    }

    /// Rules that exist only for dispatch or repetition and are elided from
    /// human-facing renderings.
    pub fn is_plumbing(self) -> bool {
        PLUMBING_RULES.contains(&self.name())
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of a child group inside a rule node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Rule(RuleName),
    Token(TokenKind),
}

impl Slot {
    pub fn name(self) -> &'static str {
        match self {
            Slot::Rule(rule) => rule.name(),
            Slot::Token(kind) => kind.name(),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Slots serialize as plain strings so the child map is a JSON object
impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A rule invocation and its grouped children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleNode {
    pub name: RuleName,
    pub children: IndexMap<Slot, Vec<CstNode>>,
    /// Set when the parser had to repair this node after a syntax error.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub recovered: bool,
}

impl RuleNode {
    pub fn new(name: RuleName) -> Self {
        Self {
            name,
            children: IndexMap::new(),
            recovered: false,
        }
    }

    /// Append a child under the slot its own kind names.
    pub fn push(&mut self, child: CstNode) {
        let slot = child.slot();
        self.children.entry(slot).or_default().push(child);
    }

    pub fn push_token(&mut self, token: Token) {
        self.push(CstNode::Token(token));
    }

    pub fn push_rule(&mut self, node: RuleNode) {
        self.push(CstNode::Rule(node));
    }

    /// Children in slot order, each slot's list in insertion order.
    pub fn iter_children(&self) -> impl Iterator<Item = &CstNode> {
        self.children.values().flatten()
    }

    /// Children stored under a rule slot.
    pub fn rules(&self, name: RuleName) -> impl Iterator<Item = &RuleNode> {
        self.children
            .get(&Slot::Rule(name))
            .into_iter()
            .flatten()
            .filter_map(CstNode::as_rule)
    }

    /// Terminals stored under a token slot.
    pub fn tokens(&self, kind: TokenKind) -> impl Iterator<Item = &Token> {
        self.children
            .get(&Slot::Token(kind))
            .into_iter()
            .flatten()
            .filter_map(CstNode::as_token)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A CST node: either a rule invocation or a terminal token leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CstNode {
    Rule(RuleNode),
    Token(Token),
}

impl CstNode {
    pub fn slot(&self) -> Slot {
        match self {
            CstNode::Rule(node) => Slot::Rule(node.name),
            CstNode::Token(token) => Slot::Token(token.kind),
        }
    }

    pub fn as_rule(&self) -> Option<&RuleNode> {
        match self {
            CstNode::Rule(node) => Some(node),
            CstNode::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            CstNode::Token(token) => Some(token),
            CstNode::Rule(_) => None,
        }
    }

    pub fn rule_name(&self) -> Option<RuleName> {
        self.as_rule().map(|node| node.name)
    }

    /// Every terminal under this node, depth first.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }
}

fn collect_leaves<'a>(node: &'a CstNode, out: &mut Vec<&'a Token>) {
    match node {
        CstNode::Token(token) => out.push(token),
        CstNode::Rule(rule) => {
            for child in rule.iter_children() {
                collect_leaves(child, out);
            }
        }
    }
}
