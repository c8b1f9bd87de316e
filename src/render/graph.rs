//! Directed-graph description of a CST
//!
//! Produces node declarations and parent→child edges suitable for a diagram
//! renderer, plus a Mermaid `graph TD` text form. Node ids are `node0`,
//! `node1`, ... numbered per call in depth-first order; plumbing rules are
//! spliced out and take no id.

use crate::parser::cst::{CstNode, RuleName, RuleNode};
use serde::Serialize;
use std::fmt::Write;

/// Id of the single node in the placeholder graph
pub const PLACEHOLDER_ID: &str = "A";
pub const PLACEHOLDER_LABEL: &str = "No Parse Tree Available";

const CLASS_DEFS: [&str; 3] = [
    "classDef ruleNode fill:#4f46e5,stroke:#312e81,stroke-width:2px,color:#fff",
    "classDef tokenNode fill:#059669,stroke:#065f46,stroke-width:2px,color:#fff",
    "classDef leafNode fill:#dc2626,stroke:#991b1b,stroke-width:2px,color:#fff",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeClass {
    /// A grammar rule
    RuleNode,
    /// A terminal token
    TokenNode,
    /// The placeholder for a missing tree
    LeafNode,
}

impl NodeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeClass::RuleNode => "ruleNode",
            NodeClass::TokenNode => "tokenNode",
            NodeClass::LeafNode => "leafNode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub class: NodeClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphDescription {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphDescription {
    /// The single-node graph shown when there is no tree
    pub fn placeholder() -> Self {
        Self {
            nodes: vec![GraphNode {
                id: PLACEHOLDER_ID.to_string(),
                label: PLACEHOLDER_LABEL.to_string(),
                class: NodeClass::LeafNode,
            }],
            edges: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.edges.is_empty()
            && self.nodes.len() == 1
            && self.nodes[0].id == PLACEHOLDER_ID
            && self.nodes[0].class == NodeClass::LeafNode
    }

    /// Mermaid flowchart source for this graph
    pub fn to_mermaid(&self) -> String {
        if self.is_placeholder() {
            return format!("graph TD\n  {}[{}]", PLACEHOLDER_ID, PLACEHOLDER_LABEL);
        }

        let mut out = String::from("graph TD\n");
        for node in &self.nodes {
            // Writing to a String cannot fail
            let _ = writeln!(
                out,
                "  {}[\"{}\"]:::{}",
                node.id,
                escape_label(&node.label),
                node.class.as_str()
            );
        }
        for edge in &self.edges {
            let _ = writeln!(out, "  {} --> {}", edge.from, edge.to);
        }
        out.push('\n');
        out.push_str(&CLASS_DEFS.join("\n"));
        out
    }
}

/// Graph for a tree, or the placeholder when there is none.
pub fn cst_to_graph(cst: Option<&CstNode>) -> GraphDescription {
    let Some(cst) = cst else {
        return GraphDescription::placeholder();
    };

    let mut builder = GraphBuilder::default();
    builder.visit(cst, None);
    builder.graph
}

#[derive(Default)]
struct GraphBuilder {
    graph: GraphDescription,
    next_id: usize,
}

impl GraphBuilder {
    fn add_node(&mut self, label: String, class: NodeClass, parent: Option<&str>) -> String {
        let id = format!("node{}", self.next_id);
        self.next_id += 1;

        self.graph.nodes.push(GraphNode {
            id: id.clone(),
            label,
            class,
        });
        if let Some(parent) = parent {
            self.graph.edges.push(GraphEdge {
                from: parent.to_string(),
                to: id.clone(),
            });
        }
        id
    }

    fn visit(&mut self, node: &CstNode, parent: Option<&str>) {
        match node {
            CstNode::Token(token) => {
                self.add_node(token.text.clone(), NodeClass::TokenNode, parent);
            }
            CstNode::Rule(rule) if rule.name.is_plumbing() => self.visit_children(rule, parent),
            CstNode::Rule(rule) => {
                let id = self.add_node(rule_label(rule.name).to_string(), NodeClass::RuleNode, parent);
                self.visit_children(rule, Some(&id));
            }
        }
    }

    fn visit_children(&mut self, rule: &RuleNode, parent: Option<&str>) {
        for child in rule.iter_children() {
            self.visit(child, parent);
        }
    }
}

fn rule_label(name: RuleName) -> &'static str {
    match name {
        RuleName::Expression => "expr",
        other => other.name(),
    }
}

/// Backslash-escape characters that would break a quoted Mermaid label.
pub fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '"' | '[' | ']' | '(' | ')' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
