//! Per-line symbol table
//!
//! One row per distinct number or identifier lexeme, in first-seen order.
//! Later occurrences of a lexeme neither add rows nor move the recorded
//! position.

use super::constants::GLOBAL_SCOPE;
use crate::parser::lexer::{Token, TokenKind};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolTableRow {
    /// Sequential, starting at 1
    pub id: usize,
    pub lexeme: String,
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
    pub length: usize,
    pub scope: String,
}

pub fn build_symbol_table(tokens: &[Token]) -> Vec<SymbolTableRow> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut rows = Vec::new();

    for token in tokens.iter().filter(|t| t.kind.is_symbol()) {
        if !seen.insert(token.text.as_str()) {
            continue;
        }
        rows.push(SymbolTableRow {
            id: rows.len() + 1,
            lexeme: token.text.clone(),
            kind: token.kind,
            line: token.start_line,
            column: token.start_column,
            length: token.len(),
            scope: GLOBAL_SCOPE.to_string(),
        });
    }

    rows
}
