//! # Introduction
//!
//! exprscope analyzes short arithmetic and assignment expressions one line at
//! a time. For every line it produces the token stream, a symbol table, a
//! concrete syntax tree and positioned, human-readable diagnostics, then
//! renders the tree as an indented outline or a directed graph. A terminal
//! viewer built with [ratatui](https://docs.rs/ratatui) browses the results.
//!
//! ## Analysis pipeline
//!
//! ```text
//! Text → lines → Pre-scan ┐
//!              → Lexer → Symbol table → Parser → CST ┴→ LineAnalysisResult → Renderers / TUI
//! ```
//!
//! 1. [`parser`]: tokenises a line and builds a CST with error recovery.
//! 2. [`analysis`]: pre-scan heuristics, symbol table, diagnostics and the
//!    line orchestrator with document statistics.
//! 3. [`render`]: outline and graph (Mermaid) renderings of a CST.
//! 4. [`history`]: bounded most-recent-first record of past analyses.
//! 5. [`report`]: plain-text report of a whole document.
//! 6. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! ## Grammar
//!
//! ```text
//! statement  := assignment | expression
//! assignment := Identifier "=" expression
//! expression := term (("+" | "-") term)*
//! term       := factor (("*" | "/") factor)*
//! factor     := NumberLiteral | Identifier | "(" expression ")"
//! ```
//!
//! No expression is ever evaluated.

pub mod analysis;
pub mod history;
pub mod parser;
pub mod render;
pub mod report;
pub mod ui;

pub use analysis::{analyze_document, analyze_line, DocumentStats, LineAnalysisResult};
