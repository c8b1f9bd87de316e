//! Expression line parser
//!
//! This module turns one line of text into tokens and a concrete syntax tree:
//! - [`lexer`]: Tokenization (line text → tokens)
//! - [`parse`] / [`rules`]: Parsing (tokens → CST) with error recovery
//! - [`cst`]: CST node definitions
//! - [`messages`]: User-facing error wording
//! - [`charset`]: Character classes shared with pre-analysis
//!
//! # Supported Language
//!
//! One statement per line: an assignment `name = expr` or a bare arithmetic
//! expression over number literals, identifiers, `+ - * /` and parentheses.
//! No unary operators, no function calls, no exponents.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser over an LL(1) grammar (two-token
//! lookahead only to pick `assignment`). No external parser generator
//! dependencies.

pub mod charset;
pub mod cst;
pub mod lexer;
pub mod messages;
pub mod parse;
pub mod rules;

pub use cst::{CstNode, RuleName, RuleNode, Slot, SourceLocation};
pub use lexer::{tokenize, LexError, LexOutput, Token, TokenKind};
pub use parse::{parse, ParseFailure, ParseOutput, Parser, SyntaxError};
