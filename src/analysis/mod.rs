//! Line orchestrator
//!
//! Runs the per-line pipeline and aggregates document statistics:
//!
//! ```text
//! line → pre-scan ─────────────────────────────┐
//!      → tokenize → symbol table → parse → CST ─┴→ LineAnalysisResult
//! ```
//!
//! A lexical error from the tokenizer ends the line early: the result keeps
//! the recognized tokens and only lexical diagnostics, with no symbol table
//! and no tree.

pub mod constants;
pub mod diagnostics;
pub mod prescan;
pub mod symbols;

use crate::parser::cst::CstNode;
use crate::parser::lexer::{tokenize, Token};
use crate::parser::parse::parse;
use crate::render::outline::cst_to_outline;
use prescan::pre_analyze;
use serde::Serialize;
use symbols::build_symbol_table;
use tracing::debug;

pub use diagnostics::{DiagnosticKind, ParseDiagnostic};
pub use symbols::SymbolTableRow;

/// Everything known about one analyzed line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAnalysisResult {
    /// 1-based index of the line in the original document
    pub line_number: usize,
    /// The trimmed line text
    pub source_text: String,
    pub tokens: Vec<Token>,
    pub symbol_table: Vec<SymbolTableRow>,
    pub cst: Option<CstNode>,
    pub diagnostics: Vec<ParseDiagnostic>,
    pub outline_lines: Vec<String>,
    pub accepted: bool,
    pub primary_diagnostic_kind: Option<DiagnosticKind>,
}

impl LineAnalysisResult {
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Analyze a single line. `line_number` only tags the result.
pub fn analyze_line(line: &str, line_number: usize) -> LineAnalysisResult {
    let source_text = line.trim().to_string();
    debug!(line_number, source = %source_text, "analyzing line");

    let pre_diagnostics = pre_analyze(&source_text);

    let lexed = tokenize(&source_text);
    if lexed.has_errors() {
        debug!(line_number, errors = lexed.errors.len(), "lexical errors, skipping parse");
        let diagnostics: Vec<ParseDiagnostic> = lexed
            .errors
            .iter()
            .map(ParseDiagnostic::from_lex_error)
            .collect();
        return LineAnalysisResult {
            line_number,
            source_text,
            tokens: lexed.tokens,
            symbol_table: Vec::new(),
            cst: None,
            diagnostics,
            outline_lines: Vec::new(),
            accepted: false,
            primary_diagnostic_kind: Some(DiagnosticKind::Lexical),
        };
    }

    let symbol_table = build_symbol_table(&lexed.tokens);

    let mut diagnostics = pre_diagnostics;
    let cst = match parse(&lexed.tokens) {
        Ok(output) => {
            diagnostics.extend(
                output
                    .errors
                    .iter()
                    .map(|e| ParseDiagnostic::from_syntax_error(e, &lexed.tokens, &source_text)),
            );
            output.cst
        }
        Err(failure) => {
            debug!(line_number, %failure, "parse failed");
            diagnostics.push(ParseDiagnostic::from_parse_failure(&failure));
            None
        }
    };

    let outline_lines = cst.as_ref().map(cst_to_outline).unwrap_or_default();
    let accepted = diagnostics.is_empty() && cst.as_ref().is_some_and(|c| c.as_rule().is_some());
    let primary_diagnostic_kind = diagnostics.first().map(|d| d.kind);

    debug!(
        line_number,
        tokens = lexed.tokens.len(),
        diagnostics = diagnostics.len(),
        accepted,
        "line analyzed"
    );

    LineAnalysisResult {
        line_number,
        source_text,
        tokens: lexed.tokens,
        symbol_table,
        cst,
        diagnostics,
        outline_lines,
        accepted,
        primary_diagnostic_kind,
    }
}

/// Analyze every non-blank line of `text`, keeping original line numbers.
pub fn analyze_document(text: &str) -> Vec<LineAnalysisResult> {
    text.split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| analyze_line(line, index + 1))
        .collect()
}

/// Totals across a document's analyzed lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub lines: usize,
    pub tokens: usize,
    pub symbols: usize,
    pub errors: usize,
    pub valid: usize,
}

impl DocumentStats {
    pub fn from_results(results: &[LineAnalysisResult]) -> Self {
        results.iter().fold(Self::default(), |mut stats, r| {
            stats.lines += 1;
            stats.tokens += r.tokens.len();
            stats.symbols += r.symbol_table.len();
            stats.errors += r.error_count();
            stats.valid += usize::from(r.accepted);
            stats
        })
    }

    /// Percentage of accepted lines against accepted plus errors, 0 when
    /// nothing was tokenized.
    pub fn success_rate(&self) -> u32 {
        let denominator = self.valid + self.errors;
        if self.tokens == 0 || denominator == 0 {
            return 0;
        }
        (self.valid as f64 / denominator as f64 * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_lines_are_accepted() {
        for source in ["3 + 4 * 5", "(a + b) * c", "x = 10"] {
            let result = analyze_line(source, 1);
            assert!(result.accepted, "{:?}: {:?}", source, result.diagnostics);
            assert!(result.diagnostics.is_empty());
            assert_eq!(result.primary_diagnostic_kind, None);
        }
    }

    #[test]
    fn test_lexical_short_circuit() {
        let result = analyze_line("a + #", 1);
        assert!(result.cst.is_none());
        assert!(result.symbol_table.is_empty());
        assert!(result.outline_lines.is_empty());
        assert_eq!(result.tokens.len(), 2);
        assert!(result
            .diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::Lexical));
        assert!(result.diagnostics[0].message.contains("'#'"));
    }

    #[test]
    fn test_prescan_diagnostics_come_first() {
        let result = analyze_line("(a + b", 1);
        assert!(!result.accepted);
        assert_eq!(result.diagnostics[0].message, "Unmatched opening parenthesis '('");
        assert!(result.cst.is_some());
        assert!(!result.outline_lines.is_empty());
    }

    #[test]
    fn test_runtime_failure_on_deep_nesting() {
        let depth = constants::MAX_NESTING_DEPTH + 1;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let result = analyze_line(&source, 1);
        assert!(result.cst.is_none());
        assert_eq!(result.primary_diagnostic_kind, Some(DiagnosticKind::Runtime));
        assert!(!result.accepted);
    }

    #[test]
    fn test_document_keeps_line_numbers() {
        let results = analyze_document("1 + 1\n\n   \n2 + 2");
        let numbers: Vec<_> = results.iter().map(|r| r.line_number).collect();
        assert_eq!(numbers, vec![1, 4]);
    }

    #[test]
    fn test_stats() {
        let results = analyze_document("1 + 1\nx +");
        let stats = DocumentStats::from_results(&results);
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.tokens, 5);
        assert_eq!(stats.symbols, 2);
        assert_eq!(stats.valid, 1);
        assert!(stats.errors >= 1);
        assert_eq!(DocumentStats::default().success_rate(), 0);
    }

    #[test]
    fn test_success_rate_rounds() {
        let stats = DocumentStats {
            lines: 3,
            tokens: 9,
            symbols: 4,
            errors: 1,
            valid: 2,
        };
        assert_eq!(stats.success_rate(), 67);
    }
}
