//! Plain-text analysis report
//!
//! Formats the input, document totals and, for every analyzed line, its
//! tokens, symbol table, parse tree outline and diagnostics. Every section is
//! present for every line; an empty one says so instead of disappearing.

use crate::analysis::{DocumentStats, LineAnalysisResult};
use std::fmt::Write;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const REPORT_TITLE: &str = "Expression Analysis Report";

#[derive(Debug, Error)]
#[error("cannot write report to {}: {source}", .path.display())]
pub struct ReportError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Render the report. When `input` is empty the analyzed line texts stand in for it.
pub fn render_report(results: &[LineAnalysisResult], input: &str) -> String {
    let mut out = String::new();
    let stats = DocumentStats::from_results(results);

    heading(&mut out, REPORT_TITLE, '=');
    out.push('\n');

    heading(&mut out, "Input", '-');
    let input_text = if input.trim().is_empty() {
        results
            .iter()
            .map(|r| r.source_text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        input.to_string()
    };
    for line in input_text.lines() {
        let _ = writeln!(out, "    {}", line);
    }
    out.push('\n');

    heading(&mut out, "Analysis Summary", '-');
    let _ = writeln!(
        out,
        "Lines: {}  Tokens: {}  Symbols: {}  Errors: {}  Valid: {}  Success: {}%",
        stats.lines,
        stats.tokens,
        stats.symbols,
        stats.errors,
        stats.valid,
        stats.success_rate()
    );

    if results.is_empty() {
        out.push_str("\nNo analysis results available.\n");
        return out;
    }

    for result in results {
        out.push('\n');
        render_line(&mut out, result);
    }

    out
}

/// Render and write the report to `path`.
pub fn write_report(
    path: impl AsRef<Path>,
    results: &[LineAnalysisResult],
    input: &str,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    fs::write(path, render_report(results, input)).map_err(|source| ReportError {
        path: path.to_path_buf(),
        source,
    })
}

fn render_line(out: &mut String, result: &LineAnalysisResult) {
    let status = if result.accepted { "valid" } else { "invalid" };
    heading(
        out,
        &format!("Line {}: \"{}\" ({})", result.line_number, result.source_text, status),
        '-',
    );

    out.push_str("Tokens\n");
    if result.tokens.is_empty() {
        out.push_str("No tokens.\n");
    } else {
        let rows: Vec<Vec<String>> = result
            .tokens
            .iter()
            .map(|t| {
                vec![
                    t.text.clone(),
                    t.kind.to_string(),
                    t.text.clone(),
                    t.start_line.to_string(),
                    t.start_column.to_string(),
                ]
            })
            .collect();
        table(out, &["Token", "Type", "Value", "Line", "Col"], &rows);
    }
    out.push('\n');

    out.push_str("Symbol Table\n");
    if result.symbol_table.is_empty() {
        out.push_str("No symbols.\n");
    } else {
        let rows: Vec<Vec<String>> = result
            .symbol_table
            .iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.lexeme.clone(),
                    s.kind.to_string(),
                    s.line.to_string(),
                    s.column.to_string(),
                    s.length.to_string(),
                    s.scope.clone(),
                ]
            })
            .collect();
        table(out, &["ID", "Lexeme", "Type", "Line", "Col", "Len", "Scope"], &rows);
    }
    out.push('\n');

    out.push_str("Parse Tree\n");
    if result.outline_lines.is_empty() {
        out.push_str("No parse tree.\n");
    } else {
        for line in &result.outline_lines {
            let _ = writeln!(out, "    {}", line);
        }
    }
    out.push('\n');

    out.push_str("Diagnostics\n");
    if result.diagnostics.is_empty() {
        out.push_str("No errors.\n");
    } else {
        let rows: Vec<Vec<String>> = result
            .diagnostics
            .iter()
            .map(|d| {
                vec![
                    d.kind.to_string(),
                    d.line.to_string(),
                    d.column.to_string(),
                    d.offending_symbol.clone().unwrap_or_default(),
                    d.message.clone(),
                ]
            })
            .collect();
        table(out, &["Type", "Line", "Col", "Symbol", "Message"], &rows);
    }
}

fn heading(out: &mut String, title: &str, underline: char) {
    let _ = writeln!(out, "{}", title);
    let width = title.chars().count();
    out.extend(std::iter::repeat(underline).take(width));
    out.push('\n');
}

/// Left-aligned columns separated by two spaces, trailing blanks trimmed
fn table(out: &mut String, header: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    table_row(out, &widths, &header_cells);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    table_row(out, &widths, &rule);
    for row in rows {
        table_row(out, &widths, row);
    }
}

fn table_row(out: &mut String, widths: &[usize], cells: &[String]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{:<width$}", cell, width = *width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_document;

    #[test]
    fn test_sections_for_valid_line() {
        let results = analyze_document("x = 1 + y");
        let report = render_report(&results, "x = 1 + y");
        assert!(report.starts_with(REPORT_TITLE));
        assert!(report.contains("Line 1: \"x = 1 + y\" (valid)"));
        assert!(report.contains("Token  Type"));
        assert!(report.contains("ID  Lexeme  Type"));
        assert!(report.contains("    assignment"));
        assert!(report.contains("No errors."));
        assert!(report.contains("Success: 100%"));
    }

    #[test]
    fn test_empty_sections_for_lexical_failure() {
        let results = analyze_document("#");
        let report = render_report(&results, "");
        assert!(report.contains("No tokens."));
        assert!(report.contains("No symbols."));
        assert!(report.contains("No parse tree."));
        assert!(report.contains("lexical"));
    }

    #[test]
    fn test_no_results() {
        let report = render_report(&[], "");
        assert!(report.contains("No analysis results available."));
    }

    #[test]
    fn test_table_alignment() {
        let mut out = String::new();
        table(
            &mut out,
            &["A", "Long header"],
            &[vec!["value".to_string(), "x".to_string()]],
        );
        assert_eq!(out, "A      Long header\n-----  -----------\nvalue  x\n");
    }
}
