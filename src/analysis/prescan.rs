//! Pre-analysis scanner
//!
//! A heuristic pass over the raw characters of a line that runs before, and
//! independently of, tokenizing and parsing. It catches the common mistakes
//! (stray operators, unbalanced or empty parentheses, illegal characters)
//! with friendlier wording than a grammar failure would produce.
//!
//! Its findings overlap with the parser's on purpose; a line may carry both
//! a pre-scan and a parser diagnostic for the same mistake.

use super::diagnostics::ParseDiagnostic;
use crate::parser::charset::{is_allowed_char, is_operator_char, is_valid_text};

/// Run every pre-analysis rule over `input` and collect all findings.
///
/// Rules are independent and all of them report: edge operators, then
/// consecutive operators, then parenthesis balance, then empty parentheses,
/// then invalid characters.
pub fn pre_analyze(input: &str) -> Vec<ParseDiagnostic> {
    let chars: Vec<char> = input.chars().collect();
    let mut diagnostics = Vec::new();

    check_edge_operators(&chars, &mut diagnostics);
    check_consecutive_operators(&chars, &mut diagnostics);
    check_parentheses(&chars, &mut diagnostics);
    check_empty_parentheses(&chars, &mut diagnostics);

    if !is_valid_text(input) {
        check_invalid_characters(&chars, &mut diagnostics);
    }

    diagnostics
}

fn check_edge_operators(chars: &[char], out: &mut Vec<ParseDiagnostic>) {
    let first = chars.iter().position(|c| !c.is_whitespace());
    let last = chars.iter().rposition(|c| !c.is_whitespace());

    if let Some(i) = first {
        let op = chars[i];
        if is_operator_char(op) {
            out.push(ParseDiagnostic::syntactic(
                format!("Expression cannot start with operator '{}'", op),
                i + 1,
                op.to_string(),
            ));
        }
    }

    if let Some(i) = last {
        let op = chars[i];
        if is_operator_char(op) {
            out.push(ParseDiagnostic::syntactic(
                format!("Expression cannot end with operator '{}'", op),
                i + 1,
                op.to_string(),
            ));
        }
    }
}

/// Every adjacent operator pair, overlapping pairs included.
fn check_consecutive_operators(chars: &[char], out: &mut Vec<ParseDiagnostic>) {
    for (i, pair) in chars.windows(2).enumerate() {
        if is_operator_char(pair[0]) && is_operator_char(pair[1]) {
            out.push(ParseDiagnostic::syntactic(
                format!("Consecutive operators '{}{}' are not allowed", pair[0], pair[1]),
                i + 1,
                pair[0].to_string(),
            ));
        }
    }
}

fn check_parentheses(chars: &[char], out: &mut Vec<ParseDiagnostic>) {
    let mut open_positions: Vec<usize> = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' => open_positions.push(i + 1),
            ')' => {
                // An unmatched ')' does not consume a later '('
                if open_positions.pop().is_none() {
                    out.push(ParseDiagnostic::syntactic(
                        "Unmatched closing parenthesis ')'",
                        i + 1,
                        ")",
                    ));
                }
            }
            _ => {}
        }
    }

    for column in open_positions {
        out.push(ParseDiagnostic::syntactic(
            "Unmatched opening parenthesis '('",
            column,
            "(",
        ));
    }
}

/// Non-overlapping `(` whitespace* `)` runs.
fn check_empty_parentheses(chars: &[char], out: &mut Vec<ParseDiagnostic>) {
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '(' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if chars.get(j) == Some(&')') {
                out.push(ParseDiagnostic::syntactic(
                    "Empty parentheses '()' are not allowed",
                    i + 1,
                    "()",
                ));
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }
}

fn check_invalid_characters(chars: &[char], out: &mut Vec<ParseDiagnostic>) {
    for (i, &c) in chars.iter().enumerate() {
        if !is_allowed_char(c) {
            out.push(ParseDiagnostic::lexical(
                format!("Invalid character '{}'", c),
                i + 1,
                c.to_string(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::diagnostics::DiagnosticKind;

    fn messages(input: &str) -> Vec<(String, usize)> {
        pre_analyze(input)
            .into_iter()
            .map(|d| (d.message, d.column))
            .collect()
    }

    #[test]
    fn test_clean_input_has_no_findings() {
        assert!(pre_analyze("x = (a + 3.5) * b").is_empty());
    }

    #[test]
    fn test_edge_operators() {
        assert_eq!(
            messages("* 3 -"),
            vec![
                ("Expression cannot start with operator '*'".to_string(), 1),
                ("Expression cannot end with operator '-'".to_string(), 5),
            ]
        );
    }

    #[test]
    fn test_overlapping_consecutive_pairs() {
        let found = messages("a +++ b");
        assert_eq!(
            found,
            vec![
                ("Consecutive operators '++' are not allowed".to_string(), 3),
                ("Consecutive operators '++' are not allowed".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_spaced_operators_are_not_adjacent() {
        assert!(pre_analyze("5 + + 3").is_empty());
    }

    #[test]
    fn test_parenthesis_balance() {
        assert_eq!(
            messages(") (a + (b"),
            vec![
                ("Unmatched closing parenthesis ')'".to_string(), 1),
                ("Unmatched opening parenthesis '('".to_string(), 3),
                ("Unmatched opening parenthesis '('".to_string(), 8),
            ]
        );
    }

    #[test]
    fn test_empty_parentheses() {
        let found = pre_analyze("( ) + ()");
        let empty: Vec<_> = found
            .iter()
            .filter(|d| d.message.starts_with("Empty parentheses"))
            .map(|d| d.column)
            .collect();
        assert_eq!(empty, vec![1, 7]);
        assert!(found.iter().all(|d| d.kind == DiagnosticKind::Syntactic));
    }

    #[test]
    fn test_invalid_characters_are_lexical() {
        let found = pre_analyze("a + # $");
        let invalid: Vec<_> = found
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Lexical)
            .map(|d| (d.message.as_str(), d.column))
            .collect();
        assert_eq!(
            invalid,
            vec![("Invalid character '#'", 5), ("Invalid character '$'", 7)]
        );
    }
}
