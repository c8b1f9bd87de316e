//! Property-based tests for the analysis pipeline.
//!
//! 1. **Whitespace never tokenized**: no token stream contains a whitespace entry
//! 2. **Diagnostics are positioned**: every diagnostic has line and column ≥ 1
//! 3. **Pipeline is deterministic**: the same line always yields the same result
//! 4. **Symbol table is deduplicated**: rows ≤ distinct number/identifier lexemes
//! 5. **Renderers elide plumbing**: no outline line or rule node is a plumbing rule
//! 6. **Acceptance is consistent**: accepted iff no diagnostics and a tree exists

use std::collections::HashSet;

use exprscope::analysis::constants::PLUMBING_RULES;
use exprscope::analysis::{analyze_document, analyze_line};
use exprscope::parser::lexer::TokenKind;
use exprscope::render::{cst_to_graph, cst_to_outline, cst_to_simplified_outline, NodeClass};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

/// Lines built from the expression alphabet plus a few illegal characters.
fn expression_like() -> impl Strategy<Value = String> {
    "[a-c0-9+\\-*/=() .#$]{0,40}"
}

/// Syntactically valid expressions over a small alphabet.
fn valid_expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-z][a-z0-9]{0,3}",
        "[0-9]{1,3}",
        "[0-9]{1,2}\\.[0-9]{1,2}",
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/"]), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            inner.prop_map(|e| format!("({})", e)),
        ]
    })
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(256),
        ..default
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn whitespace_never_tokenized(input in "\\PC{0,80}") {
        let result = analyze_line(&input, 1);
        prop_assert!(result.tokens.iter().all(|t| t.kind != TokenKind::Whitespace));
    }

    #[test]
    fn diagnostics_are_positioned(input in expression_like()) {
        let result = analyze_line(&input, 1);
        for diag in &result.diagnostics {
            prop_assert!(diag.line >= 1 && diag.column >= 1, "{:?} for {:?}", diag, input);
        }
    }

    #[test]
    fn pipeline_is_deterministic(input in expression_like()) {
        prop_assert_eq!(analyze_line(&input, 3), analyze_line(&input, 3));
    }

    #[test]
    fn symbol_table_is_deduplicated(input in expression_like()) {
        let result = analyze_line(&input, 1);
        let distinct: HashSet<&str> = result
            .tokens
            .iter()
            .filter(|t| t.kind.is_symbol())
            .map(|t| t.text.as_str())
            .collect();
        prop_assert!(result.symbol_table.len() <= distinct.len());
        let ids: Vec<usize> = result.symbol_table.iter().map(|r| r.id).collect();
        let expected: Vec<usize> = (1..=ids.len()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn renderers_elide_plumbing(input in expression_like()) {
        let result = analyze_line(&input, 1);
        if let Some(cst) = &result.cst {
            for line in cst_to_outline(cst).iter().chain(cst_to_simplified_outline(cst).iter()) {
                prop_assert!(!PLUMBING_RULES.contains(&line.trim()), "{:?}", line);
            }
            let graph = cst_to_graph(Some(cst));
            for node in graph.nodes.iter().filter(|n| n.class == NodeClass::RuleNode) {
                prop_assert!(!PLUMBING_RULES.contains(&node.label.as_str()));
            }
        }
    }

    #[test]
    fn acceptance_is_consistent(input in expression_like()) {
        let result = analyze_line(&input, 1);
        prop_assert_eq!(
            result.accepted,
            result.diagnostics.is_empty() && result.cst.is_some()
        );
    }

    #[test]
    fn valid_expressions_are_accepted(expr in valid_expression()) {
        let result = analyze_line(&expr, 1);
        prop_assert!(result.accepted, "{:?}: {:?}", expr, result.diagnostics);
        let assignment = analyze_line(&format!("x = {}", expr), 1);
        prop_assert!(assignment.accepted, "{:?}", assignment.diagnostics);
    }

    #[test]
    fn document_lines_keep_numbers(lines in prop::collection::vec(expression_like(), 0..6)) {
        let text = lines.join("\n");
        let results = analyze_document(&text);
        let expected: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, _)| i + 1)
            .collect();
        let numbers: Vec<usize> = results.iter().map(|r| r.line_number).collect();
        prop_assert_eq!(numbers, expected);
    }
}
