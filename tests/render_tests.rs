// Integration tests for the outline and graph renderers

use exprscope::analysis::analyze_line;
use exprscope::render::{cst_to_graph, cst_to_outline, cst_to_simplified_outline, NodeClass};

const PLUMBING: [&str; 3] = ["expressionPrime", "termPrime", "statement"];

#[test]
fn test_outline_of_assignment() {
    let result = analyze_line("x = a * 2", 1);
    assert_eq!(
        result.outline_lines,
        vec![
            "assignment",
            "  Identifier: \"x\"",
            "  Equals: \"=\"",
            "  expression",
            "    term",
            "      factor",
            "        Identifier: \"a\"",
            "      Multiply: \"*\"",
            "      factor",
            "        NumberLiteral: \"2\"",
        ]
    );
}

#[test]
fn test_outlines_never_name_plumbing_rules() {
    for source in ["1 + 2 - 3", "a * (b / c)", "x = y", "3 +", "(a"] {
        let result = analyze_line(source, 1);
        let cst = result.cst.as_ref().unwrap();
        for line in cst_to_outline(cst).iter().chain(cst_to_simplified_outline(cst).iter()) {
            assert!(!PLUMBING.contains(&line.trim()), "{}: {:?}", source, line);
        }
    }
}

#[test]
fn test_simplified_outline_shows_values() {
    let result = analyze_line("a - 1", 1);
    let lines = cst_to_simplified_outline(result.cst.as_ref().unwrap());
    assert_eq!(
        lines,
        vec!["expr", "  term", "    factor", "      a", "  -", "  term", "    factor", "      1"]
    );
}

#[test]
fn test_graph_shape() {
    let result = analyze_line("a - 1", 1);
    let graph = cst_to_graph(result.cst.as_ref());

    let labels: Vec<_> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["expr", "term", "factor", "a", "-", "term", "factor", "1"]);
    assert_eq!(graph.edges.len(), graph.nodes.len() - 1);
    assert!(graph
        .nodes
        .iter()
        .filter(|n| n.class == NodeClass::TokenNode)
        .all(|n| ["a", "-", "1"].contains(&n.label.as_str())));
    assert!(graph.nodes.iter().all(|n| !PLUMBING.contains(&n.label.as_str())));
}

#[test]
fn test_graph_numbering_resets_each_call() {
    let first = analyze_line("a + b", 1);
    let second = analyze_line("c * (d - e)", 1);

    let before = cst_to_graph(first.cst.as_ref());
    let _ = cst_to_graph(second.cst.as_ref());
    let after = cst_to_graph(first.cst.as_ref());

    assert_eq!(before, after);
    assert_eq!(after.nodes[0].id, "node0");
}

#[test]
fn test_placeholder_for_missing_tree() {
    let result = analyze_line("a # b", 1);
    assert!(result.cst.is_none());
    let graph = cst_to_graph(result.cst.as_ref());
    assert_eq!(graph.nodes.len(), 1);
    assert_eq!(graph.nodes[0].label, "No Parse Tree Available");
    assert!(graph.edges.is_empty());
}

#[test]
fn test_mermaid_output() {
    let result = analyze_line("2 * y", 1);
    let mermaid = cst_to_graph(result.cst.as_ref()).to_mermaid();
    let lines: Vec<_> = mermaid.lines().collect();

    assert_eq!(lines[0], "graph TD");
    assert_eq!(lines[1], "  node0[\"expr\"]:::ruleNode");
    assert!(lines.contains(&"  node3[\"2\"]:::tokenNode"));
    assert!(lines.contains(&"  node0 --> node1"));
    assert!(lines.iter().any(|l| l.starts_with("classDef ruleNode")));
    assert!(lines.iter().any(|l| l.starts_with("classDef leafNode")));
}
