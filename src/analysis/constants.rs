// Constants for the expression analyzer

/// Number of history records kept when no limit is configured
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Deepest parenthesis nesting the parser accepts before giving up
/// Each level costs a handful of stack frames in the recursive descent
pub const MAX_NESTING_DEPTH: usize = 256;

/// Grammar rules elided from outlines and diagrams
/// They only encode repetition (`expressionPrime`, `termPrime`) or dispatch (`statement`)
pub const PLUMBING_RULES: [&str; 3] = ["statement", "expressionPrime", "termPrime"];

/// Scope marker recorded for every symbol table row
pub const GLOBAL_SCOPE: &str = "global";

/// Indentation unit for outline rendering
pub const OUTLINE_INDENT: &str = "  ";
