//! Tree renderers
//!
//! Pure transforms from a CST to human-facing forms:
//! - [`outline`]: indented text, full or simplified
//! - [`graph`]: node/edge description and Mermaid source
//!
//! Both elide the plumbing rules and are deterministic for a given tree.

pub mod graph;
pub mod outline;

pub use graph::{cst_to_graph, GraphDescription, GraphEdge, GraphNode, NodeClass};
pub use outline::{cst_to_outline, cst_to_simplified_outline, OutlineStyle};
