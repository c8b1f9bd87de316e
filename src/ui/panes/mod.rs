//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`lines`]: Analyzed lines with accepted/rejected markers and highlighting
//! - [`tokens`]: Token stream of the selected line
//! - [`symbols`]: Symbol table of the selected line
//! - [`tree`]: Parse tree outline, full or simplified
//! - [`diagnostics`]: Errors of the selected line
//! - [`status`]: Status bar with keybindings and document statistics
//! - `utils`: Shared border, scrolling and highlighting helpers
//!
//! Each pane module exports one stateless `render_*` function; the only state
//! it touches is the scroll offset it is handed.

mod utils;

pub mod diagnostics;
pub mod lines;
pub mod status;
pub mod symbols;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use diagnostics::render_diagnostics_pane;
pub use lines::render_lines_pane;
pub use status::render_status_bar;
pub use symbols::render_symbols_pane;
pub use tokens::render_tokens_pane;
pub use tree::render_tree_pane;
