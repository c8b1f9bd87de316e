//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, line selection, pane focus
//! - **[`panes`]**: stateless render functions for each visible pane (lines, tokens,
//!   symbol table, parse tree, diagnostics, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the results of
//! [`analyze_document`] and call [`App::run`] to start the event loop.
//!
//! [`analyze_document`]: crate::analysis::analyze_document
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
