//! Main TUI application state and logic

use crate::analysis::{DocumentStats, LineAnalysisResult};
use crate::render::outline::OutlineStyle;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Rows moved by one PgUp/PgDn press
const PAGE_STEP: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Lines,
    Tokens,
    Symbols,
    Tree,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (lines -> tokens -> symbols -> tree -> diagnostics)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Lines => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Symbols,
            FocusedPane::Symbols => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Lines,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Lines => FocusedPane::Diagnostics,
            FocusedPane::Tokens => FocusedPane::Lines,
            FocusedPane::Symbols => FocusedPane::Tokens,
            FocusedPane::Tree => FocusedPane::Symbols,
            FocusedPane::Diagnostics => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// One result per analyzed line
    pub results: Vec<LineAnalysisResult>,

    /// Totals across `results`
    pub stats: DocumentStats,

    /// Index into `results` of the line shown in the detail panes
    pub selected: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Full or simplified tree outline
    pub outline_style: OutlineStyle,

    /// Per-pane scroll offsets
    pub lines_scroll: usize,
    pub tokens_scroll: usize,
    pub symbols_scroll: usize,
    pub tree_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(results: Vec<LineAnalysisResult>) -> Self {
        let stats = DocumentStats::from_results(&results);
        let status_message = if results.is_empty() {
            String::from("Nothing to analyze")
        } else {
            String::from("Ready!")
        };

        App {
            results,
            stats,
            selected: 0,
            focused_pane: FocusedPane::Lines,
            outline_style: OutlineStyle::Full,
            lines_scroll: 0,
            tokens_scroll: 0,
            symbols_scroll: 0,
            tree_scroll: 0,
            diagnostics_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    pub fn selected_result(&self) -> Option<&LineAnalysisResult> {
        self.results.get(self.selected)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes above, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(pane_area);

        // Right column: Tokens | Symbols (top), Tree (middle), Diagnostics (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(40),
                Constraint::Percentage(25),
            ])
            .split(columns[1]);

        let top_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(right_rows[0]);

        super::panes::render_lines_pane(
            frame,
            columns[0],
            &self.results,
            self.selected,
            self.focused_pane == FocusedPane::Lines,
            &mut self.lines_scroll,
        );

        let selected = self.results.get(self.selected);

        super::panes::render_tokens_pane(
            frame,
            top_row[0],
            selected.map(|r| r.tokens.as_slice()).unwrap_or_default(),
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_symbols_pane(
            frame,
            top_row[1],
            selected.map(|r| r.symbol_table.as_slice()).unwrap_or_default(),
            self.focused_pane == FocusedPane::Symbols,
            &mut self.symbols_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[1],
            selected,
            self.outline_style,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_diagnostics_pane(
            frame,
            right_rows[2],
            selected.map(|r| r.diagnostics.as_slice()).unwrap_or_default(),
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            &self.stats,
            self.selected,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.select_line(self.selected.saturating_sub(1)),
            KeyCode::Down => self.select_line(self.selected.saturating_add(1)),
            KeyCode::Home => self.select_line(0),
            KeyCode::End => self.select_line(self.results.len().saturating_sub(1)),
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(PAGE_STEP);
            }
            KeyCode::PageDown => {
                // Clamped against the content height at render time
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(PAGE_STEP);
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.outline_style = match self.outline_style {
                    OutlineStyle::Full => OutlineStyle::Simplified,
                    OutlineStyle::Simplified => OutlineStyle::Full,
                };
                self.tree_scroll = 0;
                self.status_message = match self.outline_style {
                    OutlineStyle::Full => "Full parse tree".to_string(),
                    OutlineStyle::Simplified => "Simplified parse tree".to_string(),
                };
            }
            _ => {}
        }
    }

    /// Select a line and reset the detail panes to the top
    fn select_line(&mut self, index: usize) {
        if self.results.is_empty() {
            return;
        }
        let index = index.min(self.results.len() - 1);
        if index == self.selected {
            return;
        }

        self.selected = index;
        self.tokens_scroll = 0;
        self.symbols_scroll = 0;
        self.tree_scroll = 0;
        self.diagnostics_scroll = 0;

        if let Some(result) = self.results.get(index) {
            self.status_message = if result.accepted {
                format!("Line {} accepted", result.line_number)
            } else {
                format!(
                    "Line {}: {} error(s)",
                    result.line_number,
                    result.error_count()
                )
            };
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Lines => &mut self.lines_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Symbols => &mut self.symbols_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Diagnostics => &mut self.diagnostics_scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_document;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn sample_app() -> App {
        App::new(analyze_document("1 + 2\n3 +\nx = y"))
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut app = sample_app();
        for _ in 0..5 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focused_pane, FocusedPane::Lines);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Diagnostics);
    }

    #[test]
    fn test_line_selection_is_clamped() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.status_message, "Line 2: 2 error(s)");
    }

    #[test]
    fn test_selecting_resets_detail_scroll() {
        let mut app = sample_app();
        app.focused_pane = FocusedPane::Tree;
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.tree_scroll, PAGE_STEP);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.tree_scroll, 0);
    }

    #[test]
    fn test_toggle_outline_and_quit() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.outline_style, OutlineStyle::Simplified);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.outline_style, OutlineStyle::Full);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_empty_document() {
        let mut app = App::new(Vec::new());
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 0);
        assert!(app.selected_result().is_none());
    }
}
