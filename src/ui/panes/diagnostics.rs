//! Diagnostics pane: the selected line's errors, in pipeline order

use super::utils::{clamp_scroll, pane_block, visible_rows};
use crate::analysis::{DiagnosticKind, ParseDiagnostic};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    diagnostics: &[ParseDiagnostic],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" Diagnostics ({}) ", diagnostics.len()), is_focused);

    if diagnostics.is_empty() {
        let paragraph = Paragraph::new("No errors.")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.success));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_rows(area.height);
    clamp_scroll(diagnostics.len(), visible_height, scroll_offset);

    let items: Vec<ListItem> = diagnostics
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|diag| {
            let kind_color = match diag.kind {
                DiagnosticKind::Lexical => DEFAULT_THEME.warning,
                DiagnosticKind::Syntactic => DEFAULT_THEME.error,
                DiagnosticKind::Runtime => DEFAULT_THEME.secondary,
            };
            let mut spans = vec![
                Span::styled(
                    format!("{:<9} ", diag.kind),
                    Style::default().fg(kind_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{}:{} ", diag.line, diag.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ];
            if let Some(symbol) = &diag.offending_symbol {
                spans.push(Span::styled(
                    format!("[{}] ", symbol),
                    Style::default().fg(DEFAULT_THEME.secondary),
                ));
            }
            spans.push(Span::styled(
                diag.message.clone(),
                Style::default().fg(DEFAULT_THEME.fg),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
