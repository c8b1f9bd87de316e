//! Symbol table pane

use super::utils::{clamp_scroll, pane_block, token_style, visible_rows};
use crate::analysis::SymbolTableRow;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

const HEADER: [&str; 7] = ["ID", "Lexeme", "Type", "Line", "Col", "Len", "Scope"];

pub fn render_symbols_pane(
    frame: &mut Frame,
    area: Rect,
    symbols: &[SymbolTableRow],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" Symbol Table ({}) ", symbols.len()), is_focused);

    if symbols.is_empty() {
        let paragraph = Paragraph::new("(no symbols)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // One row is taken by the header
    let visible_height = visible_rows(area.height).saturating_sub(1).max(1);
    clamp_scroll(symbols.len(), visible_height, scroll_offset);

    let header = Row::new(HEADER.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = symbols
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|row| {
            Row::new(vec![
                Cell::from(row.id.to_string()),
                Cell::from(row.lexeme.clone()).style(token_style(row.kind)),
                Cell::from(row.kind.name()),
                Cell::from(row.line.to_string()),
                Cell::from(row.column.to_string()),
                Cell::from(row.length.to_string()),
                Cell::from(row.scope.clone()),
            ])
            .style(Style::default().fg(DEFAULT_THEME.fg))
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(13),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
