//! Token pane: the selected line's token stream

use super::utils::{clamp_scroll, pane_block, token_style, visible_rows};
use crate::parser::lexer::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" Tokens ({}) ", tokens.len()), is_focused);

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_rows(area.height);
    clamp_scroll(tokens.len(), visible_height, scroll_offset);

    let kind_width = tokens.iter().map(|t| t.kind.name().len()).max().unwrap_or(0);

    let items: Vec<ListItem> = tokens
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|token| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", token.kind.name(), width = kind_width),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format!("{:<8}", token.text), token_style(token.kind)),
                Span::styled(
                    format!(" {}:{}-{}", token.start_line, token.start_column, token.end_column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
