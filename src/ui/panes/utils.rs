//! Shared helpers for pane rendering: borders, scrolling and token colors

use crate::parser::lexer::{tokenize, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

pub(crate) fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused))
}

/// Rows available inside a bordered pane, at least 1
pub(crate) fn visible_rows(area_height: u16) -> usize {
    area_height.saturating_sub(2).max(1) as usize
}

/// Clamp a scroll offset so the last page stays full.
pub(crate) fn clamp_scroll(total_items: usize, visible_height: usize, offset: &mut usize) {
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *offset = (*offset).min(max_scroll);
    } else {
        *offset = 0;
    }
}

pub(crate) fn token_style(kind: TokenKind) -> Style {
    let fg = match kind {
        TokenKind::NumberLiteral => DEFAULT_THEME.number,
        TokenKind::Identifier => DEFAULT_THEME.identifier,
        TokenKind::LParen | TokenKind::RParen => DEFAULT_THEME.paren,
        TokenKind::Equals => DEFAULT_THEME.primary,
        k if k.is_operator() => DEFAULT_THEME.operator,
        _ => DEFAULT_THEME.fg,
    };
    Style::default().fg(fg)
}

/// Color a line of expression text by token kind; characters the lexer
/// rejected are underlined in the error color.
pub(crate) fn highlight_line(text: &str) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let lexed = tokenize(text);
    let mut styles = vec![Style::default().fg(DEFAULT_THEME.fg); chars.len()];

    for token in &lexed.tokens {
        let style = token_style(token.kind);
        for slot in styles
            .iter_mut()
            .take(token.end_column)
            .skip(token.start_column - 1)
        {
            *slot = style;
        }
    }
    for error in &lexed.errors {
        if let Some(slot) = styles.get_mut(error.location.column - 1) {
            *slot = Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
    }

    // Merge runs of equal style into one span each
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;
    for (c, style) in chars.into_iter().zip(styles) {
        if run_style.is_some_and(|s| s != style) {
            spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
        }
        run_style = Some(style);
        run.push(c);
    }
    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }

    Line::from(spans)
}
