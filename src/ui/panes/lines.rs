//! Line list pane
//!
//! One row per analyzed line: its document line number, an accepted/rejected
//! marker and the highlighted source text. The selected line gets the
//! current-line background and an arrow.

use super::utils::{clamp_scroll, highlight_line, pane_block, visible_rows};
use crate::analysis::LineAnalysisResult;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_lines_pane(
    frame: &mut Frame,
    area: Rect,
    results: &[LineAnalysisResult],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" Lines ({}) ", results.len()), is_focused);

    if results.is_empty() {
        let paragraph = Paragraph::new("(no input)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_rows(area.height);

    // Keep the selection on screen
    if selected < *scroll_offset {
        *scroll_offset = selected;
    } else if selected >= *scroll_offset + visible_height {
        *scroll_offset = selected + 1 - visible_height;
    }
    clamp_scroll(results.len(), visible_height, scroll_offset);

    let visible_lines: Vec<Line> = results
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, result)| {
            let is_selected = idx == selected;

            let (marker, marker_style) = if result.accepted {
                ("✓", Style::default().fg(DEFAULT_THEME.success))
            } else {
                ("✗", Style::default().fg(DEFAULT_THEME.error))
            };

            let num_style = if is_selected {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![
                Span::styled(if is_selected { "▶" } else { " " }, num_style),
                Span::styled(format!("{:4} ", result.line_number), num_style),
                Span::styled(format!("{} ", marker), marker_style),
            ];
            spans.extend(highlight_line(&result.source_text).spans);

            if is_selected {
                for span in &mut spans {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
