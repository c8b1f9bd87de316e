//! Parse tree pane: the selected line's outline, full or simplified

use super::utils::{clamp_scroll, pane_block, visible_rows};
use crate::analysis::LineAnalysisResult;
use crate::parser::cst::RuleName;
use crate::render::outline::{cst_to_simplified_outline, OutlineStyle};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Padding, Paragraph},
    Frame,
};

pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    result: Option<&LineAnalysisResult>,
    style: OutlineStyle,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = match style {
        OutlineStyle::Full => " Parse Tree ",
        OutlineStyle::Simplified => " Parse Tree (simplified) ",
    };
    let block = pane_block(title.to_string(), is_focused);

    let lines: Vec<String> = match result.and_then(|r| r.cst.as_ref()) {
        Some(cst) => match style {
            OutlineStyle::Full => result.map(|r| r.outline_lines.clone()).unwrap_or_default(),
            OutlineStyle::Simplified => cst_to_simplified_outline(cst),
        },
        None => Vec::new(),
    };

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no parse tree)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_rows(area.height);
    clamp_scroll(lines.len(), visible_height, scroll_offset);

    let visible_lines: Vec<Line> = lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| outline_line(line))
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(paragraph, area);
}

/// Rule names in the rule color, terminals in the default color
fn outline_line(line: &str) -> Line<'static> {
    let content = line.trim_start();
    let indent = &line[..line.len() - content.len()];

    let is_rule = content == "expr" || RuleName::ALL.iter().any(|r| r.name() == content);
    let style = if is_rule {
        Style::default().fg(DEFAULT_THEME.rule_name)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };

    Line::from(vec![
        Span::styled(indent.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(content.to_string(), style),
    ])
}
