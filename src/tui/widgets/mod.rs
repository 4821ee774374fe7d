//! TUI widgets

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::theme::Theme;

pub mod breakdown;
pub mod dashboard;
pub mod delete_confirm;
pub mod help;
pub mod journal;
pub mod tabs;

/// Full-width horizontal rule
pub fn render_separator(area: Rect, buf: &mut Buffer, theme: Theme) {
    let line = "─".repeat(area.width as usize);
    buf.set_string(area.x, area.y, &line, Style::default().fg(theme.muted()));
}

/// Centered `key: action` hints for the bottom of a view
pub fn keybinding_line(theme: Theme, bindings: &[(&str, &str)]) -> Paragraph<'static> {
    let mut spans = Vec::with_capacity(bindings.len() * 3);
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default().fg(theme.accent()),
        ));
        spans.push(Span::styled(
            format!(": {}", action),
            Style::default().fg(theme.muted()),
        ));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
