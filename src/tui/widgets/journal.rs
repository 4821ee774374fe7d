//! Journal view: every recorded expense, newest first

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use super::{keybinding_line, render_separator};
use crate::services::format_amount;
use crate::tui::theme::Theme;
use crate::types::Entry;

/// Maximum content width (keeps layout clean on wide terminals)
const MAX_CONTENT_WIDTH: u16 = 120;

/// Visible rows for scrolling (excluding header)
pub const VISIBLE_ROWS: usize = 15;

/// Column definition: (label, width). Date width includes the 2-char marker.
const COLUMNS: [(&str, u16); 4] = [
    ("Date", 14),
    ("Category", 18),
    ("Amount", 14),
    ("Description", 40),
];

fn table_width() -> u16 {
    COLUMNS.iter().map(|(_, w)| *w + 2).sum::<u16>() - 2
}

/// Journal widget
pub struct JournalView<'a> {
    entries: &'a [Entry],
    scroll_offset: usize,
    selected: Option<usize>,
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> JournalView<'a> {
    pub fn new(entries: &'a [Entry], scroll_offset: usize, theme: Theme) -> Self {
        Self {
            entries,
            scroll_offset,
            selected: None,
            selected_tab: Tab::Journal,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }

    pub fn with_selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    /// Scroll offset that keeps `selected` inside the visible window
    pub fn scroll_for(selected: usize, current: usize) -> usize {
        if selected < current {
            selected
        } else if selected >= current + VISIBLE_ROWS {
            selected + 1 - VISIBLE_ROWS
        } else {
            current
        }
    }
}

impl Widget for JournalView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let visible_rows = self.entries.len().clamp(1, VISIBLE_ROWS) as u16;
        let chunks = Layout::vertical([
            Constraint::Length(1),            // [0] Top padding
            Constraint::Length(1),            // [1] Tabs
            Constraint::Length(1),            // [2] Separator
            Constraint::Length(1),            // [3] Header
            Constraint::Length(visible_rows), // [4] Entry rows
            Constraint::Length(1),            // [5] Separator
            Constraint::Length(1),            // [6] Keybindings
            Constraint::Min(0),               // Remaining space
        ])
        .split(centered_area);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);

        if self.entries.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No expenses recorded yet",
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
        } else {
            self.render_header(chunks[3], buf);
            self.render_rows(chunks[4], buf);
        }

        render_separator(chunks[5], buf, self.theme);
        keybinding_line(
            self.theme,
            &[
                ("Tab", "Switch view"),
                ("↑↓", "Select"),
                ("x", "Delete"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
        )
        .render(chunks[6], buf);
    }
}

impl JournalView<'_> {
    fn table_x(area: Rect) -> u16 {
        area.x + area.width.saturating_sub(table_width()) / 2
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);
        let spans: Vec<Span> = COLUMNS
            .iter()
            .enumerate()
            .map(|(i, (label, width))| {
                let text = match i {
                    0 => format!("  {:<w$}", label, w = *width as usize - 2),
                    2 => format!("{:>w$}", label, w = *width as usize),
                    _ => format!("{:<w$}", label, w = *width as usize),
                };
                Span::styled(format!("{}  ", text), style)
            })
            .collect();
        buf.set_line(
            Self::table_x(area),
            area.y,
            &Line::from(spans),
            area.width.min(table_width()),
        );
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let start = self.scroll_offset.min(self.entries.len());
        let end = (start + area.height as usize).min(self.entries.len());
        let x = Self::table_x(area);

        for (i, entry) in self.entries[start..end].iter().enumerate() {
            let y = area.y + i as u16;
            let is_selected = self.selected == Some(start + i);
            let line = self.entry_line(entry, is_selected);
            buf.set_line(x, y, &line, area.width.min(table_width()));
        }
    }

    fn entry_line(&self, entry: &Entry, is_selected: bool) -> Line<'static> {
        let marker = if is_selected { "▸ " } else { "  " };
        let text_style = if is_selected {
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.text())
        };

        Line::from(vec![
            Span::styled(marker, Style::default().fg(self.theme.accent())),
            Span::styled(
                format!("{:<12}  ", entry.date.format("%Y-%m-%d")),
                Style::default().fg(self.theme.date()),
            ),
            Span::styled(
                format!("{:<18}  ", truncate(&entry.category, COLUMNS[1].1 as usize)),
                text_style,
            ),
            Span::styled(
                format!("{:>14}  ", format_amount(entry.amount)),
                Style::default().fg(self.theme.money()),
            ),
            Span::styled(
                truncate(
                    entry.description.as_deref().unwrap_or(""),
                    COLUMNS[3].1 as usize,
                ),
                Style::default().fg(self.theme.muted()),
            ),
        ])
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}…", text.chars().take(width - 1).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_entry(id: u64, day: u32, description: Option<&str>) -> Entry {
        Entry {
            id,
            category: "Food".into(),
            description: description.map(String::from),
            amount: 12.5 * id as f64,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        }
    }

    fn render_lines(view: JournalView<'_>) -> Vec<String> {
        let area = Rect::new(0, 0, 110, 24);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_scroll_for_keeps_selection_visible() {
        assert_eq!(JournalView::scroll_for(0, 0), 0);
        assert_eq!(JournalView::scroll_for(VISIBLE_ROWS - 1, 0), 0);
        assert_eq!(JournalView::scroll_for(VISIBLE_ROWS, 0), 1);
        assert_eq!(JournalView::scroll_for(3, 10), 3);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijk", 5), "abcd…");
    }

    #[test]
    fn test_journal_marks_selected_row() {
        let entries = vec![make_entry(2, 9, Some("dinner")), make_entry(1, 5, None)];

        let lines = render_lines(JournalView::new(&entries, 0, Theme::Dark).with_selected(Some(1)));

        let second = lines.iter().find(|l| l.contains("2024-01-05")).unwrap();
        assert!(second.contains("▸ 2024-01-05"));
        let first = lines.iter().find(|l| l.contains("2024-01-09")).unwrap();
        assert!(!first.contains('▸'));
        assert!(first.contains("dinner"));
        assert!(first.contains("25"));
    }

    #[test]
    fn test_journal_scroll_offset_skips_rows() {
        let entries: Vec<Entry> = (1..=20).map(|d| make_entry(d as u64, d, None)).collect();

        let lines = render_lines(JournalView::new(&entries, 5, Theme::Dark));
        let content = lines.join("\n");

        assert!(!content.contains("2024-01-05"));
        assert!(content.contains("2024-01-06"));
        assert!(content.contains("2024-01-20"));
    }

    #[test]
    fn test_journal_empty() {
        let lines = render_lines(JournalView::new(&[], 0, Theme::Dark));
        assert!(lines.join("\n").contains("No expenses recorded yet"));
    }
}
