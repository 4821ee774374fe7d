//! Delete confirmation popup widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::services::format_money;
use crate::tui::theme::Theme;
use crate::types::Entry;

/// Width and height of the delete confirm popup
const POPUP_WIDTH: u16 = 52;
const POPUP_HEIGHT: u16 = 8;

/// State for the delete confirmation dialog
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteConfirmState {
    /// Entry awaiting confirmation
    pub entry: Entry,
    /// 0 = Yes, 1 = No (default)
    pub selection: u8,
}

impl DeleteConfirmState {
    /// Ask about `entry`, with "No" preselected
    pub fn new(entry: Entry) -> Self {
        Self {
            entry,
            selection: 1,
        }
    }

    pub fn toggle(&mut self) {
        self.selection = 1 - self.selection.min(1);
    }

    pub fn confirmed(&self) -> bool {
        self.selection == 0
    }
}

/// Delete confirmation popup overlay
pub struct DeleteConfirmPopup<'a> {
    state: &'a DeleteConfirmState,
    currency: &'a str,
    theme: Theme,
}

impl<'a> DeleteConfirmPopup<'a> {
    pub fn new(state: &'a DeleteConfirmState, currency: &'a str, theme: Theme) -> Self {
        Self {
            state,
            currency,
            theme,
        }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }
}

impl Widget for DeleteConfirmPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (for overlay effect)
        Clear.render(area, buf);

        // Create block with border
        let block = Block::default()
            .title(" Delete? ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error()));

        let inner = block.inner(area);
        block.render(area, buf);

        // Layout for content
        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Length(1), // [1] Question
            Constraint::Length(1), // [2] Entry summary
            Constraint::Length(1), // [3] Padding
            Constraint::Length(1), // [4] Buttons
            Constraint::Length(1), // [5] Key hints
        ])
        .split(inner);

        let question_line = Line::from(Span::styled(
            "Delete this expense?",
            Style::default().fg(self.theme.text()),
        ));
        Paragraph::new(question_line)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let entry = &self.state.entry;
        let summary_line = Line::from(vec![
            Span::styled(
                entry.date.format("%Y-%m-%d").to_string(),
                Style::default().fg(self.theme.date()),
            ),
            Span::raw("  "),
            Span::styled(entry.category.as_str(), Style::default().fg(self.theme.text())),
            Span::raw("  "),
            Span::styled(
                format_money(self.currency, entry.amount),
                Style::default().fg(self.theme.money()),
            ),
        ]);
        Paragraph::new(summary_line)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        // Buttons: Yes / No
        let (yes_marker, yes_style) = if self.state.selection == 0 {
            (
                "▸ ",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(self.theme.muted()))
        };

        let (no_marker, no_style) = if self.state.selection == 1 {
            (
                "▸ ",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(self.theme.muted()))
        };

        let buttons_line = Line::from(vec![
            Span::styled(yes_marker, yes_style),
            Span::styled("Yes", yes_style),
            Span::styled("       ", Style::default()),
            Span::styled(no_marker, no_style),
            Span::styled("No", no_style),
        ]);
        Paragraph::new(buttons_line)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        // Key hints
        let hint_line = Line::from(vec![
            Span::styled(
                "←→",
                Style::default()
                    .fg(self.theme.muted())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Select  ", Style::default().fg(self.theme.muted())),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(self.theme.muted())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Confirm", Style::default().fg(self.theme.muted())),
        ]);
        Paragraph::new(hint_line)
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }
}
