//! Categories view: spending by category as percentage bars

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use super::{keybinding_line, render_separator};
use crate::services::{format_money, format_percentage_bar, percent_of};
use crate::tui::theme::Theme;
use crate::types::{CategoryRow, SpendingReport};

/// Maximum content width (keeps layout clean on wide terminals)
const MAX_CONTENT_WIDTH: u16 = 120;

const NAME_WIDTH: usize = 18;
const BAR_WIDTH: usize = 30;
const PERCENT_WIDTH: usize = 7;
const AMOUNT_WIDTH: usize = 18;
const ROW_WIDTH: u16 = (NAME_WIDTH + 2 + BAR_WIDTH + 2 + PERCENT_WIDTH + 2 + AMOUNT_WIDTH) as u16;

/// Breakdown widget over the active window
pub struct BreakdownView<'a> {
    report: &'a SpendingReport,
    currency: &'a str,
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> BreakdownView<'a> {
    pub fn new(report: &'a SpendingReport, currency: &'a str, theme: Theme) -> Self {
        Self {
            report,
            currency,
            selected_tab: Tab::Categories,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }
}

impl Widget for BreakdownView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Top padding
            Constraint::Length(1), // [1] Tabs
            Constraint::Length(1), // [2] Separator
            Constraint::Length(1), // [3] Title
            Constraint::Length(1), // [4] Blank
            Constraint::Fill(1),   // [5] Category rows
            Constraint::Length(1), // [6] Separator
            Constraint::Length(1), // [7] Keybindings
        ])
        .split(centered_area);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);
        self.render_title(chunks[3], buf);

        if self.report.breakdown.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                format!("No expenses in {}", self.report.window),
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        } else {
            self.render_rows(chunks[5], buf);
        }

        render_separator(chunks[6], buf, self.theme);
        keybinding_line(
            self.theme,
            &[
                ("Tab", "Switch view"),
                ("t", "Timeframe"),
                ("←→", "Month"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
        )
        .render(chunks[7], buf);
    }
}

impl BreakdownView<'_> {
    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let title = Line::from(vec![
            Span::styled(
                "Spending by category",
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({}): ", self.report.window),
                Style::default().fg(self.theme.muted()),
            ),
            Span::styled(
                format_money(self.currency, self.report.filtered_total),
                Style::default().fg(self.theme.money()),
            ),
        ]);
        Paragraph::new(title)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let x = area.x + area.width.saturating_sub(ROW_WIDTH) / 2;
        for (i, row) in self.report.breakdown.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }
            let line = self.category_line(row);
            buf.set_line(x, y, &line, area.width.min(ROW_WIDTH));
        }
    }

    fn category_line(&self, row: &CategoryRow) -> Line<'static> {
        let percent = percent_of(row.total, self.report.filtered_total);
        let name = if row.category.chars().count() > NAME_WIDTH {
            format!(
                "{}…",
                row.category.chars().take(NAME_WIDTH - 1).collect::<String>()
            )
        } else {
            row.category.clone()
        };

        Line::from(vec![
            Span::styled(
                format!("{:<width$}", name, width = NAME_WIDTH),
                Style::default().fg(self.theme.text()),
            ),
            Span::raw("  "),
            Span::styled(
                format_percentage_bar(percent, BAR_WIDTH),
                Style::default().fg(self.theme.bar()),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{:>width$.1}%", percent, width = PERCENT_WIDTH - 1),
                Style::default().fg(self.theme.muted()),
            ),
            Span::raw("  "),
            Span::styled(
                format!(
                    "{:>width$}",
                    format_money(self.currency, row.total),
                    width = AMOUNT_WIDTH
                ),
                Style::default().fg(self.theme.money()),
            ),
        ])
    }
}
