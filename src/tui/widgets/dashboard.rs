//! Dashboard view: summary cards and spending over time

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use super::{keybinding_line, render_separator};
use crate::services::{bucket_label, format_amount, format_money, format_sparkline};
use crate::tui::theme::Theme;
use crate::types::{Granularity, SeriesRow, SpendingReport, Window, YearMonth};

/// Maximum content width (keeps layout clean on wide terminals)
const MAX_CONTENT_WIDTH: u16 = 120;

const LABEL_WIDTH: usize = 22;
const BAR_WIDTH: usize = 30;
const AMOUNT_WIDTH: usize = 16;
const ROW_WIDTH: u16 = (LABEL_WIDTH + 2 + BAR_WIDTH + 2 + AMOUNT_WIDTH) as u16;

/// Data for the dashboard (references to avoid cloning)
#[derive(Debug)]
pub struct DashboardData<'a> {
    pub report: &'a SpendingReport,
    /// Total of the selected month, whatever the active window
    pub month_total: f64,
    pub selected_month: YearMonth,
    pub currency: &'a str,
}

/// Dashboard widget
pub struct DashboardView<'a> {
    data: DashboardData<'a>,
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> DashboardView<'a> {
    pub fn new(data: DashboardData<'a>, theme: Theme) -> Self {
        Self {
            data,
            selected_tab: Tab::Dashboard,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }
}

impl Widget for DashboardView<'_> {
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
            Constraint::Length(3), // [3] Summary cards
            Constraint::Length(1), // [4] Mode indicator
            Constraint::Length(1), // [5] Blank
            Constraint::Length(1), // [6] Header
            Constraint::Fill(1),   // [7] Series rows
            Constraint::Length(1), // [8] Separator
            Constraint::Length(1), // [9] Keybindings
        ])
        .split(centered_area);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);
        self.render_cards(chunks[3], buf);
        self.render_mode_indicator(chunks[4], buf);

        if self.data.report.series.is_empty() {
            self.render_empty(chunks[7], buf);
        } else {
            self.render_header(chunks[6], buf);
            self.render_rows(chunks[7], buf);
        }

        render_separator(chunks[8], buf, self.theme);
        keybinding_line(
            self.theme,
            &[
                ("Tab", "Switch view"),
                ("d/w/m", "Granularity"),
                ("t", "Timeframe"),
                ("←→", "Month"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
        )
        .render(chunks[9], buf);
    }
}

impl DashboardView<'_> {
    fn render_cards(&self, area: Rect, buf: &mut Buffer) {
        let halves =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);

        let month_label = bucket_label(Granularity::Monthly, self.data.selected_month.first_day());
        let cards = [
            (
                self.data.report.global_total,
                "Total spending (all time)".to_string(),
                self.theme.money(),
            ),
            (
                self.data.month_total,
                format!("Total spending ({})", month_label),
                self.theme.highlight(),
            ),
        ];

        for ((total, label, color), card_area) in cards.into_iter().zip(halves.iter()) {
            Paragraph::new(vec![
                Line::from(Span::styled(
                    format_money(self.data.currency, total),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(label, Style::default().fg(self.theme.muted()))),
            ])
            .alignment(Alignment::Center)
            .render(*card_area, buf);
        }
    }

    fn render_mode_indicator(&self, area: Rect, buf: &mut Buffer) {
        let modes = [
            ('d', Granularity::Daily),
            ('w', Granularity::Weekly),
            ('m', Granularity::Monthly),
        ];

        let mut spans = Vec::new();
        for (i, (key, mode)) in modes.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let style = self.toggle_style(*mode == self.data.report.granularity);
            spans.push(Span::styled(format!("{}:{}", key, mode.label()), style));
        }

        let month_only = matches!(self.data.report.window, Window::Month(_));
        let month_label = bucket_label(Granularity::Monthly, self.data.selected_month.first_day());
        spans.push(Span::styled("    t:", Style::default().fg(self.theme.muted())));
        spans.push(Span::styled("All time", self.toggle_style(!month_only)));
        spans.push(Span::styled(" | ", Style::default().fg(self.theme.muted())));
        spans.push(Span::styled(month_label, self.toggle_style(month_only)));

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn toggle_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted())
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let header_style = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);
        let text = format!(
            "{:<lw$}  {:<bw$}  {:>aw$}",
            self.data.report.granularity.column_label(),
            "Spending",
            "Amount",
            lw = LABEL_WIDTH,
            bw = BAR_WIDTH,
            aw = AMOUNT_WIDTH
        );
        buf.set_string(
            area.x + area.width.saturating_sub(ROW_WIDTH) / 2,
            area.y,
            text,
            header_style,
        );
    }

    /// Most recent buckets that fit, oldest at the top
    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let series = &self.data.report.series;
        let peak = self.data.report.peak_bucket_total();
        let skip = visible_tail_start(series.len(), area.height as usize);
        let x = area.x + area.width.saturating_sub(ROW_WIDTH) / 2;

        for (i, row) in series[skip..].iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }
            let line = self.series_line(row, peak);
            buf.set_line(x, y, &line, area.width.min(ROW_WIDTH));
        }
    }

    fn series_line(&self, row: &SeriesRow, peak: f64) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("{:<width$}", row.label, width = LABEL_WIDTH),
                Style::default().fg(self.theme.date()),
            ),
            Span::raw("  "),
            Span::styled(
                format_sparkline(row.total, peak, BAR_WIDTH),
                Style::default().fg(self.theme.bar()),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{:>width$}", format_amount(row.total), width = AMOUNT_WIDTH),
                Style::default().fg(self.theme.money()),
            ),
        ])
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        let text = format!("No expenses in {}", self.data.report.window);
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(self.theme.muted()),
        )))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

/// Index of the first row shown when only the last `rows` fit
pub fn visible_tail_start(len: usize, rows: usize) -> usize {
    len.saturating_sub(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Aggregator;
    use crate::types::Entry;
    use chrono::NaiveDate;

    fn make_entry(id: u64, category: &str, amount: f64, y: i32, m: u32, d: u32) -> Entry {
        Entry {
            id,
            category: category.to_string(),
            description: None,
            amount,
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            make_entry(1, "Food", 100.0, 2024, 1, 5),
            make_entry(2, "Food", 50.0, 2024, 1, 20),
            make_entry(3, "Transport", 30.0, 2024, 2, 3),
        ]
    }

    fn render_to_string(report: &SpendingReport, month_total: f64, width: u16) -> String {
        let area = Rect::new(0, 0, width, 24);
        let mut buf = Buffer::empty(area);
        let data = DashboardData {
            report,
            month_total,
            selected_month: YearMonth::new(2024, 2).unwrap(),
            currency: "THB",
        };
        DashboardView::new(data, Theme::Dark).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_visible_tail_start() {
        assert_eq!(visible_tail_start(3, 10), 0);
        assert_eq!(visible_tail_start(30, 10), 20);
        assert_eq!(visible_tail_start(0, 5), 0);
    }

    #[test]
    fn test_dashboard_renders_cards_and_series() {
        let report = Aggregator::report(&sample(), Window::AllTime, Granularity::Monthly);

        let content = render_to_string(&report, 30.0, 100);

        assert!(content.contains("THB 180"));
        assert!(content.contains("THB 30"));
        assert!(content.contains("Total spending (Feb 2024)"));
        assert!(content.contains("Jan 2024"));
        assert!(content.contains("Feb 2024"));
        assert!(content.contains("Month"));
        assert!(content.contains("▓"));
    }

    #[test]
    fn test_dashboard_weekly_header() {
        let report = Aggregator::report(&sample(), Window::AllTime, Granularity::Weekly);

        let content = render_to_string(&report, 30.0, 100);

        assert!(content.contains("Week of Dec 31, 2023"));
        assert!(content.contains("Week"));
    }

    #[test]
    fn test_dashboard_empty_window() {
        let window = Window::Month(YearMonth::new(2023, 6).unwrap());
        let report = Aggregator::report(&sample(), window, Granularity::Monthly);

        let content = render_to_string(&report, 0.0, 100);

        assert!(content.contains("No expenses in 2023-06"));
        assert!(content.contains("THB 180"));
    }

    #[test]
    fn test_dashboard_narrow_terminal_does_not_panic() {
        let report = Aggregator::report(&sample(), Window::AllTime, Granularity::Daily);
        let _ = render_to_string(&report, 0.0, 20);
    }
}
