//! Application state and event loop

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Widget,
    DefaultTerminal, Frame,
};

use crate::services::{format_money, Aggregator, Config, Journal};
use crate::types::{Entry, Granularity, SpendingReport, StoreWarning, Window, YearMonth};

use super::theme::Theme;
use super::widgets::{
    breakdown::BreakdownView,
    dashboard::{DashboardData, DashboardView},
    delete_confirm::{DeleteConfirmPopup, DeleteConfirmState},
    help::HelpPopup,
    journal::JournalView,
    tabs::Tab,
};

/// One-line message shown under the active view
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Main application
pub struct App {
    journal: Journal,
    currency: String,
    theme: Theme,
    /// Entries in stored order (breakdown order depends on it)
    entries: Vec<Entry>,
    /// Entries newest first, for the Journal tab
    journal_rows: Vec<Entry>,
    report: SpendingReport,
    month_total: f64,
    warning: Option<StoreWarning>,
    notice: Option<Notice>,
    should_quit: bool,
    current_tab: Tab,
    granularity: Granularity,
    month_only: bool,
    selected_month: YearMonth,
    journal_selected: usize,
    journal_scroll: usize,
    show_help: bool,
    delete_confirm: Option<DeleteConfirmState>,
}

impl App {
    /// Create the app and load the journal
    pub fn new(journal: Journal, currency: String, theme: Theme) -> Self {
        let mut app = Self {
            journal,
            currency,
            theme,
            entries: Vec::new(),
            journal_rows: Vec::new(),
            report: Aggregator::report(&[], Window::AllTime, Granularity::default()),
            month_total: 0.0,
            warning: None,
            notice: None,
            should_quit: false,
            current_tab: Tab::default(),
            granularity: Granularity::default(),
            month_only: false,
            selected_month: YearMonth::current(),
            journal_selected: 0,
            journal_scroll: 0,
            show_help: false,
            delete_confirm: None,
        };
        app.reload();
        app
    }

    /// Window the dashboard and breakdown aggregate over
    pub fn window(&self) -> Window {
        if self.month_only {
            Window::Month(self.selected_month)
        } else {
            Window::AllTime
        }
    }

    /// Re-read entries from the journal and recompute everything
    fn reload(&mut self) {
        let (entries, warning) = self.journal.load_entries();
        if let Some(w) = &warning {
            tracing::warn!("{}", w.message());
        }
        self.warning = warning;
        self.entries = entries;

        self.journal_rows = self.entries.clone();
        self.journal_rows
            .sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        self.journal_selected = self
            .journal_selected
            .min(self.journal_rows.len().saturating_sub(1));
        self.journal_scroll = JournalView::scroll_for(self.journal_selected, self.journal_scroll);

        self.refresh();
    }

    /// Recompute the report for the current selection
    fn refresh(&mut self) {
        self.report = Aggregator::report(&self.entries, self.window(), self.granularity);
        let month = Window::Month(self.selected_month);
        self.month_total = Aggregator::total(Aggregator::window(&self.entries, month));
        tracing::debug!(
            window = %self.report.window,
            granularity = self.granularity.label(),
            buckets = self.report.series.len(),
            "recomputed report"
        );
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            if self.delete_confirm.is_some() {
                self.handle_confirm_key(key.code);
                return;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Tab => {
                    self.current_tab = self.current_tab.next();
                }
                KeyCode::BackTab => {
                    self.current_tab = self.current_tab.prev();
                }
                KeyCode::Char(c @ '1'..='3') => {
                    if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                        self.current_tab = tab;
                    }
                }
                KeyCode::Char('?') => {
                    self.show_help = !self.show_help;
                }
                KeyCode::Char('r') => {
                    self.reload();
                    self.notice = Some(Notice::Info("Reloaded".into()));
                }
                KeyCode::Char('d') if self.current_tab == Tab::Dashboard => {
                    self.set_granularity(Granularity::Daily);
                }
                KeyCode::Char('w') if self.current_tab == Tab::Dashboard => {
                    self.set_granularity(Granularity::Weekly);
                }
                KeyCode::Char('m') if self.current_tab == Tab::Dashboard => {
                    self.set_granularity(Granularity::Monthly);
                }
                KeyCode::Char('t') if self.current_tab != Tab::Journal => {
                    self.month_only = !self.month_only;
                    self.refresh();
                }
                KeyCode::Left | KeyCode::Char('h') if self.current_tab != Tab::Journal => {
                    self.selected_month = self.selected_month.prev();
                    self.refresh();
                }
                KeyCode::Right | KeyCode::Char('l') if self.current_tab != Tab::Journal => {
                    self.selected_month = self.selected_month.next();
                    self.refresh();
                }
                KeyCode::Up | KeyCode::Char('k') if self.current_tab == Tab::Journal => {
                    self.select_entry(self.journal_selected.saturating_sub(1));
                }
                KeyCode::Down | KeyCode::Char('j') if self.current_tab == Tab::Journal => {
                    self.select_entry(self.journal_selected + 1);
                }
                KeyCode::Char('x') | KeyCode::Delete if self.current_tab == Tab::Journal => {
                    if let Some(entry) = self.journal_rows.get(self.journal_selected) {
                        self.delete_confirm = Some(DeleteConfirmState::new(entry.clone()));
                    }
                }
                _ => {}
            }
        }
    }

    /// Keys while the delete confirmation is open
    fn handle_confirm_key(&mut self, code: KeyCode) {
        let Some(state) = self.delete_confirm.as_mut() else {
            return;
        };
        match code {
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Char('h')
            | KeyCode::Char('l')
            | KeyCode::Tab
            | KeyCode::BackTab => state.toggle(),
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                state.selection = 0;
                self.resolve_confirm();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.delete_confirm = None;
            }
            KeyCode::Enter => self.resolve_confirm(),
            _ => {}
        }
    }

    fn resolve_confirm(&mut self) {
        let Some(state) = self.delete_confirm.take() else {
            return;
        };
        if !state.confirmed() {
            return;
        }

        match self.journal.delete_entry(state.entry.id) {
            Ok(entry) => {
                self.notice = Some(Notice::Info(format!(
                    "Deleted {} {} on {}",
                    entry.category,
                    format_money(&self.currency, entry.amount),
                    entry.date.format("%Y-%m-%d")
                )));
            }
            Err(e) => {
                tracing::warn!(id = state.entry.id, error = %e, "delete failed");
                self.notice = Some(Notice::Error(format!("Delete failed: {}", e)));
            }
        }
        self.reload();
    }

    fn set_granularity(&mut self, granularity: Granularity) {
        if self.granularity != granularity {
            self.granularity = granularity;
            self.refresh();
        }
    }

    fn select_entry(&mut self, index: usize) {
        if self.journal_rows.is_empty() {
            return;
        }
        self.journal_selected = index.min(self.journal_rows.len() - 1);
        self.journal_scroll = JournalView::scroll_for(self.journal_selected, self.journal_scroll);
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    /// Warning first, then the last action's outcome
    fn status_line(&self) -> Option<(String, Style)> {
        if let Some(warning) = &self.warning {
            return Some((
                format!("Warning: {}", warning.message()),
                Style::default().fg(self.theme.error()),
            ));
        }
        match &self.notice {
            Some(Notice::Info(msg)) => Some((msg.clone(), Style::default().fg(self.theme.muted()))),
            Some(Notice::Error(msg)) => {
                Some((msg.clone(), Style::default().fg(self.theme.error())))
            }
            None => None,
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let status = self.status_line();
        let [main_area, status_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(if status.is_some() { 1 } else { 0 }),
        ])
        .areas(area);

        match self.current_tab {
            Tab::Dashboard => {
                let data = DashboardData {
                    report: &self.report,
                    month_total: self.month_total,
                    selected_month: self.selected_month,
                    currency: &self.currency,
                };
                DashboardView::new(data, self.theme)
                    .with_tab(self.current_tab)
                    .render(main_area, buf);
            }
            Tab::Categories => {
                BreakdownView::new(&self.report, &self.currency, self.theme)
                    .with_tab(self.current_tab)
                    .render(main_area, buf);
            }
            Tab::Journal => {
                JournalView::new(&self.journal_rows, self.journal_scroll, self.theme)
                    .with_tab(self.current_tab)
                    .with_selected(Some(self.journal_selected))
                    .render(main_area, buf);
            }
        }

        if let Some((text, style)) = status {
            let text_width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
            let x = status_area.x + status_area.width.saturating_sub(text_width) / 2;
            buf.set_stringn(x, status_area.y, &text, status_area.width as usize, style);
        }

        if let Some(state) = &self.delete_confirm {
            let popup_area = DeleteConfirmPopup::centered_area(area);
            DeleteConfirmPopup::new(state, &self.currency, self.theme).render(popup_area, buf);
        }

        // Render help popup overlay if active
        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application
pub fn run(journal: Journal, config: Config) -> anyhow::Result<()> {
    // Theme detection queries the terminal, so it has to happen before raw mode
    let theme = Theme::detect();
    let mut app = App::new(journal, config.currency, theme);

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        if event::poll(Duration::from_millis(250))? {
            app.handle_event(event::read()?);
        }
    }

    Ok(())
}
