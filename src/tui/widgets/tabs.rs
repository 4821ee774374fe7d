//! Tab bar widget for view navigation

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Available tabs in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Categories,
    Journal,
}

impl Tab {
    /// Get the display label for this tab
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Categories => "Categories",
            Self::Journal => "Journal",
        }
    }

    /// Get all tabs in order
    pub fn all() -> &'static [Tab] {
        &[Tab::Dashboard, Tab::Categories, Tab::Journal]
    }

    /// Get the next tab (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Categories,
            Self::Categories => Self::Journal,
            Self::Journal => Self::Dashboard,
        }
    }

    /// Get the previous tab (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Dashboard => Self::Journal,
            Self::Categories => Self::Dashboard,
            Self::Journal => Self::Categories,
        }
    }

    /// Get tab from number key (1-3)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Dashboard),
            2 => Some(Self::Categories),
            3 => Some(Self::Journal),
            _ => None,
        }
    }
}

/// Tab bar widget showing available views
pub struct TabBar {
    selected: Tab,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Tab, theme: Theme) -> Self {
        Self { selected, theme }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Calculate total width of all tabs for centering
        let total_width: u16 = Tab::all()
            .iter()
            .map(|tab| {
                let label = tab.label();
                let display_len = if *tab == self.selected {
                    label.len() + 2 // "[label]"
                } else {
                    label.len()
                };
                display_len as u16 + 2 // + spacing
            })
            .sum::<u16>()
            .saturating_sub(2); // Remove trailing spacing

        // Center the tabs
        let start_x = area.x + (area.width.saturating_sub(total_width)) / 2;
        let mut x = start_x;

        for tab in Tab::all() {
            let is_selected = *tab == self.selected;
            let label = tab.label();

            // Calculate display string
            let display = if is_selected {
                format!("[{}]", label)
            } else {
                label.to_string()
            };

            let display_len = display.len() as u16;
            if x + display_len > area.x + area.width {
                break;
            }

            // Style based on selection
            let style = if is_selected {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted())
            };

            buf.set_string(x, area.y, &display, style);
            x += display_len + 2; // Add spacing between tabs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_labels() {
        assert_eq!(Tab::Dashboard.label(), "Dashboard");
        assert_eq!(Tab::Categories.label(), "Categories");
        assert_eq!(Tab::Journal.label(), "Journal");
    }

    #[test]
    fn test_tab_all() {
        let all = Tab::all();
        assert_eq!(all, &[Tab::Dashboard, Tab::Categories, Tab::Journal]);
    }

    #[test]
    fn test_tab_next_wraps() {
        assert_eq!(Tab::Dashboard.next(), Tab::Categories);
        assert_eq!(Tab::Categories.next(), Tab::Journal);
        assert_eq!(Tab::Journal.next(), Tab::Dashboard);
    }

    #[test]
    fn test_tab_prev_wraps() {
        assert_eq!(Tab::Dashboard.prev(), Tab::Journal);
        assert_eq!(Tab::Journal.prev(), Tab::Categories);
        assert_eq!(Tab::Categories.prev(), Tab::Dashboard);
    }

    #[test]
    fn test_tab_default() {
        assert_eq!(Tab::default(), Tab::Dashboard);
    }

    #[test]
    fn test_tab_from_number() {
        assert_eq!(Tab::from_number(1), Some(Tab::Dashboard));
        assert_eq!(Tab::from_number(2), Some(Tab::Categories));
        assert_eq!(Tab::from_number(3), Some(Tab::Journal));
        assert_eq!(Tab::from_number(0), None);
        assert_eq!(Tab::from_number(4), None);
    }

    #[test]
    fn test_tab_bar_brackets_selected() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);

        TabBar::new(Tab::Journal, Theme::Dark).render(area, &mut buf);

        let line: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(line.contains("[Journal]"));
        assert!(line.contains("Dashboard"));
        assert!(!line.contains("[Dashboard]"));
    }
}
