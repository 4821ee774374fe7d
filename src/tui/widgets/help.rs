//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Keybindings grouped by section: (header, [(key, description)])
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("Tab / Shift+Tab", "Switch view"),
            ("1-3", "Jump to view"),
            ("Up/Down or j/k", "Select (Journal)"),
        ],
    ),
    (
        "Dashboard",
        &[
            ("d / w / m", "Daily/Weekly/Monthly"),
            ("t", "All time / month"),
            ("Left/Right or h/l", "Change month"),
        ],
    ),
    ("Journal", &[("x", "Delete entry")]),
    (
        "General",
        &[
            ("r", "Reload data"),
            ("q / Esc", "Quit"),
            ("?", "Toggle help"),
        ],
    ),
];

/// Width of the help popup
const POPUP_WIDTH: u16 = 46;

/// Rows: one header and one separator per section, the bindings, a blank
/// line before each section, the close hint and the border
const fn popup_height() -> u16 {
    let mut rows = 2 + 2; // border + blank line and close hint
    let mut i = 0;
    while i < SECTIONS.len() {
        rows += 3 + SECTIONS[i].1.len();
        i += 1;
    }
    rows as u16
}

const POPUP_HEIGHT: u16 = popup_height();

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
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

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (for overlay effect)
        Clear.render(area, buf);

        let title = format!(" spendlog v{} ", VERSION);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let bottom = inner.y + inner.height;
        let sep = "─".repeat(inner.width as usize);
        let mut y = inner.y;

        for (header, bindings) in SECTIONS {
            y += 1; // blank line
            if y >= bottom {
                return;
            }
            let header_line = Line::from(Span::styled(
                *header,
                Style::default()
                    .fg(self.theme.date())
                    .add_modifier(Modifier::BOLD),
            ));
            Paragraph::new(header_line).render(row(inner, y), buf);
            y += 1;
            if y >= bottom {
                return;
            }
            buf.set_string(inner.x, y, &sep, Style::default().fg(self.theme.muted()));
            y += 1;

            for (key, desc) in *bindings {
                if y >= bottom {
                    return;
                }
                render_keybinding(row(inner, y), buf, key, desc, self.theme);
                y += 1;
            }
        }

        y += 1;
        if y < bottom {
            let hint = Line::from(Span::styled(
                "Press ? to close",
                Style::default().fg(self.theme.muted()),
            ));
            Paragraph::new(hint)
                .alignment(Alignment::Center)
                .render(row(inner, y), buf);
        }
    }
}

fn row(inner: Rect, y: u16) -> Rect {
    Rect::new(inner.x, y, inner.width, 1)
}

/// Render a single keybinding line
fn render_keybinding(area: Rect, buf: &mut Buffer, key: &str, desc: &str, theme: Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!("  {:<20}", key),
            Style::default().fg(theme.accent()),
        ),
        Span::styled(desc, Style::default().fg(theme.text())),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .render(area, buf);
}
