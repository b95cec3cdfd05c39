//! Help overlay widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::Theme;

/// Help overlay widget
pub struct HelpWidget<'a> {
    theme: &'a Theme,
}

impl<'a> HelpWidget<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn render_keybinding(&self, key: &'static str, desc: &'static str) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("{:>12} ", key),
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc, Style::default().fg(self.theme.fg)),
        ])
    }

    fn section(&self, title: &'static str) -> Line<'static> {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(self.theme.secondary)
                .add_modifier(Modifier::BOLD),
        ))
    }
}

impl Widget for HelpWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Center the help popup
        let popup_width = 52.min(area.width.saturating_sub(4));
        let popup_height = 14.min(area.height.saturating_sub(4));

        let popup_x = (area.width.saturating_sub(popup_width)) / 2;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2;

        let popup_area = Rect {
            x: area.x + popup_x,
            y: area.y + popup_y,
            width: popup_width,
            height: popup_height,
        };

        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.secondary))
            .title(Span::styled(
                " Keyboard Shortcuts ",
                Style::default()
                    .fg(self.theme.secondary)
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let lines = vec![
            self.section(" Actions"),
            self.render_keybinding("r / Enter", "Randomize branch color"),
            self.render_keybinding("t", "Enable thick border (CSS)"),
            Line::raw(""),
            self.section(" Views"),
            self.render_keybinding("?", "Toggle this help"),
            self.render_keybinding("q / Esc", "Quit"),
            Line::raw(""),
            Line::from(Span::styled(
                " The border follows the checked-out branch.",
                Style::default().fg(self.theme.muted),
            )),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}
