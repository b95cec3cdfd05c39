//! View rendering functions

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::App;
use crate::ui::{BorderViewWidget, StatusWidget};

impl App {
    /// Render the main view
    pub(super) fn render_main(&mut self, frame: &mut Frame, area: Rect) {
        // Main vertical layout: status, branch view, hint
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(7),    // Branch view
                Constraint::Length(1), // Keybindings hint
            ])
            .split(area);

        frame.render_widget(StatusWidget::new(&self.status, &self.theme), main_chunks[0]);

        frame.render_widget(
            BorderViewWidget::new(self.watcher.state(), &self.theme),
            main_chunks[1],
        );

        // Keybindings hint
        let hint = Line::from(vec![
            Span::styled(" r", Style::default().fg(self.theme.primary)),
            Span::styled(" randomize ", Style::default().fg(self.theme.muted)),
            Span::styled("t", Style::default().fg(self.theme.primary)),
            Span::styled(" thick border ", Style::default().fg(self.theme.muted)),
            Span::styled("?", Style::default().fg(self.theme.primary)),
            Span::styled(" help ", Style::default().fg(self.theme.muted)),
            Span::styled("q", Style::default().fg(self.theme.primary)),
            Span::styled(" quit", Style::default().fg(self.theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(hint), main_chunks[2]);
    }
}
