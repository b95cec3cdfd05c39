//! Branch color view: the current branch, its color and the randomize action

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::{Theme, terminal_color};
use crate::machine::CurrentState;

/// Branch color view widget
pub struct BorderViewWidget<'a> {
    state: &'a CurrentState,
    theme: &'a Theme,
}

impl<'a> BorderViewWidget<'a> {
    pub fn new(state: &'a CurrentState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Text lines shown in the view, without styling
    pub fn labels(state: &CurrentState) -> [String; 3] {
        [
            format!("Branch: {}", state.branch.as_deref().unwrap_or("unknown")),
            format!("Color: {}", state.color.as_deref().unwrap_or("unset")),
            "Randomize Color".to_string(),
        ]
    }
}

impl Widget for BorderViewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = self
            .state
            .color
            .as_deref()
            .and_then(terminal_color)
            .unwrap_or(self.theme.muted);

        let [branch, color, action] = Self::labels(self.state);

        let mut color_line = vec![Span::styled(
            format!(" {} ", color),
            Style::default().fg(self.theme.fg),
        )];
        if self.state.color.is_some() {
            color_line.push(Span::styled("██████", Style::default().fg(accent)));
        }

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!(" {}", branch),
                Style::default()
                    .fg(self.theme.fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(color_line),
            Line::raw(""),
            Line::from(vec![
                Span::styled(" ↻ ", Style::default().fg(self.theme.primary)),
                Span::styled(
                    action,
                    Style::default()
                        .fg(self.theme.primary)
                        .add_modifier(Modifier::UNDERLINED),
                ),
                Span::styled("  (r)", Style::default().fg(self.theme.muted)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(self.theme.bg))
            .title(Span::styled(
                " Branch Border ",
                Style::default()
                    .fg(self.theme.secondary)
                    .add_modifier(Modifier::BOLD),
            ));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_for_empty_state() {
        let labels = BorderViewWidget::labels(&CurrentState::default());
        assert_eq!(labels[0], "Branch: unknown");
        assert_eq!(labels[1], "Color: unset");
        assert_eq!(labels[2], "Randomize Color");
    }

    #[test]
    fn test_render_shows_branch_and_color() {
        let state = CurrentState {
            branch: Some("main".to_string()),
            color: Some("#E53935".to_string()),
        };
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);

        BorderViewWidget::new(&state, &theme).render(area, &mut buf);

        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Branch: main"));
        assert!(text.contains("Color: #E53935"));
        assert!(text.contains("Randomize Color"));
    }
}
