//! Status bar widget

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::Theme;
use crate::machine::{Notice, NoticeLevel};

/// Application status
#[derive(Debug, Clone, Default)]
pub struct AppStatus {
    /// Last time the border was applied or cleared
    pub last_refresh: Option<DateTime<Utc>>,
    /// Poll interval in seconds
    pub poll_interval: u64,
    /// Workspace folder name
    pub workspace: String,
    /// Whether a branch color is currently applied
    pub is_stable: bool,
    /// Most recent message for the user
    pub notice: Option<Notice>,
}

/// Status widget
pub struct StatusWidget<'a> {
    status: &'a AppStatus,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(status: &'a AppStatus, theme: &'a Theme) -> Self {
        Self { status, theme }
    }

    fn format_last_refresh(&self) -> String {
        match self.status.last_refresh {
            Some(dt) => {
                let now = Utc::now();
                let duration = now.signed_duration_since(dt);

                if duration.num_seconds() < 60 {
                    format!("{}s ago", duration.num_seconds())
                } else if duration.num_minutes() < 60 {
                    format!("{}m ago", duration.num_minutes())
                } else {
                    format!("{}h ago", duration.num_hours())
                }
            }
            None => "never".to_string(),
        }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sync_status = if self.status.is_stable {
            Span::styled("◉ Synced ", Style::default().fg(self.theme.success))
        } else {
            Span::styled("○ Idle ", Style::default().fg(self.theme.muted))
        };

        let refresh_info = Span::styled(
            format!("│ Last refresh: {} ", self.format_last_refresh()),
            Style::default().fg(self.theme.muted),
        );

        let poll_info = Span::styled(
            format!("│ Poll: {}s ", self.status.poll_interval),
            Style::default().fg(self.theme.muted),
        );

        let notice = match &self.status.notice {
            Some(notice) => {
                let color = match notice.level {
                    NoticeLevel::Info => self.theme.primary,
                    NoticeLevel::Warning => self.theme.warning,
                    NoticeLevel::Error => self.theme.error,
                };
                let text = match &notice.action {
                    Some(action) => format!("{} → {}", notice.message, action),
                    None => notice.message.clone(),
                };
                Span::styled(
                    format!("│ {} ", truncate_str(&text, 80)),
                    Style::default().fg(color),
                )
            }
            None => Span::raw(""),
        };

        let line = Line::from(vec![sync_status, refresh_info, poll_info, notice]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted))
            .title(Span::styled(
                format!(" {} ", self.status.workspace),
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ));

        let paragraph = Paragraph::new(line).block(block);
        paragraph.render(area, buf);
    }
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a longer message", 10), "a longe...");
        assert_eq!(truncate_str("exactly 10", 10), "exactly 10");
        assert_eq!(truncate_str("ééééééééééé", 10), "ééééééé...");
    }

    #[test]
    fn test_never_refreshed() {
        let status = AppStatus::default();
        let theme = Theme::default();
        assert_eq!(StatusWidget::new(&status, &theme).format_last_refresh(), "never");
    }
}
