//! Main application state and logic

mod actions;
mod handlers;
mod state;
mod views;

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};

use crate::ui::{AppStatus, HelpWidget, Theme};
use crate::watcher::Watcher;

use state::ViewMode;

/// Main application state
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current view mode
    view_mode: ViewMode,
    /// Branch watcher
    watcher: Watcher,
    /// Has the view been shown yet?
    shown: bool,
    /// Application status
    status: AppStatus,
    /// Theme
    theme: Theme,
}

impl App {
    /// Create a new application
    pub fn new(watcher: Watcher) -> Self {
        let workspace = watcher
            .root()
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| watcher.root().display().to_string());

        let status = AppStatus {
            poll_interval: watcher.config().poll_interval().as_secs(),
            workspace,
            ..AppStatus::default()
        };

        Self {
            running: false,
            view_mode: ViewMode::Main,
            watcher,
            shown: false,
            status,
            theme: Theme::default(),
        }
    }

    /// Run the application's main loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;

        let outcome = self.watcher.activate();
        self.on_outcome(outcome);

        while self.running {
            if let Some(outcome) = self.watcher.tick_if_due() {
                self.on_outcome(outcome);
            }

            terminal.draw(|frame| self.render(frame))?;

            if !self.shown {
                self.shown = true;
                self.on_first_visible();
            }

            // Handle events with timeout
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.on_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the application
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        match self.view_mode {
            ViewMode::Main => self.render_main(frame, area),
            ViewMode::Help => {
                self.render_main(frame, area);
                frame.render_widget(HelpWidget::new(&self.theme), area);
            }
        }
    }
}
