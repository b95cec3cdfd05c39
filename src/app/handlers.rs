//! Event handlers for keyboard input

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use super::state::ViewMode;

impl App {
    /// Handle key events
    pub(super) fn on_key_event(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.running = false;
            return;
        }

        match self.view_mode {
            ViewMode::Main => self.handle_main_keys(key),
            ViewMode::Help => self.handle_help_keys(key),
        }
    }

    /// Handle main view keys
    pub(super) fn handle_main_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.running = false;
            }
            KeyCode::Char('?') => {
                self.view_mode = ViewMode::Help;
            }
            KeyCode::Char('r') | KeyCode::Enter => {
                self.randomize();
            }
            KeyCode::Char('t') => {
                self.enable_thick_border();
            }
            _ => {}
        }
    }

    /// Handle help overlay keys
    pub(super) fn handle_help_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                self.view_mode = ViewMode::Main;
            }
            _ => {}
        }
    }
}
