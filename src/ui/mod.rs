//! TUI components for git-branch-border

mod border_view;
mod help;
mod status;

pub use border_view::BorderViewWidget;
pub use help::HelpWidget;
pub use status::{AppStatus, StatusWidget};

use ratatui::style::Color;

use crate::color::hex_to_rgb;

/// Color scheme for the application
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub bg: Color,
    pub fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(138, 180, 248),    // Soft blue
            secondary: Color::Rgb(187, 154, 247),  // Lavender
            success: Color::Rgb(166, 218, 149),    // Soft green
            warning: Color::Rgb(238, 190, 111),    // Amber
            error: Color::Rgb(237, 135, 150),      // Coral red
            muted: Color::Rgb(108, 112, 134),      // Gray
            bg: Color::Rgb(30, 30, 46),            // Dark base
            fg: Color::Rgb(205, 214, 244),         // Light text
        }
    }
}

/// Terminal color for a hex string, if it parses
pub fn terminal_color(hex: &str) -> Option<Color> {
    hex_to_rgb(hex).map(|rgb| Color::Rgb(rgb.r, rgb.g, rgb.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_color() {
        assert_eq!(terminal_color("#E53935"), Some(Color::Rgb(229, 57, 53)));
        assert_eq!(terminal_color("nope"), None);
    }
}
