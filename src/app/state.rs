//! Application state types and enums

/// Current view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Branch color view
    Main,
    /// Help overlay
    Help,
}
