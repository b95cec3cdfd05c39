//! Application actions for the branch border

use tracing::debug;

use super::App;
use crate::machine::{Outcome, Phase, Trigger};
use crate::watcher::log_notice;

impl App {
    /// Fold a state machine outcome into the status bar
    pub(super) fn on_outcome(&mut self, outcome: Outcome) {
        if outcome.refresh_view {
            self.status.last_refresh = self.watcher.last_refresh;
            self.status.is_stable = self.watcher.phase() == Phase::Stable;
        }

        if let Some(notice) = outcome.notice {
            log_notice(&notice);
            self.status.notice = Some(notice);
        }
    }

    /// The view was drawn for the first time
    pub(super) fn on_first_visible(&mut self) {
        debug!("View visible");
        let outcome = self.watcher.fire(Trigger::Visible);
        self.on_outcome(outcome);
    }

    /// Pick a new color for the current branch
    pub(super) fn randomize(&mut self) {
        self.status.notice = None;
        let outcome = self.watcher.fire(Trigger::Randomize);
        self.on_outcome(outcome);
    }

    /// Hook the stylesheet into the Custom CSS and JS Loader
    pub(super) fn enable_thick_border(&mut self) {
        let notice = self.watcher.enable_thick_border();
        self.status.notice = Some(notice);
    }
}
