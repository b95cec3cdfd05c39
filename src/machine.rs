//! Refresh cycle state machine
//!
//! Trigger events from the surrounding runtime (timer ticks, the randomize
//! action, the view becoming visible) are dispatched through
//! [`BorderMachine::handle`]. Collaborators are passed in per call so the
//! machine only owns its transient state.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::{debug, error};

use crate::apply;
use crate::assign::assign;
use crate::git::{VcsQuery, current_branch};
use crate::palette;
use crate::settings::{PRIMARY_COLORS, SettingsSink};
use crate::store::StateStore;
use crate::stylesheet::Stylesheet;
use crate::workspace::WorkspaceProvider;

/// What the view currently shows. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentState {
    pub branch: Option<String>,
    pub color: Option<String>,
}

/// Where the machine is in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// No refresh has run yet
    #[default]
    Starting,
    /// No workspace folder is open
    NoWorkspace,
    /// The workspace has no resolvable branch
    NoBranch,
    /// A branch is known and its color applied
    Stable,
}

/// Events the runtime delivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Periodic background refresh
    Tick,
    /// User asked for a new color
    Randomize,
    /// The view became visible
    Visible,
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// One-line message for the user, with at most one suggested follow-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub action: Option<String>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            action: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
            action: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Result of handling a trigger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The view should redraw from the new state
    pub refresh_view: bool,
    pub notice: Option<Notice>,
}

impl Outcome {
    fn unchanged() -> Self {
        Self::default()
    }

    fn refreshed() -> Self {
        Self {
            refresh_view: true,
            notice: None,
        }
    }

    fn notice(notice: Notice) -> Self {
        Self {
            refresh_view: false,
            notice: Some(notice),
        }
    }
}

/// External collaborators for one refresh cycle
pub struct Services<'a> {
    pub workspace: &'a dyn WorkspaceProvider,
    pub vcs: &'a dyn VcsQuery,
    pub store: &'a mut dyn StateStore,
    pub settings: &'a mut dyn SettingsSink,
    pub stylesheet: &'a Stylesheet,
}

/// Keeps the applied border color in step with the checked-out branch
pub struct BorderMachine {
    state: CurrentState,
    phase: Phase,
    rng: StdRng,
}

impl BorderMachine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            state: CurrentState::default(),
            phase: Phase::Starting,
            rng,
        }
    }

    pub fn state(&self) -> &CurrentState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Dispatch a trigger to its handler
    pub fn handle(&mut self, trigger: Trigger, services: &mut Services<'_>) -> Outcome {
        debug!("Handling {:?} in {:?}", trigger, self.phase);
        match trigger {
            Trigger::Tick => self.on_tick(services),
            Trigger::Randomize | Trigger::Visible => self.on_randomize(services),
        }
    }

    fn on_tick(&mut self, services: &mut Services<'_>) -> Outcome {
        let Some(root) = services.workspace.root() else {
            self.clear(Phase::NoWorkspace);
            return Outcome::refreshed();
        };

        let Some(branch) = current_branch(services.vcs, &root) else {
            self.clear(Phase::NoBranch);
            return Outcome::refreshed();
        };

        if self.state.branch.as_deref() == Some(branch.as_str()) && self.state.color.is_some() {
            return Outcome::unchanged();
        }

        self.stabilize(services, &root, branch, false)
    }

    fn on_randomize(&mut self, services: &mut Services<'_>) -> Outcome {
        let Some(root) = services.workspace.root() else {
            return Outcome::notice(Notice::info(
                "Branch border: open a workspace to set a branch color.",
            ));
        };

        let Some(branch) = current_branch(services.vcs, &root) else {
            return Outcome::notice(Notice::info(
                "Branch border: could not determine git branch.",
            ));
        };

        self.stabilize(services, &root, branch, true)
    }

    fn stabilize(
        &mut self,
        services: &mut Services<'_>,
        root: &Path,
        branch: String,
        force_new: bool,
    ) -> Outcome {
        let palette = palette::resolve(services.settings.get(root, PRIMARY_COLORS).as_ref());
        let color = assign(
            services.store,
            &palette,
            &branch,
            force_new,
            self.state.color.as_deref(),
            &mut self.rng,
        );

        self.state = CurrentState {
            branch: Some(branch),
            color: Some(color.clone()),
        };
        self.phase = Phase::Stable;

        if let Err(e) = apply::apply(services.settings, services.stylesheet, root, &color) {
            error!("Failed to apply border color {}: {:?}", color, e);
        }

        Outcome::refreshed()
    }

    fn clear(&mut self, phase: Phase) {
        self.state = CurrentState::default();
        self.phase = phase;
    }
}

impl Default for BorderMachine {
    fn default() -> Self {
        Self::new()
    }
}
