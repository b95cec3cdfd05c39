//! Branch watcher
//!
//! Owns the real collaborators (git CLI, state file, settings files) and
//! drives the border state machine on a fixed poll interval.

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::git::{GitCli, current_branch};
use crate::machine::{
    BorderMachine, CurrentState, Notice, NoticeLevel, Outcome, Phase, Services, Trigger,
};
use crate::palette;
use crate::settings::{PRIMARY_COLORS, SettingsDocument, SettingsSink, VsCodeSettings};
use crate::store::{BranchColorMap, JsonFileStore, load_branch_colors};
use crate::stylesheet::Stylesheet;
use crate::thick_border;
use crate::workspace::{FolderWorkspace, WorkspaceProvider, ensure_gitignore};

/// Sleep between checks in headless mode
const HEADLESS_IDLE: Duration = Duration::from_millis(200);

/// Background watcher state
pub struct Watcher {
    config: Config,
    root: PathBuf,
    workspace: FolderWorkspace,
    git: GitCli,
    store: JsonFileStore,
    settings: VsCodeSettings,
    stylesheet: Stylesheet,
    machine: BorderMachine,
    /// When the last tick ran, `None` before activation
    last_tick: Option<Instant>,
    /// When the border was last re-applied or cleared
    pub last_refresh: Option<DateTime<Utc>>,
}

impl Watcher {
    /// Create a watcher for the workspace at `root`
    pub fn new(root: &Path, config: Config) -> Result<Self> {
        let store = JsonFileStore::new(config.state_path()?);
        let stylesheet = Stylesheet::new(config.stylesheet_path()?);
        let settings = VsCodeSettings::new(&config.settings_file, config.user_settings_path());

        debug!(
            "Watching {} (state: {}, stylesheet: {})",
            root.display(),
            store.path().display(),
            stylesheet.path().display()
        );

        Ok(Self {
            root: root.to_path_buf(),
            workspace: FolderWorkspace::new(root),
            git: GitCli,
            store,
            settings,
            stylesheet,
            machine: BorderMachine::new(),
            config,
            last_tick: None,
            last_refresh: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state(&self) -> &CurrentState {
        self.machine.state()
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// One-time setup followed by the first refresh
    pub fn activate(&mut self) -> Outcome {
        if self.config.manage_gitignore && self.root.is_dir() {
            if let Err(e) = ensure_gitignore(&self.git, &self.root, &self.config.settings_file) {
                error!("Failed to manage gitignore: {:?}", e);
            }
        }

        self.fire(Trigger::Tick)
    }

    /// Deliver a trigger to the state machine
    pub fn fire(&mut self, trigger: Trigger) -> Outcome {
        if trigger == Trigger::Tick {
            self.last_tick = Some(Instant::now());
        }

        let mut services = Services {
            workspace: &self.workspace,
            vcs: &self.git,
            store: &mut self.store,
            settings: &mut self.settings,
            stylesheet: &self.stylesheet,
        };
        let outcome = self.machine.handle(trigger, &mut services);

        if outcome.refresh_view {
            self.last_refresh = Some(Utc::now());
        }
        outcome
    }

    /// Check if the poll interval has elapsed
    pub fn is_due(&self) -> bool {
        self.last_tick
            .is_none_or(|last| last.elapsed() >= self.config.poll_interval())
    }

    /// Tick if the poll interval has elapsed
    pub fn tick_if_due(&mut self) -> Option<Outcome> {
        if self.is_due() {
            Some(self.fire(Trigger::Tick))
        } else {
            None
        }
    }

    /// Run the tick loop forever without a view
    pub fn run_headless(&mut self) -> Result<()> {
        info!(
            "Watching {} every {}s",
            self.root.display(),
            self.config.poll_interval().as_secs()
        );

        let outcome = self.activate();
        self.report(&outcome);

        loop {
            if let Some(outcome) = self.tick_if_due() {
                self.report(&outcome);
            }
            std::thread::sleep(HEADLESS_IDLE);
        }
    }

    fn report(&self, outcome: &Outcome) {
        if let Some(notice) = &outcome.notice {
            log_notice(notice);
        }
        if outcome.refresh_view {
            let state = self.machine.state();
            info!(
                "Branch: {} Color: {}",
                state.branch.as_deref().unwrap_or("unknown"),
                state.color.as_deref().unwrap_or("unset")
            );
        }
    }

    /// Register the stylesheet with the Custom CSS and JS Loader
    pub fn enable_thick_border(&self) -> Notice {
        let Some(extensions_dir) = self.config.extensions_path() else {
            return Notice::error("Could not locate the VS Code extensions folder.");
        };
        let Some(user_settings) = self.config.user_settings_path() else {
            return Notice::error("Could not locate the VS Code user settings file.");
        };

        let color = self.machine.state().color.clone().or_else(|| self.persisted_color());
        let notice = thick_border::enable_thick_border(
            &extensions_dir,
            &SettingsDocument::new(user_settings),
            &self.stylesheet,
            color.as_deref(),
        );
        log_notice(&notice);
        notice
    }

    /// Resolve the checked-out branch without touching any state
    pub fn current_branch(&self) -> Option<String> {
        let root = self.workspace.root()?;
        current_branch(&self.git, &root)
    }

    /// Remembered color of the checked-out branch
    pub fn persisted_color(&self) -> Option<String> {
        let branch = self.current_branch()?;
        self.branch_colors().remove(&branch)
    }

    /// Palette that the next assignment would draw from
    pub fn palette(&self) -> Vec<String> {
        palette::resolve(self.settings.get(&self.root, PRIMARY_COLORS).as_ref())
    }

    /// Every persisted branch color
    pub fn branch_colors(&self) -> BranchColorMap {
        load_branch_colors(&self.store)
    }

    /// Path of the branch color state file
    pub fn state_path(&self) -> &Path {
        self.store.path()
    }

    /// Path of the generated stylesheet
    pub fn stylesheet_path(&self) -> &Path {
        self.stylesheet.path()
    }
}

/// Write a notice to the log at its level
pub fn log_notice(notice: &Notice) {
    let action = notice
        .action
        .as_deref()
        .map(|a| format!(" ({})", a))
        .unwrap_or_default();

    match notice.level {
        NoticeLevel::Info => info!("{}{}", notice.message, action),
        NoticeLevel::Warning => warn!("{}{}", notice.message, action),
        NoticeLevel::Error => error!("{}{}", notice.message, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::COLOR_CUSTOMIZATIONS;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_config(temp: &TempDir) -> Config {
        Config {
            state_file: Some(temp.path().join("data/state.json")),
            stylesheet_file: Some(temp.path().join("data/custom.css")),
            user_settings_file: Some(temp.path().join("user/settings.json")),
            extensions_dir: Some(temp.path().join("extensions")),
            ..Config::default()
        }
    }

    #[test]
    fn test_activate_outside_repository_clears_state() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("project");
        std::fs::create_dir_all(&root).unwrap();

        let mut watcher = Watcher::new(&root, test_config(&temp)).unwrap();
        assert!(watcher.is_due());

        let outcome = watcher.activate();
        assert!(outcome.refresh_view);
        assert_eq!(*watcher.state(), CurrentState::default());
        assert!(!watcher.is_due());
        assert!(watcher.last_refresh.is_some());
        assert!(!root.join(".vscode/settings.json").exists());
        assert_eq!(
            std::fs::read_to_string(root.join(".gitignore")).unwrap(),
            ".vscode/settings.json\n"
        );
    }

    #[test]
    fn test_gitignore_management_can_be_disabled() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("project");
        std::fs::create_dir_all(&root).unwrap();
        let config = Config {
            manage_gitignore: false,
            ..test_config(&temp)
        };

        Watcher::new(&root, config).unwrap().activate();
        assert!(!root.join(".gitignore").exists());
    }

    #[test]
    fn test_missing_workspace_randomize_is_reported() {
        let temp = TempDir::new().unwrap();
        let mut watcher = Watcher::new(&temp.path().join("nope"), test_config(&temp)).unwrap();

        let outcome = watcher.fire(Trigger::Randomize);
        assert!(outcome.notice.is_some());
        assert!(watcher.last_refresh.is_none());
    }

    #[test]
    fn test_enable_thick_border_leaves_workspace_untouched() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("project");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(temp.path().join("extensions/be5invis.vscode-custom-css-7.2.2"))
            .unwrap();

        let watcher = Watcher::new(&root, test_config(&temp)).unwrap();
        let notice = watcher.enable_thick_border();
        assert_eq!(notice.level, NoticeLevel::Info);

        assert!(!root.join(".gitignore").exists());
        assert!(!root.join(".vscode").exists());
        assert!(temp.path().join("user/settings.json").exists());
        assert_eq!(watcher.phase(), Phase::Starting);
    }

    #[test]
    fn test_palette_reads_workspace_override() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("project");
        let doc = SettingsDocument::new(root.join(".vscode/settings.json"));
        doc.update(PRIMARY_COLORS, json!(["#AAAAAA", ""])).unwrap();
        doc.update(COLOR_CUSTOMIZATIONS, json!({})).unwrap();

        let watcher = Watcher::new(&root, test_config(&temp)).unwrap();
        assert_eq!(watcher.palette(), vec!["#AAAAAA"]);
        assert!(watcher.branch_colors().is_empty());
    }
}
