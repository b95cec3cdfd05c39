//! Configuration management for git-branch-border
//!
//! Stores tool preferences in a JSON file in the user's config directory.
//! Every field has a default, so a missing or partial file is fine.

use color_eyre::eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name used under the platform config and data directories
pub const APP_DIR_NAME: &str = "git-branch-border";

/// The name of the config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Version of the config file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seconds between branch checks
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Workspace settings file, relative to the workspace root
    #[serde(default = "default_settings_file")]
    pub settings_file: String,

    /// Keep the workspace settings file out of git
    #[serde(default = "default_manage_gitignore")]
    pub manage_gitignore: bool,

    /// Where branch colors are persisted (default: data dir)
    #[serde(default)]
    pub state_file: Option<PathBuf>,

    /// Where the thick border stylesheet is generated (default: data dir)
    #[serde(default)]
    pub stylesheet_file: Option<PathBuf>,

    /// VS Code user settings file (default: `<config dir>/Code/User/settings.json`)
    #[serde(default)]
    pub user_settings_file: Option<PathBuf>,

    /// VS Code extensions folder (default: `~/.vscode/extensions`)
    #[serde(default)]
    pub extensions_dir: Option<PathBuf>,
}

fn default_version() -> u32 {
    1
}

fn default_poll_interval() -> u64 {
    5
}

fn default_settings_file() -> String {
    ".vscode/settings.json".to_string()
}

fn default_manage_gitignore() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            poll_interval_secs: default_poll_interval(),
            settings_file: default_settings_file(),
            manage_gitignore: default_manage_gitignore(),
            state_file: None,
            stylesheet_file: None,
            user_settings_file: None,
            extensions_dir: None,
        }
    }
}

impl Config {
    /// The platform config directory for this tool
    pub fn dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| eyre!("Could not determine the user config directory"))
    }

    /// Load config from a directory, or create default if it doesn't exist
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

            let config: Config = serde_json::from_str(&content).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?;

            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        std::fs::create_dir_all(config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;

        let content = serde_json::to_string_pretty(self)
            .with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Interval between refresh ticks, never shorter than a second
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Branch color state file
    pub fn state_path(&self) -> Result<PathBuf> {
        match &self.state_file {
            Some(path) => Ok(path.clone()),
            None => data_dir().map(|dir| dir.join("state.json")),
        }
    }

    /// Generated stylesheet file
    pub fn stylesheet_path(&self) -> Result<PathBuf> {
        match &self.stylesheet_file {
            Some(path) => Ok(path.clone()),
            None => data_dir().map(|dir| dir.join("resources").join("custom.css")),
        }
    }

    /// VS Code user settings file, if it can be located
    pub fn user_settings_path(&self) -> Option<PathBuf> {
        self.user_settings_file.clone().or_else(|| {
            dirs::config_dir().map(|dir| dir.join("Code").join("User").join("settings.json"))
        })
    }

    /// VS Code extensions folder, if it can be located
    pub fn extensions_path(&self) -> Option<PathBuf> {
        self.extensions_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".vscode").join("extensions")))
    }
}

fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| eyre!("Could not determine the user data directory"))
}
