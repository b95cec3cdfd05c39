//! VS Code settings documents
//!
//! Settings are flat JSON objects with dotted keys, e.g.
//! `"workbench.colorCustomizations": { ... }`. Workspace settings live under
//! the workspace root and take precedence over the user settings file.

use color_eyre::eyre::{Context, Result, eyre};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Theme color overrides object
pub const COLOR_CUSTOMIZATIONS: &str = "workbench.colorCustomizations";
/// Name of the active color theme
pub const COLOR_THEME: &str = "workbench.colorTheme";
/// User palette override
pub const PRIMARY_COLORS: &str = "vscodeBorder.primaryColors";
/// Stylesheets loaded by the Custom CSS and JS Loader extension
pub const CUSTOM_CSS_IMPORTS: &str = "vscode_custom_css.imports";
/// Whether the Custom CSS and JS Loader may patch the workbench
pub const CUSTOM_CSS_POLICY: &str = "vscode_custom_css.policy";

/// A single settings.json file
#[derive(Debug, Clone)]
pub struct SettingsDocument {
    path: PathBuf,
}

impl SettingsDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole document. A missing or blank file is an empty object;
    /// anything that does not parse as a JSON object is an error.
    pub fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file: {}", self.path.display()))?;

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", self.path.display()))?
        {
            Value::Object(map) => Ok(map),
            _ => Err(eyre!(
                "Settings file {} is not a JSON object",
                self.path.display()
            )),
        }
    }

    /// Read one key, `None` if absent or the document is unreadable
    pub fn get(&self, key: &str) -> Option<Value> {
        match self.load() {
            Ok(mut map) => map.remove(key),
            Err(e) => {
                warn!("{:?}", e);
                None
            }
        }
    }

    /// Set one key, preserving every other key. Refuses to touch a document
    /// that cannot be parsed so hand-written content is never lost.
    pub fn update(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut content = serde_json::to_string_pretty(&Value::Object(map))
            .with_context(|| "Failed to serialize settings")?;
        content.push('\n');

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings file: {}", self.path.display()))?;

        debug!("Updated '{}' in {}", key, self.path.display());
        Ok(())
    }
}

/// The settings the border core reads and writes, resolved per workspace root
pub trait SettingsSink {
    /// Effective value of `key` for the workspace at `root`
    fn get(&self, root: &Path, key: &str) -> Option<Value>;

    /// Write `key` into the workspace settings of `root`
    fn update(&mut self, root: &Path, key: &str, value: Value) -> Result<()>;
}

/// Workspace `.vscode/settings.json` layered over the user settings file
#[derive(Debug, Clone)]
pub struct VsCodeSettings {
    /// Workspace settings path, relative to the workspace root
    workspace_file: PathBuf,
    user: Option<SettingsDocument>,
}

impl VsCodeSettings {
    pub fn new(workspace_file: impl Into<PathBuf>, user_file: Option<PathBuf>) -> Self {
        Self {
            workspace_file: workspace_file.into(),
            user: user_file.map(SettingsDocument::new),
        }
    }

    /// The workspace document for `root`
    pub fn workspace(&self, root: &Path) -> SettingsDocument {
        SettingsDocument::new(root.join(&self.workspace_file))
    }
}

impl SettingsSink for VsCodeSettings {
    fn get(&self, root: &Path, key: &str) -> Option<Value> {
        self.workspace(root)
            .get(key)
            .or_else(|| self.user.as_ref().and_then(|user| user.get(key)))
    }

    fn update(&mut self, root: &Path, key: &str, value: Value) -> Result<()> {
        self.workspace(root).update(key, value)
    }
}

/// Settings held in memory, counting writes
#[cfg(test)]
#[derive(Default)]
pub struct MemorySettings {
    pub values: Map<String, Value>,
    pub writes: usize,
}

#[cfg(test)]
impl SettingsSink for MemorySettings {
    fn get(&self, _root: &Path, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn update(&mut self, _root: &Path, key: &str, value: Value) -> Result<()> {
        self.writes += 1;
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_update_preserves_other_keys() {
        let temp = TempDir::new().unwrap();
        let doc = SettingsDocument::new(temp.path().join(".vscode/settings.json"));

        doc.update("editor.fontSize", json!(14)).unwrap();
        doc.update(COLOR_CUSTOMIZATIONS, json!({"panel.border": "#E53935"}))
            .unwrap();

        assert_eq!(doc.get("editor.fontSize"), Some(json!(14)));
        assert_eq!(
            doc.get(COLOR_CUSTOMIZATIONS),
            Some(json!({"panel.border": "#E53935"}))
        );
    }

    #[test]
    fn test_unparseable_document_is_never_overwritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        let original = "{\n  // my comment\n  \"editor.fontSize\": 14\n}\n";
        std::fs::write(&path, original).unwrap();

        let doc = SettingsDocument::new(&path);
        assert_eq!(doc.get("editor.fontSize"), None);
        assert!(doc.update(COLOR_THEME, json!("Monokai")).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_blank_document_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(SettingsDocument::new(&path).load().unwrap().is_empty());
    }

    #[test]
    fn test_workspace_value_wins_over_user() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("project");
        let user_path = temp.path().join("user.json");
        std::fs::write(
            &user_path,
            r##"{"workbench.colorTheme": "Solarized", "vscodeBorder.primaryColors": ["#AAAAAA"]}"##,
        )
        .unwrap();

        let mut settings = VsCodeSettings::new(".vscode/settings.json", Some(user_path));
        assert_eq!(settings.get(&root, COLOR_THEME), Some(json!("Solarized")));

        settings.update(&root, COLOR_THEME, json!("Monokai")).unwrap();
        assert_eq!(settings.get(&root, COLOR_THEME), Some(json!("Monokai")));
        assert_eq!(settings.get(&root, PRIMARY_COLORS), Some(json!(["#AAAAAA"])));
        assert!(root.join(".vscode/settings.json").exists());
    }
}
