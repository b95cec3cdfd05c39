//! Optional thick border via the Custom CSS and JS Loader extension
//!
//! Theme colors can only paint 1px borders. The loader extension can inject
//! our generated stylesheet into the workbench, which draws a wider inset
//! border in the branch color.

use serde_json::Value;
use std::path::Path;
use tracing::{error, info};

use crate::machine::Notice;
use crate::settings::{CUSTOM_CSS_IMPORTS, CUSTOM_CSS_POLICY, SettingsDocument};
use crate::stylesheet::Stylesheet;

/// Marketplace id of the Custom CSS and JS Loader extension
pub const CUSTOM_CSS_EXTENSION: &str = "be5invis.vscode-custom-css";

/// Check whether an extension is installed. Installed extensions live in
/// folders named `<publisher>.<name>-<version>`.
pub fn is_extension_installed(extensions_dir: &Path, id: &str) -> bool {
    let Ok(entries) = std::fs::read_dir(extensions_dir) else {
        return false;
    };

    let versioned = format!("{}-", id);
    entries.flatten().any(|entry| {
        let name = entry.file_name().to_string_lossy().to_lowercase();
        entry.path().is_dir() && (name == id || name.starts_with(&versioned))
    })
}

/// Register the stylesheet with the loader extension in the user settings.
///
/// `color` (when known) is written to the stylesheet first so the loader
/// picks up the current branch color.
pub fn enable_thick_border(
    extensions_dir: &Path,
    user_settings: &SettingsDocument,
    stylesheet: &Stylesheet,
    color: Option<&str>,
) -> Notice {
    if !is_extension_installed(extensions_dir, CUSTOM_CSS_EXTENSION) {
        return Notice::warning(
            "Thick border requires the \"Custom CSS and JS Loader\" extension. Install it first.",
        )
        .with_action(format!("Open Extensions: {}", CUSTOM_CSS_EXTENSION));
    }

    if let Some(color) = color {
        if let Err(e) = stylesheet.write(color) {
            error!("Failed to update stylesheet: {:?}", e);
        }
    }

    let uri = stylesheet.uri();
    let mut imports: Vec<Value> = match user_settings.get(CUSTOM_CSS_IMPORTS) {
        Some(Value::Array(existing)) => existing,
        _ => Vec::new(),
    };
    if !imports.iter().any(|value| value.as_str() == Some(uri.as_str())) {
        imports.push(Value::from(uri.as_str()));
    }

    let result = user_settings
        .update(CUSTOM_CSS_IMPORTS, Value::Array(imports))
        .and_then(|_| user_settings.update(CUSTOM_CSS_POLICY, Value::Bool(true)));

    if let Err(e) = result {
        error!("Failed to register stylesheet: {:?}", e);
        return Notice::error(format!(
            "Failed to update {}. Fix the file and try again.",
            user_settings.path().display()
        ));
    }

    info!("Registered {} with {}", uri, CUSTOM_CSS_EXTENSION);
    Notice::info("Custom CSS path set.")
        .with_action("Run \"Reload Custom CSS and JS\" from the Command Palette")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::NoticeLevel;
    use serde_json::json;
    use tempfile::TempDir;

    fn install_loader(temp: &TempDir) -> std::path::PathBuf {
        let extensions = temp.path().join("extensions");
        std::fs::create_dir_all(extensions.join("be5invis.vscode-custom-css-7.4.2")).unwrap();
        extensions
    }

    #[test]
    fn test_missing_extension_warns_with_action() {
        let temp = TempDir::new().unwrap();
        let user = SettingsDocument::new(temp.path().join("settings.json"));
        let sheet = Stylesheet::new(temp.path().join("custom.css"));

        let notice = enable_thick_border(&temp.path().join("extensions"), &user, &sheet, None);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.action.unwrap().contains(CUSTOM_CSS_EXTENSION));
        assert!(!user.path().exists());
    }

    #[test]
    fn test_registers_stylesheet_once() {
        let temp = TempDir::new().unwrap();
        let extensions = install_loader(&temp);
        let user = SettingsDocument::new(temp.path().join("settings.json"));
        user.update(CUSTOM_CSS_IMPORTS, json!(["file:///other.css"])).unwrap();
        let sheet = Stylesheet::new(temp.path().join("custom.css"));

        let notice = enable_thick_border(&extensions, &user, &sheet, Some("#E53935"));
        assert_eq!(notice.level, NoticeLevel::Info);
        enable_thick_border(&extensions, &user, &sheet, Some("#E53935"));

        assert_eq!(
            user.get(CUSTOM_CSS_IMPORTS),
            Some(json!(["file:///other.css", sheet.uri()]))
        );
        assert_eq!(user.get(CUSTOM_CSS_POLICY), Some(json!(true)));
        assert!(std::fs::read_to_string(sheet.path()).unwrap().contains("#E53935"));
    }

    #[test]
    fn test_unparseable_user_settings_reports_error() {
        let temp = TempDir::new().unwrap();
        let extensions = install_loader(&temp);
        let path = temp.path().join("settings.json");
        std::fs::write(&path, "{ // comment\n}").unwrap();
        let user = SettingsDocument::new(&path);
        let sheet = Stylesheet::new(temp.path().join("custom.css"));

        let notice = enable_thick_border(&extensions, &user, &sheet, None);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ // comment\n}");
    }
}
