//! Generated stylesheet for the thick border effect
//!
//! The Custom CSS and JS Loader extension injects this file into the
//! workbench. It is regenerated in full whenever the color changes.

use color_eyre::eyre::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Border thickness used by the injected box-shadow
pub const BORDER_THICKNESS: &str = "4px";

/// Render the stylesheet for `color`
pub fn render(color: &str) -> String {
    format!(
        ":root {{
  --vscode-border-thickness: {BORDER_THICKNESS};
  --vscode-border-color: {color};
}}

.monaco-workbench,
#workbench {{
  box-shadow: inset 0 0 0 var(--vscode-border-thickness) var(--vscode-border-color) !important;
  outline: none;
}}
"
    )
}

/// The stylesheet file on disk
#[derive(Debug, Clone)]
pub struct Stylesheet {
    path: PathBuf,
}

impl Stylesheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` URI the loader extension expects in its imports list
    pub fn uri(&self) -> String {
        let path = self.path.to_string_lossy().replace('\\', "/");
        if path.starts_with('/') {
            format!("file://{}", path)
        } else {
            format!("file:///{}", path)
        }
    }

    /// Overwrite the stylesheet with `color`
    pub fn write(&self, color: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(&self.path, render(color))
            .with_context(|| format!("Failed to write stylesheet: {}", self.path.display()))?;

        debug!("Wrote stylesheet {} for {}", self.path.display(), color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_embeds_color() {
        let css = render("#1E88E5");
        assert!(css.contains("--vscode-border-color: #1E88E5;"));
        assert!(css.contains("--vscode-border-thickness: 4px;"));
        assert!(css.contains("box-shadow: inset 0 0 0"));
    }

    #[test]
    fn test_write_is_byte_identical_for_same_color() {
        let temp = TempDir::new().unwrap();
        let sheet = Stylesheet::new(temp.path().join("resources/custom.css"));

        sheet.write("#43A047").unwrap();
        let first = std::fs::read(sheet.path()).unwrap();
        sheet.write("#43A047").unwrap();
        assert_eq!(std::fs::read(sheet.path()).unwrap(), first);
    }

    #[test]
    fn test_uri_is_file_scheme() {
        let sheet = Stylesheet::new("/opt/gbb/custom.css");
        assert_eq!(sheet.uri(), "file:///opt/gbb/custom.css");
    }
}
