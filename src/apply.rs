//! Writes a branch color into the editor's theme customizations

use color_eyre::eyre::Result;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, error};

use crate::color::with_alpha;
use crate::settings::{COLOR_CUSTOMIZATIONS, COLOR_THEME, SettingsSink};
use crate::stylesheet::Stylesheet;

/// Opacity of the tab hover background
pub const HOVER_BACKGROUND_ALPHA: f64 = 0.12;
/// Opacity of the tab hover border
pub const HOVER_BORDER_ALPHA: f64 = 0.7;

/// Workbench color keys painted with the opaque base color
pub const BORDER_KEYS: [&str; 7] = [
    "window.activeBorder",
    "window.inactiveBorder",
    "activityBar.border",
    "sideBar.border",
    "panel.border",
    "editorGroup.border",
    "tab.activeBorderTop",
];

/// Theme color key → color value
pub type StyleOverrideSet = Map<String, Value>;

/// Build every override derived from `color`
pub fn style_overrides(color: &str) -> StyleOverrideSet {
    let hover_background = with_alpha(color, HOVER_BACKGROUND_ALPHA);
    let hover_border = with_alpha(color, HOVER_BORDER_ALPHA);

    let mut overrides = StyleOverrideSet::new();
    for key in BORDER_KEYS {
        overrides.insert(key.to_string(), Value::from(color));
    }
    for key in ["tab.hoverBackground", "tab.unfocusedHoverBackground"] {
        overrides.insert(key.to_string(), Value::from(hover_background.as_str()));
    }
    for key in ["tab.hoverBorder", "tab.unfocusedHoverBorder"] {
        overrides.insert(key.to_string(), Value::from(hover_border.as_str()));
    }
    overrides
}

/// `[Theme Name]` block key for a theme setting, if one is named
pub fn theme_key(theme: Option<&Value>) -> Option<String> {
    match theme {
        Some(Value::String(name)) if !name.trim().is_empty() => Some(format!("[{}]", name)),
        _ => None,
    }
}

/// Shallow-merge `overrides` over the existing customizations, and over the
/// theme-scoped block when a theme is named. Unrelated keys survive in both.
pub fn merge_customizations(
    existing: Option<Value>,
    theme_key: Option<&str>,
    overrides: &StyleOverrideSet,
) -> Value {
    let mut merged = match existing {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    let theme_block = theme_key.map(|key| {
        let mut block = match merged.get(key) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        block.extend(overrides.clone());
        (key.to_string(), block)
    });

    merged.extend(overrides.clone());
    if let Some((key, block)) = theme_block {
        merged.insert(key, Value::Object(block));
    }

    Value::Object(merged)
}

/// Apply `color` to the workspace at `root`.
///
/// The settings write is the primary effect and its failure is returned. The
/// stylesheet mirror is best-effort: failures are logged only.
pub fn apply(
    settings: &mut dyn SettingsSink,
    stylesheet: &Stylesheet,
    root: &Path,
    color: &str,
) -> Result<StyleOverrideSet> {
    let overrides = style_overrides(color);
    let existing = settings.get(root, COLOR_CUSTOMIZATIONS);
    let theme = theme_key(settings.get(root, COLOR_THEME).as_ref());

    let merged = merge_customizations(existing, theme.as_deref(), &overrides);
    settings.update(root, COLOR_CUSTOMIZATIONS, merged)?;
    debug!("Applied {} to {}", color, root.display());

    if let Err(e) = stylesheet.write(color) {
        error!("Failed to update stylesheet: {:?}", e);
    }

    Ok(overrides)
}
