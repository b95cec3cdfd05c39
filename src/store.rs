//! Persistent key-value state that survives restarts
//!
//! Holds the branch → color mapping under a single namespaced key. The file
//! has no schema enforcement, so everything read back is validated.

use color_eyre::eyre::{Context, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key under which the branch color map is stored
pub const BRANCH_COLORS_KEY: &str = "vscodeBorder.branchColors";

/// Branch name → hex color
pub type BranchColorMap = BTreeMap<String, String>;

/// A namespaced key-value store
pub trait StateStore {
    /// Read a value, `None` if the key was never written
    fn get(&self, key: &str) -> Option<Value>;

    /// Overwrite the value stored under `key`
    fn update(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Store backed by a single JSON object on disk
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Map<String, Value> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Map::new(),
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("State file {} is not an object, ignoring it", self.path.display());
                Map::new()
            }
            Err(e) => {
                warn!("Failed to parse state file {}: {}", self.path.display(), e);
                Map::new()
            }
        }
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.read_all().remove(key)
    }

    fn update(&mut self, key: &str, value: Value) -> Result<()> {
        let mut all = self.read_all();
        all.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(all))
            .with_context(|| "Failed to serialize state")?;

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write state file: {}", self.path.display()))?;

        debug!("Updated '{}' in {}", key, self.path.display());
        Ok(())
    }
}

/// Read the branch color map, treating anything that is not a plain object
/// as empty. Entries whose value is not a string are dropped.
pub fn load_branch_colors(store: &dyn StateStore) -> BranchColorMap {
    match store.get(BRANCH_COLORS_KEY) {
        Some(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(branch, color)| match color {
                Value::String(color) if !color.is_empty() => Some((branch, color)),
                _ => None,
            })
            .collect(),
        Some(other) => {
            debug!("Discarding malformed branch color state: {}", other);
            BranchColorMap::new()
        }
        None => BranchColorMap::new(),
    }
}

/// Persist the whole branch color map
pub fn save_branch_colors(store: &mut dyn StateStore, map: &BranchColorMap) -> Result<()> {
    let value = serde_json::to_value(map).with_context(|| "Failed to serialize branch colors")?;
    store.update(BRANCH_COLORS_KEY, value)
}

/// In-memory store for tests
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    pub values: Map<String, Value>,
    pub writes: usize,
}

#[cfg(test)]
impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn update(&mut self, key: &str, value: Value) -> Result<()> {
        self.writes += 1;
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
