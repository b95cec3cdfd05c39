//! Branch → color assignment
//!
//! A branch keeps the color it was first given until a forced randomize
//! replaces it.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, error, info};

use crate::palette::DEFAULT_COLORS;
use crate::store::{StateStore, load_branch_colors, save_branch_colors};

/// Return the color for `branch`, drawing and persisting a new one when the
/// branch has none yet or `force_new` is set.
///
/// On a forced draw with a multi-color palette, `current_color` is excluded
/// from the candidates so the change is visible. A failed write is logged and
/// the drawn color is still returned.
pub fn assign<R: Rng + ?Sized>(
    store: &mut dyn StateStore,
    palette: &[String],
    branch: &str,
    force_new: bool,
    current_color: Option<&str>,
    rng: &mut R,
) -> String {
    let mut map = load_branch_colors(store);

    if !force_new {
        if let Some(color) = map.get(branch) {
            debug!("Reusing color {} for branch '{}'", color, branch);
            return color.clone();
        }
    }

    let pool = candidate_pool(palette, force_new, current_color);
    let color = pool
        .choose(rng)
        .map(|c| c.to_string())
        .unwrap_or_else(|| DEFAULT_COLORS[0].to_string());

    info!("Assigned color {} to branch '{}'", color, branch);
    map.insert(branch.to_string(), color.clone());
    if let Err(e) = save_branch_colors(store, &map) {
        error!("Failed to persist color for branch '{}': {:?}", branch, e);
    }

    color
}

fn candidate_pool<'a>(
    palette: &'a [String],
    force_new: bool,
    current_color: Option<&str>,
) -> Vec<&'a str> {
    let all: Vec<&str> = palette.iter().map(String::as_str).collect();

    match current_color {
        Some(current) if force_new && palette.len() > 1 => {
            let filtered: Vec<&str> = all.iter().copied().filter(|c| *c != current).collect();
            if filtered.is_empty() { all } else { filtered }
        }
        _ => all,
    }
}
