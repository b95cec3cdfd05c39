//! Current branch resolution

use std::path::Path;
use tracing::debug;

use super::VcsQuery;

/// Value `rev-parse --abbrev-ref HEAD` prints when HEAD is detached
const DETACHED_HEAD: &str = "HEAD";

/// Resolve the checked-out branch of the repository at `root`.
///
/// Tries, in order:
/// 1. `git branch --show-current`
/// 2. `git rev-parse --abbrev-ref HEAD` (ignored when it says `HEAD`)
/// 3. `git rev-parse --short HEAD`, so a detached HEAD still gets a stable name
///
/// Returns `None` when there is no repository or no commits.
pub fn current_branch(vcs: &dyn VcsQuery, root: &Path) -> Option<String> {
    let branch = vcs.query(&["branch", "--show-current"], root);
    if !branch.is_empty() {
        return Some(branch);
    }

    let abbrev = vcs.query(&["rev-parse", "--abbrev-ref", "HEAD"], root);
    if !abbrev.is_empty() && abbrev != DETACHED_HEAD {
        return Some(abbrev);
    }

    let short = vcs.query(&["rev-parse", "--short", "HEAD"], root);
    if short.is_empty() {
        debug!("Could not determine a branch in {}", root.display());
        None
    } else {
        debug!("Detached HEAD in {}, using {}", root.display(), short);
        Some(short)
    }
}
