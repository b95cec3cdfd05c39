//! Single-shot git queries

use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Something that can answer git queries for a working directory.
///
/// Failures of any kind (git missing, not a repository, non-zero exit) come
/// back as an empty string.
pub trait VcsQuery {
    fn query(&self, args: &[&str], cwd: &Path) -> String;
}

/// Runs the `git` binary found on `PATH`
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl VcsQuery for GitCli {
    fn query(&self, args: &[&str], cwd: &Path) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                debug!("git {} failed in {}: {}", args.join(" "), cwd.display(), stderr.trim());
                String::new()
            }
            Err(e) => {
                warn!("Failed to run git in {}: {}", cwd.display(), e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_query_outside_repository_is_empty() {
        let temp = TempDir::new().unwrap();
        let cwd = temp.path().join("missing");
        assert_eq!(GitCli.query(&["rev-parse", "--short", "HEAD"], &cwd), "");
    }
}
