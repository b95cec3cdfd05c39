//! Workspace discovery and housekeeping

use color_eyre::eyre::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::git::VcsQuery;

/// Supplies the root folder of the open workspace, if there is one
pub trait WorkspaceProvider {
    fn root(&self) -> Option<PathBuf>;
}

/// A workspace rooted at a fixed folder. It counts as open only while the
/// folder exists.
#[derive(Debug, Clone)]
pub struct FolderWorkspace {
    path: PathBuf,
}

impl FolderWorkspace {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WorkspaceProvider for FolderWorkspace {
    fn root(&self) -> Option<PathBuf> {
        if self.path.is_dir() {
            Some(self.path.clone())
        } else {
            debug!("Workspace folder {} is not available", self.path.display());
            None
        }
    }
}

/// Make sure the per-user settings file is ignored by git, and stop
/// tracking it if it was committed before.
pub fn ensure_gitignore(vcs: &dyn VcsQuery, root: &Path, settings_file: &str) -> Result<()> {
    let gitignore_path = root.join(".gitignore");
    let entry = settings_file.replace('\\', "/");

    let mut content = match std::fs::read(&gitignore_path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", gitignore_path.display()));
        }
    };

    if String::from_utf8_lossy(&content)
        .lines()
        .any(|line| line.trim() == entry)
    {
        return Ok(());
    }

    if !content.is_empty() && !content.ends_with(b"\n") {
        content.push(b'\n');
    }
    content.extend_from_slice(entry.as_bytes());
    content.push(b'\n');

    std::fs::write(&gitignore_path, content)
        .with_context(|| format!("Failed to write {}", gitignore_path.display()))?;
    info!("Added {} to {}", entry, gitignore_path.display());

    let tracked = vcs.query(&["ls-files", entry.as_str()], root);
    if !tracked.is_empty() {
        vcs.query(&["rm", "--cached", entry.as_str()], root);
        info!("Stopped tracking {}", entry);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::FakeGit;
    use tempfile::TempDir;

    const ENTRY: &str = ".vscode/settings.json";

    #[test]
    fn test_folder_workspace_requires_directory() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            FolderWorkspace::new(temp.path()).root(),
            Some(temp.path().to_path_buf())
        );
        assert_eq!(FolderWorkspace::new(temp.path().join("gone")).root(), None);
    }

    #[test]
    fn test_creates_gitignore() {
        let temp = TempDir::new().unwrap();
        let git = FakeGit::default();

        ensure_gitignore(&git, temp.path(), ENTRY).unwrap();
        assert_eq!(
            std::fs::read_to_string(temp.path().join(".gitignore")).unwrap(),
            ".vscode/settings.json\n"
        );
    }

    #[test]
    fn test_appends_with_missing_newline() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".gitignore"), "target").unwrap();
        let git = FakeGit::default();

        ensure_gitignore(&git, temp.path(), ENTRY).unwrap();
        assert_eq!(
            std::fs::read_to_string(temp.path().join(".gitignore")).unwrap(),
            "target\n.vscode/settings.json\n"
        );
    }

    #[test]
    fn test_non_utf8_gitignore_keeps_its_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".gitignore");
        std::fs::write(&path, b"# caf\xe9 notes\ntarget/\nnode_modules/\n").unwrap();
        let git = FakeGit::default();

        ensure_gitignore(&git, temp.path(), ENTRY).unwrap();
        assert_eq!(
            std::fs::read(&path).unwrap(),
            b"# caf\xe9 notes\ntarget/\nnode_modules/\n.vscode/settings.json\n".to_vec()
        );

        ensure_gitignore(&git, temp.path(), ENTRY).unwrap();
        assert_eq!(
            std::fs::read(&path).unwrap(),
            b"# caf\xe9 notes\ntarget/\nnode_modules/\n.vscode/settings.json\n".to_vec()
        );
    }

    #[test]
    fn test_unreadable_gitignore_is_an_error() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".gitignore")).unwrap();
        let git = FakeGit::default();

        assert!(ensure_gitignore(&git, temp.path(), ENTRY).is_err());
        assert!(temp.path().join(".gitignore").is_dir());
        assert!(git.calls.borrow().is_empty());
    }

    #[test]
    fn test_existing_entry_is_left_alone() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".gitignore"), "  .vscode/settings.json  \n").unwrap();
        let git = FakeGit::default();

        ensure_gitignore(&git, temp.path(), ENTRY).unwrap();
        assert_eq!(
            std::fs::read_to_string(temp.path().join(".gitignore")).unwrap(),
            "  .vscode/settings.json  \n"
        );
        assert!(git.calls.borrow().is_empty());
    }

    #[test]
    fn test_untracks_committed_settings() {
        let temp = TempDir::new().unwrap();
        let git = FakeGit::with(&[("ls-files .vscode/settings.json", ".vscode/settings.json")]);

        ensure_gitignore(&git, temp.path(), ENTRY).unwrap();
        assert_eq!(
            *git.calls.borrow(),
            vec![
                "ls-files .vscode/settings.json".to_string(),
                "rm --cached .vscode/settings.json".to_string(),
            ]
        );
    }
}
