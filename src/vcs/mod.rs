//! Local git operations backing the checkout command.
//!
//! Gerrit serves each patch set under a magic ref,
//! `refs/changes/<last two digits>/<change number>/<patch set>`, which is
//! fetched from `origin` and checked out onto a local review branch.

use git2::{BranchType, Repository, StashFlags, StatusOptions, build::CheckoutBuilder};
use std::path::{Path, PathBuf};

use crate::error::{GerritError, Result};

/// Ref for a change's patch set in Gerrit's refs/changes namespace.
pub fn change_refspec(change_number: i64, patch_set: u32) -> String {
    format!(
        "refs/changes/{:02}/{}/{}",
        change_number % 100,
        change_number,
        patch_set
    )
}

/// Summary of uncommitted work in the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyState {
    pub staged: usize,
    pub unstaged: usize,
    pub untracked: usize,
}

impl std::fmt::Display for DirtyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.staged > 0 {
            parts.push(format!("{} staged changes", self.staged));
        }
        if self.unstaged > 0 {
            parts.push(format!("{} unstaged changes", self.unstaged));
        }
        if self.untracked > 0 {
            parts.push(format!("{} untracked files", self.untracked));
        }
        write!(f, "{}", parts.join(", "))
    }
}

pub struct GitWorkspace {
    repo: Repository,
}

impl GitWorkspace {
    /// Discover the repository containing the current directory.
    pub fn discover() -> Result<Self> {
        Self::discover_from(".")
    }

    pub fn discover_from(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::discover(path.as_ref())?;
        Ok(Self { repo })
    }

    pub fn root_path(&self) -> Option<PathBuf> {
        self.repo.workdir().map(Path::to_path_buf)
    }

    pub fn has_remote(&self, name: &str) -> bool {
        self.repo.find_remote(name).is_ok()
    }

    pub fn remote_url(&self, name: &str) -> Option<String> {
        self.repo
            .find_remote(name)
            .ok()
            .and_then(|remote| remote.url().map(str::to_string))
    }

    /// `None` when the working tree is clean.
    pub fn dirty_state(&self) -> Result<Option<DirtyState>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self.repo.statuses(Some(&mut opts))?;

        let mut state = DirtyState {
            staged: 0,
            unstaged: 0,
            untracked: 0,
        };
        for entry in statuses.iter() {
            let status = entry.status();
            if status.intersects(
                git2::Status::INDEX_NEW
                    | git2::Status::INDEX_MODIFIED
                    | git2::Status::INDEX_DELETED
                    | git2::Status::INDEX_RENAMED
                    | git2::Status::INDEX_TYPECHANGE,
            ) {
                state.staged += 1;
            }
            if status.intersects(git2::Status::WT_MODIFIED | git2::Status::WT_DELETED) {
                state.unstaged += 1;
            }
            if status.contains(git2::Status::WT_NEW) {
                state.untracked += 1;
            }
        }

        if state.staged + state.unstaged + state.untracked == 0 {
            Ok(None)
        } else {
            Ok(Some(state))
        }
    }

    /// Stash everything, untracked files included.
    pub fn stash_changes(&mut self, message: &str) -> Result<()> {
        let signature = self.repo.signature()?;
        self.repo
            .stash_save(&signature, message, Some(StashFlags::INCLUDE_UNTRACKED))?;
        Ok(())
    }

    /// Fetch a single refspec from the named remote.
    pub fn fetch_ref(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name)?;
        remote.fetch(&[refspec], None, None)?;
        Ok(())
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.repo.find_branch(name, BranchType::Local).is_ok()
    }

    pub fn current_branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        if head.is_branch() {
            head.shorthand().map(str::to_string)
        } else {
            None
        }
    }

    pub fn delete_branch(&self, name: &str) -> Result<()> {
        let mut branch = self.repo.find_branch(name, BranchType::Local)?;
        branch.delete()?;
        Ok(())
    }

    /// Create `branch` at FETCH_HEAD and check it out.
    pub fn checkout_fetch_head(&self, branch: &str) -> Result<()> {
        let oid = self.repo.refname_to_id("FETCH_HEAD")?;
        let commit = self.repo.find_commit(oid)?;
        self.repo.branch(branch, &commit, false)?;

        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        self.repo
            .checkout_tree(commit.as_object(), Some(&mut checkout))?;
        self.repo.set_head(&format!("refs/heads/{branch}"))?;
        Ok(())
    }
}

impl std::fmt::Debug for GitWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitWorkspace")
            .field("path", &self.repo.path())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, GitWorkspace) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let repo = Repository::init(dir.path()).expect("failed to init repo");

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Tester").unwrap();
        config.set_str("user.email", "tester@example.com").unwrap();

        // Initial commit so HEAD exists
        fs::write(dir.path().join("README.md"), "hello\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = repo.signature().unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
        drop(tree);

        let workspace = GitWorkspace::discover_from(dir.path()).unwrap();
        (dir, workspace)
    }

    #[test]
    fn refspec_uses_last_two_digits_of_change_number() {
        assert_eq!(change_refspec(12345, 1), "refs/changes/45/12345/1");
        assert_eq!(change_refspec(7, 3), "refs/changes/07/7/3");
        assert_eq!(change_refspec(100, 2), "refs/changes/00/100/2");
    }

    #[test]
    fn discover_fails_outside_a_repository() {
        let dir = TempDir::new().unwrap();
        let result = GitWorkspace::discover_from(dir.path());
        assert!(matches!(result, Err(GerritError::Git(_))));
    }

    #[test]
    fn clean_tree_has_no_dirty_state() {
        let (_dir, workspace) = init_repo();
        assert_eq!(workspace.dirty_state().unwrap(), None);
    }

    #[test]
    fn untracked_file_is_reported() {
        let (dir, workspace) = init_repo();
        fs::write(dir.path().join("new.txt"), "data\n").unwrap();

        let state = workspace.dirty_state().unwrap().expect("should be dirty");
        assert_eq!(state.untracked, 1);
        assert_eq!(state.to_string(), "1 untracked files");
    }

    #[test]
    fn modified_file_is_reported_as_unstaged() {
        let (dir, workspace) = init_repo();
        fs::write(dir.path().join("README.md"), "changed\n").unwrap();

        let state = workspace.dirty_state().unwrap().expect("should be dirty");
        assert_eq!(state.unstaged, 1);
    }

    #[test]
    fn current_branch_and_existence() {
        let (_dir, workspace) = init_repo();
        let branch = workspace.current_branch().expect("should be on a branch");
        assert!(workspace.branch_exists(&branch));
        assert!(!workspace.branch_exists("review/change-999"));
    }

    #[test]
    fn missing_remote_is_detected() {
        let (_dir, workspace) = init_repo();
        assert!(!workspace.has_remote("origin"));
        assert_eq!(workspace.remote_url("origin"), None);
    }

    #[test]
    fn stash_cleans_the_working_tree() {
        let (dir, mut workspace) = init_repo();
        fs::write(dir.path().join("README.md"), "dirty\n").unwrap();
        assert!(workspace.dirty_state().unwrap().is_some());

        workspace.stash_changes("auto stash before fetch").unwrap();
        assert_eq!(workspace.dirty_state().unwrap(), None);
    }
}
