use crate::error::{PrefixerError, Result};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository implementing [super::BranchSource]
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|e| {
            PrefixerError::branch_unavailable(format!(
                "Not in a git repository ({}): {}",
                path.as_ref().display(),
                e.message()
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree, `None` for a bare repository
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Directory git runs hooks from
    ///
    /// Honours `core.hooksPath` when it is set, relative to the working tree.
    pub fn hooks_dir(&self) -> PathBuf {
        let configured = self
            .repo
            .config()
            .and_then(|config| config.get_path("core.hooksPath"))
            .ok();

        match configured {
            Some(path) if path.is_absolute() => path,
            Some(path) => self.workdir().unwrap_or(self.repo.path()).join(path),
            None => self.repo.path().join("hooks"),
        }
    }

    /// A string setting from the repository's git configuration
    pub fn config_string(&self, key: &str) -> Option<String> {
        self.repo
            .config()
            .and_then(|mut config| config.snapshot())
            .and_then(|snapshot| snapshot.get_string(key))
            .ok()
    }
}

impl super::BranchSource for Git2Repository {
    fn current_branch(&self) -> Result<Option<String>> {
        // HEAD is read as a symbolic ref so an unborn branch still has a name
        let head = self.repo.find_reference("HEAD")?;

        let branch = head
            .symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .map(|name| name.to_string());

        if branch.is_none() {
            tracing::debug!("HEAD is detached, no branch to prefix from");
        }

        Ok(branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::BranchSource;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Repo) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn commit_empty_tree(repo: &Git2Repo) -> git2::Oid {
        let tree_oid = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_oid).unwrap();
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap()
    }

    #[test]
    fn test_unborn_branch_has_a_name() {
        let (_dir, repo) = init_repo();
        repo.set_head("refs/heads/feature/12-login").unwrap();

        let source = Git2Repository::from_git2(repo);
        assert_eq!(
            source.current_branch().unwrap().as_deref(),
            Some("feature/12-login")
        );
    }

    #[test]
    fn test_branch_after_commit() {
        let (_dir, repo) = init_repo();
        repo.set_head("refs/heads/bug/7-crash").unwrap();
        commit_empty_tree(&repo);

        let source = Git2Repository::from_git2(repo);
        assert_eq!(
            source.current_branch().unwrap().as_deref(),
            Some("bug/7-crash")
        );
    }

    #[test]
    fn test_detached_head_has_no_branch() {
        let (_dir, repo) = init_repo();
        let oid = commit_empty_tree(&repo);
        repo.set_head_detached(oid).unwrap();

        let source = Git2Repository::from_git2(repo);
        assert_eq!(source.current_branch().unwrap(), None);
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does/not/exist");
        let result = Git2Repository::open(&missing);
        assert!(matches!(result, Err(PrefixerError::BranchUnavailable(_))));
    }

    #[test]
    fn test_config_string() {
        let (_dir, repo) = init_repo();
        repo.config()
            .unwrap()
            .set_str("core.commentChar", ";")
            .unwrap();

        let source = Git2Repository::from_git2(repo);
        assert_eq!(source.config_string("core.commentChar").as_deref(), Some(";"));
        assert_eq!(source.config_string("commitprefixer.unset"), None);
    }

    #[test]
    fn test_repository_moves_to_another_thread() {
        let (_dir, repo) = init_repo();
        repo.set_head("refs/heads/bug/3-race").unwrap();
        let source: Box<dyn BranchSource> = Box::new(Git2Repository::from_git2(repo));

        let branch = std::thread::spawn(move || source.current_branch().unwrap())
            .join()
            .unwrap();
        assert_eq!(branch.as_deref(), Some("bug/3-race"));
    }

    #[test]
    fn test_default_hooks_dir() {
        let (_dir, repo) = init_repo();
        let source = Git2Repository::from_git2(repo);
        let hooks = source.hooks_dir();
        assert!(hooks.ends_with("hooks"));
        assert!(hooks.parent().unwrap().ends_with(".git"));
    }
}
