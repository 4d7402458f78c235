use crate::error::{PrefixerError, Result};
use std::path::PathBuf;
use std::process::Command;

/// Branch lookup through the `git` executable
///
/// Runs `git branch --show-current` in the repository root and takes the
/// first line of its output. Empty output means a detached `HEAD`.
pub struct GitCommandSource {
    repository_root: PathBuf,
}

impl GitCommandSource {
    pub fn new(repository_root: impl Into<PathBuf>) -> Self {
        GitCommandSource {
            repository_root: repository_root.into(),
        }
    }
}

impl super::BranchSource for GitCommandSource {
    fn current_branch(&self) -> Result<Option<String>> {
        let output = Command::new("git")
            .args(["branch", "--show-current"])
            .current_dir(&self.repository_root)
            .output()
            .map_err(|e| {
                PrefixerError::branch_unavailable(format!(
                    "Failed to run git in {}: {}",
                    self.repository_root.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PrefixerError::branch_unavailable(format!(
                "git branch --show-current exited with code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let branch = stdout.lines().next().unwrap_or("").trim();

        if branch.is_empty() {
            Ok(None)
        } else {
            Ok(Some(branch.to_string()))
        }
    }
}
