//! Command workflows behind the `commit-prefixer` binary
//!
//! Kept apart from clap so each workflow can be called and tested directly.
//! `apply` and `hook` are fail-open and never return an error; the setup
//! commands (`install`, `init`, ...) report errors normally.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::fallback::FallbackReason;
use crate::git::{BranchSource, Git2Repository, GitCommandSource};
use crate::hooks::{self, cleanup, HookInvocation, HookRunner, HookType};
use crate::prefixer::{apply_prefix, prefix_from_source, PrefixOutcome};

/// Arguments for the apply workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyArgs {
    /// Path to custom config file
    pub config_path: Option<PathBuf>,
    /// Repository to read the branch and project config from
    pub repo: PathBuf,
    /// Branch name overriding the repository's current branch
    pub branch: Option<String>,
    /// The commit message to prefix
    pub message: String,
}

/// Arguments for the hook workflow
#[derive(Debug, Clone)]
pub struct HookArgs {
    /// Path to custom config file
    pub config_path: Option<PathBuf>,
    /// Repository the hook runs in
    pub repo: PathBuf,
    /// What git passed to the hook
    pub invocation: HookInvocation,
    /// Whether git opens the editor for this commit
    pub editor_used: bool,
}

/// Open `repo` with libgit2, falling back to the git executable
fn branch_source(repo: &Path) -> (Box<dyn BranchSource>, PathBuf) {
    match Git2Repository::open(repo) {
        Ok(repository) => {
            let root = repository
                .workdir()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| repo.to_path_buf());
            let source: Box<dyn BranchSource> = Box::new(repository);
            (source, root)
        }
        Err(e) => {
            tracing::debug!("{}; falling back to the git executable", e);
            let source: Box<dyn BranchSource> = Box::new(GitCommandSource::new(repo));
            (source, repo.to_path_buf())
        }
    }
}

/// Project root for config lookup: the working tree when there is one
fn project_root(repo: &Path) -> PathBuf {
    Git2Repository::open(repo)
        .ok()
        .and_then(|repository| repository.workdir().map(Path::to_path_buf))
        .unwrap_or_else(|| repo.to_path_buf())
}

/// Comment marker git will strip from the message written by the hook
///
/// Without a readable repository git's defaults are assumed.
fn stripped_comment(repo: &Path, editor_used: bool) -> Option<String> {
    let repository = Git2Repository::open(repo).ok();
    let setting = |key: &str| repository.as_ref().and_then(|r| r.config_string(key));

    let comment = setting("core.commentString").or_else(|| setting("core.commentChar"));
    cleanup::stripped_comment(
        setting("commit.cleanup").as_deref(),
        comment.as_deref(),
        editor_used,
    )
}

/// Prefix a message, falling back to it unchanged on any failure
pub fn run_apply(args: &ApplyArgs) -> PrefixOutcome {
    let (source, root) = branch_source(&args.repo);

    let config = match config::load_config(args.config_path.as_deref(), &root) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Skipping commit prefix: {}", e);
            return PrefixOutcome::Unchanged {
                message: args.message.clone(),
                reason: FallbackReason::ConfigUnavailable {
                    reason: e.to_string(),
                },
            };
        }
    };

    match args.branch.as_deref() {
        Some(branch) => apply_prefix(Some(branch), &args.message, &config),
        None => prefix_from_source(&*source, &args.message, &config),
    }
}

/// Run from a git hook; never fails so the commit always proceeds
pub fn run_hook(args: &HookArgs) {
    let (source, root) = branch_source(&args.repo);

    match config::load_config(args.config_path.as_deref(), &root) {
        Ok(config) => {
            let comment = stripped_comment(&args.repo, args.editor_used);
            HookRunner::run_permissive(&args.invocation, &config, &*source, comment.as_deref())
        }
        Err(e) => tracing::warn!("{} hook skipped: {}", args.invocation.hook_type, e),
    }
}

/// Install the hook for the configured mode
///
/// A managed hook left over from the other mode is removed so only one
/// trigger is active.
pub fn run_install(config_path: Option<&Path>, repo: &Path, force: bool) -> Result<PathBuf> {
    let repository = Git2Repository::open(repo)?;
    let root = project_root(repo);
    let config = config::load_config(config_path, &root)?;
    let hooks_dir = repository.hooks_dir();

    if config.message_template.starts_with(cleanup::DEFAULT_COMMENT) {
        tracing::warn!(
            "message_template '{}' starts with git's comment marker; commits written in \
             the editor will be left unprefixed",
            config.message_template
        );
    }

    let hook_type = HookType::for_mode(config.mode);
    let installed = hooks::install_hook(&hooks_dir, hook_type, force)
        .with_context(|| format!("Failed to install {} hook", hook_type))?;

    let other = match hook_type {
        HookType::PrepareCommitMsg => HookType::CommitMsg,
        HookType::CommitMsg => HookType::PrepareCommitMsg,
    };
    if let Err(e) = hooks::uninstall_hook(&hooks_dir, other) {
        tracing::debug!("Leaving {} hook in place: {}", other, e);
    }

    Ok(installed)
}

/// Remove every hook commit-prefixer installed
pub fn run_uninstall(repo: &Path) -> Result<Vec<HookType>> {
    let repository = Git2Repository::open(repo)?;
    let hooks_dir = repository.hooks_dir();

    let mut removed = Vec::new();
    for hook_type in [HookType::PrepareCommitMsg, HookType::CommitMsg] {
        if hooks::uninstall_hook(&hooks_dir, hook_type)? {
            removed.push(hook_type);
        }
    }

    Ok(removed)
}

/// Write a default project configuration
pub fn run_init(repo: &Path, force: bool) -> Result<PathBuf> {
    let path = config::project_config_path(&project_root(repo));

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite it)",
            path.display()
        );
    }

    config::save_config(&Config::default(), &path)?;
    Ok(path)
}

/// Load the effective configuration and check its pattern
///
/// # Returns
/// The configuration and the pattern compilation error, if any
pub fn run_show_config(config_path: Option<&Path>, repo: &Path) -> Result<(Config, Option<String>)> {
    let config = config::load_config(config_path, &project_root(repo))?;
    let pattern_error = config.validate().err().map(|e| e.to_string());
    Ok((config, pattern_error))
}
