use commit_prefixer::cli::orchestration::{
    run_apply, run_hook, run_install, run_show_config, run_uninstall, ApplyArgs, HookArgs,
};
use commit_prefixer::config::{project_config_path, save_config, Config, PrefixMode};
use commit_prefixer::hooks::installer::is_managed_hook;
use commit_prefixer::hooks::{HookInvocation, HookType};
use commit_prefixer::FallbackReason;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn repo_on_branch(branch: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = git2::Repository::init(dir.path()).unwrap();
    repo.set_head(&format!("refs/heads/{}", branch)).unwrap();
    dir
}

fn write_project_config(root: &Path, config: &Config) {
    save_config(config, &project_config_path(root)).unwrap();
}

#[test]
fn test_apply_uses_current_branch() {
    let dir = repo_on_branch("feature/321-search");
    let args = ApplyArgs {
        config_path: None,
        repo: dir.path().to_path_buf(),
        branch: None,
        message: "add search".to_string(),
    };

    assert_eq!(run_apply(&args).message(), "#321 - add search");
}

#[test]
fn test_apply_reads_project_config() {
    let dir = repo_on_branch("feature/321-search");
    write_project_config(
        dir.path(),
        &Config {
            message_template: "[$3] ".to_string(),
            ..Config::default()
        },
    );
    let args = ApplyArgs {
        config_path: None,
        repo: dir.path().to_path_buf(),
        branch: None,
        message: "add search".to_string(),
    };

    let first = run_apply(&args);
    assert_eq!(first.message(), "[search] add search");

    let again = run_apply(&ApplyArgs {
        message: first.into_message(),
        ..args
    });
    assert_eq!(again.message(), "[search] add search");
}

#[test]
fn test_apply_on_detached_head_keeps_message() {
    let dir = TempDir::new().unwrap();
    let repo = git2::Repository::init(dir.path()).unwrap();
    let tree_oid = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_oid).unwrap();
    let sig = git2::Signature::now("Test", "test@example.com").unwrap();
    let oid = repo
        .commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
        .unwrap();
    repo.set_head_detached(oid).unwrap();

    let outcome = run_apply(&ApplyArgs {
        config_path: None,
        repo: dir.path().to_path_buf(),
        branch: None,
        message: "msg".to_string(),
    });
    assert_eq!(outcome.message(), "msg");
    assert!(matches!(
        outcome.reason(),
        Some(FallbackReason::BranchUnavailable { .. })
    ));
}

#[test]
fn test_prepare_commit_msg_hook_prefixes_file() {
    let dir = repo_on_branch("bug/77-crash");
    let message_file = dir.path().join(".git").join("COMMIT_EDITMSG");
    fs::write(&message_file, "fix crash on start\n").unwrap();

    run_hook(&HookArgs {
        config_path: None,
        repo: dir.path().to_path_buf(),
        invocation: HookInvocation {
            hook_type: HookType::PrepareCommitMsg,
            message_file: message_file.clone(),
            source: Some("message".to_string()),
        },
        editor_used: false,
    });

    assert_eq!(
        fs::read_to_string(&message_file).unwrap(),
        "#77 - fix crash on start\n"
    );
}

#[test]
fn test_commit_msg_hook_is_inactive_in_pre_fill_mode() {
    let dir = repo_on_branch("bug/77-crash");
    let message_file = dir.path().join("msg.txt");
    fs::write(&message_file, "fix crash\n").unwrap();

    run_hook(&HookArgs {
        config_path: None,
        repo: dir.path().to_path_buf(),
        invocation: HookInvocation {
            hook_type: HookType::CommitMsg,
            message_file: message_file.clone(),
            source: None,
        },
        editor_used: true,
    });

    assert_eq!(fs::read_to_string(&message_file).unwrap(), "fix crash\n");
}

#[test]
fn test_hook_with_broken_config_leaves_file() {
    let dir = repo_on_branch("bug/77-crash");
    fs::write(project_config_path(dir.path()), "enabled = [").unwrap();
    let message_file = dir.path().join("msg.txt");
    fs::write(&message_file, "fix crash\n").unwrap();

    run_hook(&HookArgs {
        config_path: None,
        repo: dir.path().to_path_buf(),
        invocation: HookInvocation {
            hook_type: HookType::PrepareCommitMsg,
            message_file: message_file.clone(),
            source: None,
        },
        editor_used: true,
    });

    assert_eq!(fs::read_to_string(&message_file).unwrap(), "fix crash\n");
}

#[test]
fn test_hook_in_editor_skips_prefix_git_would_strip() {
    let dir = repo_on_branch("bug/77-crash");
    let message_file = dir.path().join("msg.txt");
    let original = "\n# Please enter the commit message for your changes.\n";
    fs::write(&message_file, original).unwrap();

    run_hook(&HookArgs {
        config_path: None,
        repo: dir.path().to_path_buf(),
        invocation: HookInvocation {
            hook_type: HookType::PrepareCommitMsg,
            message_file: message_file.clone(),
            source: None,
        },
        editor_used: true,
    });

    assert_eq!(fs::read_to_string(&message_file).unwrap(), original);
}

#[test]
fn test_hook_respects_configured_comment_marker() {
    let dir = repo_on_branch("bug/77-crash");
    git2::Repository::open(dir.path())
        .unwrap()
        .config()
        .unwrap()
        .set_str("core.commentChar", ";")
        .unwrap();
    let message_file = dir.path().join("msg.txt");
    fs::write(&message_file, "\n; Please enter the commit message\n").unwrap();

    run_hook(&HookArgs {
        config_path: None,
        repo: dir.path().to_path_buf(),
        invocation: HookInvocation {
            hook_type: HookType::PrepareCommitMsg,
            message_file: message_file.clone(),
            source: None,
        },
        editor_used: true,
    });

    assert_eq!(
        fs::read_to_string(&message_file).unwrap(),
        "#77 - \n; Please enter the commit message\n"
    );
}

#[test]
fn test_install_follows_mode_and_uninstall_cleans_up() {
    let dir = repo_on_branch("main");
    let hooks_dir = dir.path().join(".git").join("hooks");
    let config_path = dir.path().join("custom.toml");

    save_config(&Config::default(), &config_path).unwrap();
    let installed = run_install(Some(&config_path), dir.path(), false).unwrap();
    assert!(installed.ends_with("prepare-commit-msg"));
    assert!(is_managed_hook(&hooks_dir.join("prepare-commit-msg")));

    save_config(
        &Config {
            mode: PrefixMode::Automatic,
            ..Config::default()
        },
        &config_path,
    )
    .unwrap();
    let installed = run_install(Some(&config_path), dir.path(), false).unwrap();
    assert!(installed.ends_with("commit-msg"));
    assert!(!hooks_dir.join("prepare-commit-msg").exists());

    let removed = run_uninstall(dir.path()).unwrap();
    assert_eq!(removed, vec![HookType::CommitMsg]);
    assert!(!hooks_dir.join("commit-msg").exists());
}

#[test]
fn test_install_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("not-a-repo");
    assert!(run_install(None, &missing, false).is_err());
}

#[test]
fn test_show_config_reports_bad_pattern() {
    let dir = repo_on_branch("main");
    write_project_config(
        dir.path(),
        &Config {
            branch_pattern: "(unclosed".to_string(),
            ..Config::default()
        },
    );

    let (config, pattern_error) = run_show_config(None, dir.path()).unwrap();
    assert_eq!(config.branch_pattern, "(unclosed");
    assert!(pattern_error.unwrap().contains("Invalid branch pattern"));
}

// End-to-end: the installed hook driven by a real `git commit`

/// A `git` command isolated from the user's configuration
fn git(dir: &Path, bin_dir: &Path, config_home: &Path) -> Command {
    let path = std::env::var_os("PATH").unwrap_or_default();
    let mut paths = vec![bin_dir.to_path_buf()];
    paths.extend(std::env::split_paths(&path));

    let mut cmd = Command::new("git");
    cmd.current_dir(dir)
        .env("PATH", std::env::join_paths(paths).unwrap())
        .env("XDG_CONFIG_HOME", config_home)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", config_home.join("gitconfig"))
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env_remove("GIT_EDITOR");
    cmd
}

struct CommitRepo {
    dir: TempDir,
    config_home: TempDir,
    bin_dir: PathBuf,
}

impl CommitRepo {
    /// A repository on `branch` with the hook for `config`'s mode installed
    ///
    /// `None` when no `git` executable is available.
    fn new(branch: &str, config: &Config) -> Option<Self> {
        if Command::new("git").arg("--version").output().is_err() {
            return None;
        }

        let dir = repo_on_branch(branch);
        let config_home = TempDir::new().unwrap();
        let bin_dir = Path::new(env!("CARGO_BIN_EXE_commit-prefixer"))
            .parent()
            .unwrap()
            .to_path_buf();

        write_project_config(dir.path(), config);
        run_install(None, dir.path(), false).unwrap();

        Some(CommitRepo {
            dir,
            config_home,
            bin_dir,
        })
    }

    fn git(&self) -> Command {
        git(self.dir.path(), &self.bin_dir, self.config_home.path())
    }

    fn commit(&self, args: &[&str], editor: Option<&str>) {
        let mut cmd = self.git();
        cmd.args(["commit", "--allow-empty"]).args(args);
        if let Some(editor) = editor {
            cmd.env("GIT_EDITOR", editor);
        }

        let output = cmd.output().unwrap();
        assert!(
            output.status.success(),
            "git commit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn last_message(&self) -> String {
        let output = self.git().args(["log", "-1", "--format=%B"]).output().unwrap();
        String::from_utf8(output.stdout).unwrap().trim_end().to_string()
    }
}

/// Appends "add g" to the first line, as a user typing a subject would
const APPEND_SUBJECT: &str = "sed -i.bak -e '1s/$/add g/'";

#[test]
fn test_editor_commit_with_default_template_is_not_aborted() {
    let Some(repo) = CommitRepo::new("bug/42-crash", &Config::default()) else {
        return;
    };

    repo.commit(&[], Some(APPEND_SUBJECT));
    assert_eq!(repo.last_message(), "add g");
}

#[test]
fn test_editor_commit_with_plain_template_is_prefixed() {
    let config = Config {
        message_template: "$2: $MESSAGE".to_string(),
        ..Config::default()
    };
    let Some(repo) = CommitRepo::new("bug/42-crash", &config) else {
        return;
    };

    repo.commit(&[], Some(APPEND_SUBJECT));
    assert_eq!(repo.last_message(), "42: add g");
}

#[test]
fn test_message_commit_then_amend_keeps_single_prefix() {
    let Some(repo) = CommitRepo::new("bug/42-crash", &Config::default()) else {
        return;
    };

    repo.commit(&["-m", "fix crash v2"], None);
    assert_eq!(repo.last_message(), "#42 - fix crash v2");

    repo.commit(&["--amend", "--no-edit"], None);
    assert_eq!(repo.last_message(), "#42 - fix crash v2");
}

#[test]
fn test_automatic_mode_commits() {
    let config = Config {
        mode: PrefixMode::Automatic,
        ..Config::default()
    };
    let Some(repo) = CommitRepo::new("feature/9-search", &config) else {
        return;
    };

    repo.commit(&["-m", "add search"], None);
    assert_eq!(repo.last_message(), "#9 - add search");

    repo.commit(&[], Some(APPEND_SUBJECT));
    assert_eq!(repo.last_message(), "add g");

    repo.commit(&["--amend", "-m", "#9 - add search v2"], None);
    assert_eq!(repo.last_message(), "#9 - add search v2");
}
