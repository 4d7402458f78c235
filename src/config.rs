use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::BranchPattern;
use crate::error::Result;

/// File name looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "commitprefixer.toml";

/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE: &str = ".commitprefixer.toml";

/// When the prefix is applied during a commit.
///
/// The mode only decides which trigger runs the prefixer; the transformation
/// itself is the same for both.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrefixMode {
    /// Fill the prefix in when the commit message editor opens
    #[default]
    #[serde(alias = "PRE_FILL", alias = "manual", alias = "MANUAL")]
    PreFill,
    /// Apply the prefix right before the commit is recorded
    #[serde(alias = "AUTOMATIC")]
    Automatic,
}

impl fmt::Display for PrefixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixMode::PreFill => f.write_str("pre_fill"),
            PrefixMode::Automatic => f.write_str("automatic"),
        }
    }
}

fn default_branch_pattern() -> String {
    r"(bug|feature)/(\d+)-(.+)".to_string()
}

fn default_message_template() -> String {
    "#$2 - $MESSAGE".to_string()
}

fn default_enabled() -> bool {
    true
}

/// Prefixing configuration for one project.
///
/// Supplied to every prefixing call; nothing in the crate keeps it around.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_branch_pattern")]
    pub branch_pattern: String,

    #[serde(default = "default_message_template")]
    pub message_template: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub mode: PrefixMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            branch_pattern: default_branch_pattern(),
            message_template: default_message_template(),
            enabled: default_enabled(),
            mode: PrefixMode::default(),
        }
    }
}

impl Config {
    /// Check that the branch pattern compiles
    pub fn validate(&self) -> Result<()> {
        BranchPattern::compile(&self.branch_pattern)?;
        Ok(())
    }
}

/// Path of the project-level configuration file under `project_root`
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `commitprefixer.toml` in the project root
/// 3. `.commitprefixer.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, project_root: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(project_root),
    };

    let Some(path) = path else {
        tracing::debug!("No configuration file found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!("Loading configuration from {}", path.display());
    let config_str = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    let project = project_config_path(project_root);
    if project.exists() {
        return Some(project);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Writes configuration as TOML, creating parent directories as needed
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}
