use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::PrefixMode;
use crate::error::PrefixerError;

/// Git hooks commit-prefixer runs from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookType {
    /// Runs before the commit message editor opens
    PrepareCommitMsg,
    /// Runs after the message is written, before the commit is recorded
    CommitMsg,
}

impl HookType {
    /// Get the hook file name as git expects it
    pub fn name(&self) -> &'static str {
        match self {
            HookType::PrepareCommitMsg => "prepare-commit-msg",
            HookType::CommitMsg => "commit-msg",
        }
    }

    /// The hook that triggers prefixing for `mode`
    pub fn for_mode(mode: PrefixMode) -> Self {
        match mode {
            PrefixMode::PreFill => HookType::PrepareCommitMsg,
            PrefixMode::Automatic => HookType::CommitMsg,
        }
    }

    /// Whether this hook should prefix under `mode`
    pub fn fires_in(&self, mode: PrefixMode) -> bool {
        HookType::for_mode(mode) == *self
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HookType {
    type Err = PrefixerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prepare-commit-msg" => Ok(HookType::PrepareCommitMsg),
            "commit-msg" => Ok(HookType::CommitMsg),
            other => Err(PrefixerError::hook(format!("Unsupported hook: {}", other))),
        }
    }
}

/// Arguments git passes to a commit message hook
#[derive(Debug, Clone)]
pub struct HookInvocation {
    /// Which hook is running
    pub hook_type: HookType,
    /// File holding the commit message
    pub message_file: PathBuf,
    /// Message source for `prepare-commit-msg` (`message`, `template`, `merge`, ...)
    pub source: Option<String>,
}
