use thiserror::Error;

/// Unified error type for commit-prefixer operations
#[derive(Error, Debug)]
pub enum PrefixerError {
    #[error("Invalid branch pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Branch unavailable: {0}")]
    BranchUnavailable(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Hook error: {0}")]
    Hook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in commit-prefixer
pub type Result<T> = std::result::Result<T, PrefixerError>;

impl PrefixerError {
    /// Create an invalid pattern error from a failed regex compilation
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        PrefixerError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a branch lookup error with context
    pub fn branch_unavailable(msg: impl Into<String>) -> Self {
        PrefixerError::BranchUnavailable(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PrefixerError::Config(msg.into())
    }

    /// Create a hook error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        PrefixerError::Hook(msg.into())
    }
}

impl From<toml::de::Error> for PrefixerError {
    fn from(err: toml::de::Error) -> Self {
        PrefixerError::config(err.to_string())
    }
}

impl From<toml::ser::Error> for PrefixerError {
    fn from(err: toml::ser::Error) -> Self {
        PrefixerError::config(format!("cannot serialize configuration: {}", err))
    }
}
