use std::fmt;

/// Why a commit message was left unchanged.
///
/// None of these stop a commit. The fault cases (`is_failure`) are worth
/// reporting to the user; the rest are the normal "nothing to do" paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Prefixing is switched off in the configuration
    Disabled,
    /// The configuration file could not be loaded
    ConfigUnavailable { reason: String },
    /// No branch name could be determined
    BranchUnavailable { reason: String },
    /// The configured branch pattern does not compile
    InvalidPattern { pattern: String, reason: String },
    /// The branch name does not fully match the pattern
    NoMatch { branch: String, pattern: String },
    /// The message already starts with the rendered prefix
    AlreadyPrefixed { prefix: String },
    /// The prefixed first line would be dropped by git as a comment
    CommentedOut { comment: String },
}

impl FallbackReason {
    /// Whether the message was left alone because something went wrong
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            FallbackReason::ConfigUnavailable { .. }
                | FallbackReason::BranchUnavailable { .. }
                | FallbackReason::InvalidPattern { .. }
                | FallbackReason::CommentedOut { .. }
        )
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Disabled => write!(f, "Commit message prefixing is disabled"),
            FallbackReason::ConfigUnavailable { reason } => {
                write!(f, "Cannot load configuration: {}", reason)
            }
            FallbackReason::BranchUnavailable { reason } => {
                write!(f, "Cannot determine the current branch: {}", reason)
            }
            FallbackReason::InvalidPattern { pattern, reason } => {
                // regex parse errors span several lines, the cause is on the last
                let cause = reason
                    .lines()
                    .rev()
                    .map(str::trim)
                    .find(|line| !line.is_empty())
                    .unwrap_or(reason.as_str());
                write!(f, "Invalid branch pattern '{}': {}", pattern, cause)
            }
            FallbackReason::NoMatch { branch, pattern } => {
                write!(f, "Branch '{}' does not match pattern '{}'", branch, pattern)
            }
            FallbackReason::AlreadyPrefixed { prefix } => {
                write!(f, "Message already starts with prefix '{}'", prefix)
            }
            FallbackReason::CommentedOut { comment } => write!(
                f,
                "Prefixed message would start with the comment marker '{}' and be removed by git; \
                 use a message_template that does not begin with it",
                comment
            ),
        }
    }
}
