//! The `apply_prefix` boundary.
//!
//! Everything below this point may fail; nothing above it sees a failure.
//! Every path returns a [`PrefixOutcome`] that carries a usable commit message,
//! so a broken pattern or a missing repository never blocks a commit.

use crate::config::Config;
use crate::domain::{
    compose_outcome, compose_outcome_once, BranchName, BranchPattern, Composition, Extraction,
    MessageTemplate,
};
use crate::error::PrefixerError;
use crate::fallback::FallbackReason;
use crate::git::BranchSource;

/// Result of a prefixing attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixOutcome {
    /// The message was rewritten
    Applied(String),
    /// The original message is kept
    Unchanged {
        message: String,
        reason: FallbackReason,
    },
}

impl PrefixOutcome {
    fn unchanged(message: &str, reason: FallbackReason) -> Self {
        PrefixOutcome::Unchanged {
            message: message.to_string(),
            reason,
        }
    }

    /// The message to commit with
    pub fn message(&self) -> &str {
        match self {
            PrefixOutcome::Applied(message) => message,
            PrefixOutcome::Unchanged { message, .. } => message,
        }
    }

    pub fn into_message(self) -> String {
        match self {
            PrefixOutcome::Applied(message) => message,
            PrefixOutcome::Unchanged { message, .. } => message,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, PrefixOutcome::Applied(_))
    }

    /// Why the message was kept, if it was
    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            PrefixOutcome::Applied(_) => None,
            PrefixOutcome::Unchanged { reason, .. } => Some(reason),
        }
    }
}

/// Apply the configured prefix to `original` for `branch`
///
/// Returns the original message unchanged when prefixing is disabled, when the
/// branch is absent or empty, when the pattern is invalid or does not match,
/// and when the message already carries the prefix.
pub fn apply_prefix(branch: Option<&str>, original: &str, config: &Config) -> PrefixOutcome {
    apply_with(branch, original, config, compose_outcome)
}

/// Like [`apply_prefix`], but a no-op on a message it already prefixed
///
/// Templates with `$MESSAGE` are checked too: a message that already starts
/// with the template rendered for an empty message is left alone.
pub fn apply_prefix_once(branch: Option<&str>, original: &str, config: &Config) -> PrefixOutcome {
    apply_with(branch, original, config, compose_outcome_once)
}

type Compose = fn(&Extraction, &MessageTemplate, &str) -> Composition;

fn apply_with(
    branch: Option<&str>,
    original: &str,
    config: &Config,
    compose: Compose,
) -> PrefixOutcome {
    if !config.enabled {
        return PrefixOutcome::unchanged(original, FallbackReason::Disabled);
    }

    let Some(branch) = branch.and_then(BranchName::parse) else {
        return PrefixOutcome::unchanged(
            original,
            FallbackReason::BranchUnavailable {
                reason: "no branch name given".to_string(),
            },
        );
    };

    let pattern = match BranchPattern::compile(&config.branch_pattern) {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::warn!("Skipping commit prefix: {}", e);
            return PrefixOutcome::unchanged(
                original,
                FallbackReason::InvalidPattern {
                    pattern: config.branch_pattern.clone(),
                    reason: match e {
                        PrefixerError::InvalidPattern { source, .. } => source.to_string(),
                        other => other.to_string(),
                    },
                },
            );
        }
    };

    let template = MessageTemplate::parse(&config.message_template);
    let extraction = pattern.extract(branch.as_str());

    match compose(&extraction, &template, original) {
        Composition::Composed(message) => {
            tracing::debug!("Prefixed commit message from branch '{}'", branch);
            PrefixOutcome::Applied(message)
        }
        Composition::NoMatch => {
            tracing::debug!(
                "Branch '{}' does not match pattern '{}'",
                branch,
                pattern.as_str()
            );
            PrefixOutcome::unchanged(
                original,
                FallbackReason::NoMatch {
                    branch: branch.to_string(),
                    pattern: pattern.as_str().to_string(),
                },
            )
        }
        Composition::AlreadyPrefixed { prefix } => {
            tracing::debug!("Message already starts with '{}'", prefix);
            PrefixOutcome::unchanged(original, FallbackReason::AlreadyPrefixed { prefix })
        }
    }
}

/// Look up the current branch through `source`, then apply the prefix
///
/// The branch is only looked up when prefixing is enabled. Lookup failures
/// are logged and leave the message unchanged.
pub fn prefix_from_source<S>(source: &S, original: &str, config: &Config) -> PrefixOutcome
where
    S: BranchSource + ?Sized,
{
    lookup_then(source, original, config, apply_prefix)
}

/// [`prefix_from_source`] with the re-run check of [`apply_prefix_once`]
pub fn prefix_once_from_source<S>(source: &S, original: &str, config: &Config) -> PrefixOutcome
where
    S: BranchSource + ?Sized,
{
    lookup_then(source, original, config, apply_prefix_once)
}

fn lookup_then<S>(
    source: &S,
    original: &str,
    config: &Config,
    apply: fn(Option<&str>, &str, &Config) -> PrefixOutcome,
) -> PrefixOutcome
where
    S: BranchSource + ?Sized,
{
    if !config.enabled {
        return PrefixOutcome::unchanged(original, FallbackReason::Disabled);
    }

    match source.current_branch() {
        Ok(Some(branch)) => apply(Some(&branch), original, config),
        Ok(None) => PrefixOutcome::unchanged(
            original,
            FallbackReason::BranchUnavailable {
                reason: "HEAD is detached".to_string(),
            },
        ),
        Err(e) => {
            tracing::warn!("Skipping commit prefix: {}", e);
            PrefixOutcome::unchanged(
                original,
                FallbackReason::BranchUnavailable {
                    reason: e.to_string(),
                },
            )
        }
    }
}
