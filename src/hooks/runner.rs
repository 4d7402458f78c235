use std::fs;

use crate::config::Config;
use crate::error::Result;
use crate::fallback::FallbackReason;
use crate::git::BranchSource;
use crate::hooks::HookInvocation;
use crate::prefixer::{prefix_once_from_source, PrefixOutcome};

/// Runs the prefixer from a git commit message hook
pub struct HookRunner;

impl HookRunner {
    /// Prefix the message file named by `invocation`
    ///
    /// The file is only rewritten when the message changed. A message that
    /// already carries the prefix is left alone, so amending or re-running
    /// the hook does not stack prefixes. `stripped_comment` is the marker git
    /// will strip after the hook (see [`crate::hooks::cleanup`]); a prefixed
    /// message starting with it is not written.
    ///
    /// # Returns
    /// * `Ok(None)` if the hook does not belong to the configured mode
    /// * `Ok(Some(outcome))` once the prefixer has run
    /// * `Err` if the message file cannot be read or written
    pub fn run<S>(
        invocation: &HookInvocation,
        config: &Config,
        source: &S,
        stripped_comment: Option<&str>,
    ) -> Result<Option<PrefixOutcome>>
    where
        S: BranchSource + ?Sized,
    {
        if !invocation.hook_type.fires_in(config.mode) {
            tracing::debug!(
                "{} hook is inactive in {} mode",
                invocation.hook_type,
                config.mode
            );
            return Ok(None);
        }

        tracing::debug!(
            "Running {} hook (message source: {})",
            invocation.hook_type,
            invocation.source.as_deref().unwrap_or("none")
        );

        let original = fs::read_to_string(&invocation.message_file)?;
        let outcome = match (
            prefix_once_from_source(source, &original, config),
            stripped_comment,
        ) {
            (PrefixOutcome::Applied(message), Some(comment)) if message.starts_with(comment) => {
                PrefixOutcome::Unchanged {
                    message: original,
                    reason: FallbackReason::CommentedOut {
                        comment: comment.to_string(),
                    },
                }
            }
            (outcome, _) => outcome,
        };

        if outcome.is_applied() {
            fs::write(&invocation.message_file, outcome.message())?;
        }

        Ok(Some(outcome))
    }

    /// Run the hook, logging errors but never failing
    ///
    /// A hook failure would abort the commit, which prefixing must never do.
    pub fn run_permissive<S>(
        invocation: &HookInvocation,
        config: &Config,
        source: &S,
        stripped_comment: Option<&str>,
    ) where
        S: BranchSource + ?Sized,
    {
        match Self::run(invocation, config, source, stripped_comment) {
            Ok(Some(outcome)) => match outcome.reason() {
                None => tracing::info!("Commit message prefixed"),
                Some(reason) if reason.is_failure() => tracing::warn!("{}", reason),
                Some(reason) => tracing::debug!("{}", reason),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("{} hook skipped: {}", invocation.hook_type, e),
        }
    }
}
