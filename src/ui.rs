//! Terminal output for the `commit-prefixer` binary.
//!
//! Everything here writes to stderr: `apply` prints the commit message on
//! stdout, and hooks must not clutter git's own output.

use console::style;

use crate::config::Config;
use crate::fallback::FallbackReason;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display why a message was left unchanged.
///
/// Faults get a warning; the ordinary cases only a status line.
pub fn display_fallback(reason: &FallbackReason) {
    eprintln!("{}", format_fallback(reason));
}

/// The line [`display_fallback`] prints for `reason`
pub fn format_fallback(reason: &FallbackReason) -> String {
    if reason.is_failure() {
        format!("{} {}", style("⚠ WARNING:").yellow(), reason)
    } else {
        format!("{} {}", style("→").yellow(), reason)
    }
}

/// Render the effective configuration for `commit-prefixer config`
pub fn format_config(config: &Config, pattern_error: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(&format!("enabled          = {}\n", config.enabled));
    out.push_str(&format!("mode             = {}\n", config.mode));
    out.push_str(&format!("branch_pattern   = {}\n", config.branch_pattern));
    out.push_str(&format!("message_template = {}\n", config.message_template));

    if let Some(error) = pattern_error {
        out.push_str(&format!("pattern error    : {}\n", error));
    }

    out
}
