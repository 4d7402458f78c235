//! Git hooks that trigger prefixing
//!
//! Each prefixing mode maps to one commit message hook:
//! - pre-fill: `prepare-commit-msg`, before the editor opens
//! - automatic: `commit-msg`, right before the commit is recorded

pub mod cleanup;
pub mod installer;
pub mod lifecycle;
pub mod runner;

pub use installer::{install_hook, uninstall_hook};
pub use lifecycle::{HookInvocation, HookType};
pub use runner::HookRunner;
