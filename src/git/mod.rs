//! Branch lookup abstraction layer
//!
//! The prefixer never talks to git itself. It asks a [BranchSource] for the
//! current branch, which keeps the transformation pure and lets tests swap in
//! a fixed answer.
//!
//! - [repository::Git2Repository]: reads `HEAD` through the `git2` crate
//! - [command::GitCommandSource]: runs `git branch --show-current`
//! - [mock::MockBranchSource]: a fixed answer for testing
//!
//! ```rust
//! # use commit_prefixer::git::{BranchSource, MockBranchSource};
//! let source = MockBranchSource::on_branch("feature/12-login");
//! assert_eq!(source.current_branch().unwrap().as_deref(), Some("feature/12-login"));
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCommandSource;
pub use mock::MockBranchSource;
pub use repository::Git2Repository;

use crate::error::Result;

/// Source of the currently checked-out branch name
///
/// ## Thread Safety
///
/// Implementors must be `Send` so a source can be handed to another thread.
/// They need not be `Sync`: a libgit2 repository handle cannot be used from
/// two threads at once.
///
/// ## Error Handling
///
/// Implementations map their underlying failures to
/// [crate::error::PrefixerError::BranchUnavailable] or
/// [crate::error::PrefixerError::Git]. Callers treat any error as "no prefix".
pub trait BranchSource: Send {
    /// Short name of the checked-out branch
    ///
    /// # Returns
    /// * `Ok(Some(name))` - The branch name, e.g. `feature/12345-add-login`
    /// * `Ok(None)` - No branch is checked out (detached `HEAD`)
    /// * `Err` - The repository could not be read
    fn current_branch(&self) -> Result<Option<String>>;
}
