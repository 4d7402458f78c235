pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fallback;
pub mod git;
pub mod hooks;
pub mod prefixer;
pub mod ui;

pub use config::{Config, PrefixMode};
pub use error::{PrefixerError, Result};
pub use fallback::FallbackReason;
pub use prefixer::{
    apply_prefix, apply_prefix_once, prefix_from_source, prefix_once_from_source, PrefixOutcome,
};
