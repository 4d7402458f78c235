//! Domain logic - pure transformation rules independent of git operations

pub mod branch;
pub mod composer;
pub mod extractor;
pub mod template;

pub use branch::BranchName;
pub use composer::{compose, compose_outcome, compose_outcome_once, Composition};
pub use extractor::{extract, BranchPattern, Extraction};
pub use template::MessageTemplate;
