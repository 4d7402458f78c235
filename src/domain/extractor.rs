//! Branch name extraction.
//!
//! A [`BranchPattern`] matches the *whole* branch name, never a substring, and
//! yields its capture groups by position.

use regex::Regex;

use crate::error::{PrefixerError, Result};

/// Result of matching a branch name against a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The branch name does not fully match the pattern
    NoMatch,
    /// Capture groups 1..=N in order; groups that did not participate are empty
    Matched(Vec<String>),
}

impl Extraction {
    /// Get a capture group by its 1-based index
    pub fn group(&self, index: usize) -> Option<&str> {
        match self {
            Extraction::NoMatch => None,
            Extraction::Matched(groups) => index
                .checked_sub(1)
                .and_then(|i| groups.get(i))
                .map(String::as_str),
        }
    }
}

/// A compiled, full-string branch pattern
#[derive(Debug, Clone)]
pub struct BranchPattern {
    source: String,
    regex: Regex,
}

impl BranchPattern {
    /// Compile a pattern for full-string matching
    ///
    /// The pattern is first checked as written, so a fragment such as `a)(b`
    /// cannot become valid once wrapped in anchors.
    pub fn compile(pattern: &str) -> Result<Self> {
        Regex::new(pattern).map_err(|e| PrefixerError::invalid_pattern(pattern, e))?;

        let anchored = format!(r"\A(?:{})\z", pattern);
        let regex =
            Regex::new(&anchored).map_err(|e| PrefixerError::invalid_pattern(pattern, e))?;

        Ok(BranchPattern {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as configured
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of capture groups, not counting the implicit whole match
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    pub fn extract(&self, branch_name: &str) -> Extraction {
        match self.regex.captures(branch_name) {
            Some(captures) => Extraction::Matched(
                (1..captures.len())
                    .map(|i| {
                        captures
                            .get(i)
                            .map(|m| m.as_str().to_string())
                            .unwrap_or_default()
                    })
                    .collect(),
            ),
            None => Extraction::NoMatch,
        }
    }
}

/// Match `branch_name` against `pattern` in one step
pub fn extract(branch_name: &str, pattern: &str) -> Result<Extraction> {
    Ok(BranchPattern::compile(pattern)?.extract(branch_name))
}
