use crate::error::{PrefixerError, Result};
use crate::git::BranchSource;

/// Mock branch source for testing without a repository
#[derive(Debug, Clone, Default)]
pub struct MockBranchSource {
    branch: Option<String>,
    failure: Option<String>,
}

impl MockBranchSource {
    /// A source reporting a detached `HEAD`
    pub fn new() -> Self {
        Self::default()
    }

    /// A source reporting `branch` as checked out
    pub fn on_branch(branch: impl Into<String>) -> Self {
        MockBranchSource {
            branch: Some(branch.into()),
            failure: None,
        }
    }

    /// A source whose lookup fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        MockBranchSource {
            branch: None,
            failure: Some(reason.into()),
        }
    }
}

impl BranchSource for MockBranchSource {
    fn current_branch(&self) -> Result<Option<String>> {
        match &self.failure {
            Some(reason) => Err(PrefixerError::branch_unavailable(reason.clone())),
            None => Ok(self.branch.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_on_branch() {
        let source = MockBranchSource::on_branch("feature/1-x");
        assert_eq!(source.current_branch().unwrap().as_deref(), Some("feature/1-x"));
    }

    #[test]
    fn test_mock_detached() {
        assert_eq!(MockBranchSource::new().current_branch().unwrap(), None);
    }

    #[test]
    fn test_mock_failing() {
        let err = MockBranchSource::failing("no repo").current_branch().unwrap_err();
        assert!(err.to_string().contains("no repo"));
    }
}
