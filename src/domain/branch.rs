/// A non-empty, short branch name as handed to the extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName {
    name: String,
}

impl BranchName {
    /// Normalise raw branch input
    ///
    /// Takes the first line, trims it, and strips a leading `refs/heads/`.
    /// Returns `None` when nothing is left, which callers treat as "no branch".
    pub fn parse(raw: &str) -> Option<Self> {
        let first_line = raw.lines().next().unwrap_or("").trim();
        let short = first_line
            .strip_prefix("refs/heads/")
            .unwrap_or(first_line)
            .trim();

        if short.is_empty() {
            return None;
        }

        Some(BranchName {
            name: short.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
