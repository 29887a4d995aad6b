use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::Context;

/// The set of person identifiers allowed to be bound to a user.
///
/// Loaded once at startup and never mutated afterwards, so it can be shared
/// across request handlers without locking.
#[derive(Debug)]
pub struct PersonIdWhitelist {
    ids: HashSet<String>,
}

impl PersonIdWhitelist {
    /// Read a newline-delimited identifier file.
    ///
    /// An unreadable file is a configuration error, not a runtime condition;
    /// callers abort startup on failure.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| {
            format!("failed to read person id whitelist at {}", path.display())
        })?;
        Ok(Self::from_lines(&raw))
    }

    pub(crate) fn from_lines(raw: &str) -> Self {
        let ids = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self { ids }
    }

    pub fn is_valid(&self, candidate: &str) -> bool {
        self.ids.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_lines_and_drops_blanks() {
        let whitelist =
            PersonIdWhitelist::from_lines("  jXa4g3H7oPq2  \n\n tQdG2kP3mJfB\n   \n");
        assert_eq!(whitelist.len(), 2);
        assert!(whitelist.is_valid("jXa4g3H7oPq2"));
        assert!(whitelist.is_valid("tQdG2kP3mJfB"));
    }

    #[test]
    fn rejects_ids_outside_the_list() {
        let whitelist = PersonIdWhitelist::from_lines("tQdG2kP3mJfB\n");
        assert!(!whitelist.is_valid("ID"));
        assert!(!whitelist.is_valid(""));
        // membership is exact, not trimmed
        assert!(!whitelist.is_valid(" tQdG2kP3mJfB "));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = PersonIdWhitelist::load(Path::new("no/such/person_ids.txt")).unwrap_err();
        assert!(err.to_string().contains("person id whitelist"));
    }
}
