//! Classification of changed files by the automation prefix.

use crate::github::error::CheckError;
use crate::github::models::ChangedFileSet;

/// Prefix under which pipeline configuration lives on GitHub.
pub const DEFAULT_AUTOMATION_PREFIX: &str = ".github/";

/// Path prefix that marks a changed file as automation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationPrefix(String);

impl AutomationPrefix {
    /// Validates that the prefix is not blank.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Configuration`] when the prefix is empty or only
    /// whitespace, which would classify every file as automation.
    pub fn new(prefix: impl AsRef<str>) -> Result<Self, CheckError> {
        let trimmed = prefix.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CheckError::Configuration {
                message: "automation prefix must not be blank".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the prefix.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether `path` lies under this prefix.
    #[must_use]
    pub fn covers(&self, path: &str) -> bool {
        path.starts_with(self.0.as_str())
    }
}

impl Default for AutomationPrefix {
    fn default() -> Self {
        Self(DEFAULT_AUTOMATION_PREFIX.to_owned())
    }
}

/// Changed files split into regular and automation groups, each in API order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePartition {
    /// Files outside the automation prefix.
    pub regular: Vec<String>,
    /// Files under the automation prefix.
    pub automation: Vec<String>,
}

impl FilePartition {
    /// Splits `files` by `prefix`.
    #[must_use]
    pub fn split(files: &ChangedFileSet, prefix: &AutomationPrefix) -> Self {
        let (automation, regular): (Vec<String>, Vec<String>) = files
            .filenames()
            .iter()
            .cloned()
            .partition(|path| prefix.covers(path));
        Self {
            regular,
            automation,
        }
    }

    /// Total number of files classified.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.regular.len() + self.automation.len()
    }

    /// True when filtering out automation files left the list unchanged.
    #[must_use]
    pub const fn files_valid(&self) -> bool {
        self.regular.len() == self.total()
    }

    /// True when regular and automation files appear together.
    #[must_use]
    pub const fn is_mixed(&self) -> bool {
        !self.files_valid() && !self.regular.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{AutomationPrefix, FilePartition};
    use crate::github::error::CheckError;
    use crate::github::models::test_support::changed_files;

    #[rstest]
    #[case::regular_only(&["src/a.js", "README.md"], true, false)]
    #[case::automation_only(&[".github/workflows/ci.yml", ".github/CODEOWNERS"], false, false)]
    #[case::mixed(&[".github/workflows/ci.yml", "src/b.js"], false, true)]
    #[case::empty(&[], true, false)]
    #[case::lookalike_directory(&["github/workflows/ci.yml", "docs/.github/x"], true, false)]
    fn classifies_file_sets(
        #[case] files: &[&str],
        #[case] files_valid: bool,
        #[case] mixed: bool,
    ) {
        let partition = FilePartition::split(&changed_files(files), &AutomationPrefix::default());

        assert_eq!(partition.files_valid(), files_valid, "files_valid for {files:?}");
        assert_eq!(partition.is_mixed(), mixed, "is_mixed for {files:?}");
        assert_eq!(partition.total(), files.len());
    }

    #[test]
    fn keeps_api_order_within_groups() {
        let files = changed_files(&["b.rs", ".github/one.yml", "a.rs", ".github/two.yml"]);
        let partition = FilePartition::split(&files, &AutomationPrefix::default());

        assert_eq!(partition.regular, vec!["b.rs", "a.rs"]);
        assert_eq!(partition.automation, vec![".github/one.yml", ".github/two.yml"]);
    }

    #[test]
    fn honours_custom_prefix() {
        let prefix = AutomationPrefix::new(".gitlab/").expect("prefix should be accepted");
        let files = changed_files(&[".github/workflows/ci.yml", ".gitlab/ci.yml"]);
        let partition = FilePartition::split(&files, &prefix);

        assert_eq!(partition.regular, vec![".github/workflows/ci.yml"]);
        assert_eq!(partition.automation, vec![".gitlab/ci.yml"]);
        assert!(partition.is_mixed());
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("  ")]
    fn rejects_blank_prefix(#[case] prefix: &str) {
        let result = AutomationPrefix::new(prefix);
        assert!(
            matches!(result, Err(CheckError::Configuration { .. })),
            "expected Configuration error, got {result:?}"
        );
    }
}
