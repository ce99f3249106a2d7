//! Identity wrappers for the pull request under inspection.

use url::Url;

use super::error::CheckError;

/// Default REST API base for github.com.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Splits an `owner/name` slug into its two parts.
///
/// Surrounding whitespace is ignored. Exactly two non-empty segments are
/// required.
///
/// # Errors
///
/// Returns [`CheckError::InvalidRepository`] for any other shape.
pub fn parse_repository_slug(slug: &str) -> Result<(RepositoryOwner, RepositoryName), CheckError> {
    let invalid = || CheckError::InvalidRepository {
        value: slug.to_owned(),
    };

    let (owner, name) = slug.trim().split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return Err(invalid());
    }

    Ok((RepositoryOwner(owner.to_owned()), RepositoryName(name.to_owned())))
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Parses a pull request number from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidPullRequestNumber`] when the value is not a
    /// positive integer.
    pub fn parse(value: &str) -> Result<Self, CheckError> {
        let invalid = || CheckError::InvalidPullRequestNumber {
            value: value.to_owned(),
        };

        match value.trim().parse::<u64>() {
            Ok(0) | Err(_) => Err(invalid()),
            Ok(number) => Ok(Self(number)),
        }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, CheckError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CheckError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// Pull request coordinates plus the API base used to reach them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Builds a locator from an API base URL, an `owner/name` slug and the
    /// textual pull request number.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::InvalidUrl` when the API base does not parse,
    /// `InvalidRepository` when the slug is malformed, and
    /// `InvalidPullRequestNumber` when the number is not a positive integer.
    pub fn new(api_base: &str, repository_slug: &str, number: &str) -> Result<Self, CheckError> {
        let parsed_base =
            Url::parse(api_base).map_err(|error| CheckError::InvalidUrl(error.to_string()))?;
        if parsed_base.cannot_be_a_base() {
            return Err(CheckError::InvalidUrl(format!(
                "{api_base} cannot be used as an API base"
            )));
        }

        let (owner, repository) = parse_repository_slug(repository_slug)?;
        let pr_number = PullRequestNumber::parse(number)?;

        Ok(Self {
            api_base: parsed_base,
            owner,
            repository,
            number: pr_number,
        })
    }

    /// API base URL requests are sent to.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn pull_request_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls/{}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }

    /// Absolute URL of the pull request resource.
    pub(crate) fn pull_request_url(&self) -> String {
        format!(
            "{}{}",
            self.api_base.as_str().trim_end_matches('/'),
            self.pull_request_path()
        )
    }

    pub(crate) fn files_path(&self) -> String {
        format!("{}/files", self.pull_request_path())
    }
}

impl std::fmt::Display for PullRequestLocator {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}/{}#{}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }
}
