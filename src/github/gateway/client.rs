//! Octocrab client construction.

use http::Uri;
use octocrab::Octocrab;
use url::Url;

use crate::github::error::CheckError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Creates an authenticated client rooted at `api_base`.
///
/// # Errors
///
/// Returns `CheckError::InvalidUrl` when `api_base` is not a valid URI and
/// `CheckError::Api` when Octocrab rejects the client settings.
pub(super) fn authenticated_client(
    token: &PersonalAccessToken,
    api_base: &Url,
) -> Result<Octocrab, CheckError> {
    let base = Uri::try_from(api_base.as_str())
        .map_err(|error| CheckError::InvalidUrl(format!("{api_base}: {error}")))?;

    let builder = Octocrab::builder()
        .personal_token(token.value())
        .base_uri(base)
        .map_err(|error| CheckError::Api {
            status: None,
            message: format!("API base {api_base} rejected: {error}"),
        })?;

    builder
        .build()
        .map_err(|error| map_octocrab_error("client setup", &error))
}
