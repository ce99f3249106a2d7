//! Octocrab implementation of the pull request gateway.

use async_trait::async_trait;
use http::Uri;
use octocrab::{Octocrab, Page};
use serde_json::Value;

use crate::github::error::CheckError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator};
use crate::github::models::{
    ApiChangedFile, ChangedFileSet, PullRequestSnapshot, response_payload,
};

use super::PullRequestGateway;
use super::client::authenticated_client;
use super::error_mapping::{map_octocrab_error, map_response_error};

/// Largest page size the pull request files endpoint accepts.
const FILES_PER_PAGE: &str = "100";

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Authenticates with `token` against the locator's API base.
    ///
    /// # Errors
    ///
    /// Propagates client construction failures.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &PullRequestLocator,
    ) -> Result<Self, CheckError> {
        authenticated_client(token, locator.api_base()).map(Self::new)
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestSnapshot, CheckError> {
        let uri: Uri = locator
            .pull_request_path()
            .parse::<Uri>()
            .map_err(|error| CheckError::InvalidUrl(error.to_string()))?;

        let response = self
            .client
            ._get(uri)
            .await
            .map_err(|error| map_octocrab_error("pull request", &error))?;
        let status = response.status();
        let headers = response.headers().clone();

        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(|error| map_octocrab_error("pull request", &error))?;

        if !status.is_success() {
            return Err(map_response_error("pull request", status, &body));
        }

        let data: Value = serde_json::from_str(&body).map_err(|error| CheckError::Decode {
            message: format!("pull request body: {error}"),
        })?;

        PullRequestSnapshot::from_payload(response_payload(
            status.as_u16(),
            &locator.pull_request_url(),
            &headers,
            data,
        ))
    }

    async fn changed_files(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<ChangedFileSet, CheckError> {
        let query_params = [("per_page", FILES_PER_PAGE)];

        let first_page = self
            .client
            .get::<Page<ApiChangedFile>, _, _>(locator.files_path(), Some(&query_params))
            .await
            .map_err(|error| map_octocrab_error("pull request files", &error))?;

        self.client
            .all_pages(first_page)
            .await
            .map(|files| files.into_iter().map(|file| file.filename).collect())
            .map_err(|error| map_octocrab_error("pull request files", &error))
    }
}
