//! Directory source backed by the GitHub repository contents API.

use super::types::DirectoryEntry;
use super::{DirectorySource, SourceError};
use crate::utils::{RepositoryId, USER_AGENT};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info};

/// Public GitHub API endpoint
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`GithubDirectorySource`]
#[derive(Debug, Clone)]
pub struct GithubSettings {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

pub struct GithubDirectorySource {
    repository: RepositoryId,
    branch: String,
    path: String,
    api_url: String,
    token: Option<String>,
    client: Client,
}

impl GithubDirectorySource {
    pub fn new(
        repository: RepositoryId,
        branch: impl Into<String>,
        path: impl Into<String>,
        settings: GithubSettings,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            repository,
            branch: branch.into(),
            path: path.into(),
            api_url: settings.api_url,
            token: settings.token.filter(|t| !t.is_empty()),
            client,
        })
    }

    /// `{api_url}/repos/{owner}/{repo}/contents/{path}`
    pub fn contents_url(&self) -> Result<Url, SourceError> {
        let mut url = Url::parse(self.api_url.trim_end_matches('/')).map_err(|e| {
            SourceError::InvalidInput(format!("invalid API URL '{}': {e}", self.api_url))
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                SourceError::InvalidInput(format!("API URL cannot be a base: {}", self.api_url))
            })?;
            segments
                .pop_if_empty()
                .push("repos")
                .push(&self.repository.owner)
                .push(&self.repository.name)
                .push("contents");
            segments.extend(self.path.split('/').filter(|s| !s.is_empty()));
        }

        url.query_pairs_mut().append_pair("ref", &self.branch);
        Ok(url)
    }
}

#[async_trait]
impl DirectorySource for GithubDirectorySource {
    fn describe(&self) -> String {
        let path = if self.path.is_empty() { "/" } else { self.path.as_str() };
        format!("github:{}@{}:{}", self.repository, self.branch, path)
    }

    async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, SourceError> {
        let url = self.contents_url()?;
        debug!(url = %url, "Requesting repository contents");

        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::unavailable(self.describe(), e.to_string()))?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::unavailable(
                self.describe(),
                "repository, branch or path not found",
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::unavailable(
                self.describe(),
                format!("GitHub responded with {status}: {}", body.trim()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::unavailable(self.describe(), e.to_string()))?;
        let entries = parse_contents_response(&body).map_err(|reason| {
            SourceError::unavailable(self.describe(), reason)
        })?;

        info!(
            source = %self.describe(),
            entries = entries.len(),
            "Listed repository contents"
        );
        Ok(entries)
    }
}

/// Parse the body of a contents API response.
///
/// A directory listing is a JSON array. An object means the path resolved to
/// a single file, which is reported as an error.
pub fn parse_contents_response(body: &str) -> Result<Vec<DirectoryEntry>, String> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| format!("malformed response: {e}"))?;

    if !value.is_array() {
        return Err("path does not resolve to a directory".to_string());
    }

    serde_json::from_value::<Vec<DirectoryEntry>>(value)
        .map_err(|e| format!("unexpected entry in listing: {e}"))
}
