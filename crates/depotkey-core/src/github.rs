//! GitHub API surface: branch lookup, recursive tree listing, and
//! zipball snapshot download.
//!
//! All access is anonymous. Every method maps non-200 responses and
//! transport errors to `None`: a source that cannot be queried is
//! simply unavailable, and the catalog scan moves on.

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::catalog::RepoId;
use crate::fetch::{ARCHIVE_TIMEOUT, METADATA_TIMEOUT};
use crate::types::{AppId, Revision};

/// Public GitHub REST endpoint.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct BranchResponse {
    commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
struct BranchCommit {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

/// One entry of a recursive tree listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the repository root.
    pub path: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl TreeEntry {
    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file.
    Blob,
    /// Directory.
    Tree,
    /// Anything else the API reports (submodule commits etc).
    #[serde(other)]
    Other,
}

/// Anonymous client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_base: String,
}

impl GithubClient {
    /// Client against the public GitHub API.
    pub fn new(client: Client) -> Self {
        Self::with_api_base(client, GITHUB_API_BASE)
    }

    /// Client against a different API base. Tests point this at a mock
    /// server.
    pub fn with_api_base(client: Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    /// Look up the branch named exactly after `appid` and return its
    /// head commit. `None` covers both "no such branch" (404) and any
    /// transport failure.
    pub async fn resolve_revision(&self, repo: &RepoId, appid: &AppId) -> Option<Revision> {
        let url = format!("{}/repos/{}/branches/{}", self.api_base, repo, appid);
        let body: BranchResponse = self.get_json(&url).await?;
        Some(Revision::new(body.commit.sha))
    }

    /// List the full recursive tree at `rev`. The caller filters;
    /// everything reachable is returned.
    pub async fn list_tree(&self, repo: &RepoId, rev: &Revision) -> Option<Vec<TreeEntry>> {
        let url = format!(
            "{}/repos/{}/git/trees/{}?recursive=1",
            self.api_base,
            repo,
            rev.as_str()
        );
        let body: TreeResponse = self.get_json(&url).await?;
        if body.truncated {
            warn!(%repo, %rev, "tree listing truncated by the API; some files may be missed");
        }
        Some(body.tree)
    }

    /// Download the zipball snapshot of the branch named after `appid`.
    pub async fn download_archive(&self, repo: &RepoId, appid: &AppId) -> Option<Bytes> {
        let url = format!("{}/repos/{}/zipball/{}", self.api_base, repo, appid);
        let response = match self
            .client
            .get(&url)
            .timeout(ARCHIVE_TIMEOUT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(%url, error = %e, "archive request failed");
                return None;
            }
        };
        if response.status() != StatusCode::OK {
            debug!(%url, status = %response.status(), "archive not available");
            return None;
        }
        match response.bytes().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(%url, error = %e, "archive body read failed");
                None
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        let response = match self
            .client
            .get(url)
            .timeout(METADATA_TIMEOUT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(%url, error = %e, "request failed");
                return None;
            }
        };
        if response.status() != StatusCode::OK {
            debug!(%url, status = %response.status(), "non-200 response");
            return None;
        }
        match response.json::<T>().await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%url, error = %e, "malformed response body");
                None
            }
        }
    }
}
