//! Fetch gateway: retrieves raw file content through an ordered list of
//! delivery endpoints.
//!
//! The fallback list *is* the retry strategy. Each endpoint gets a
//! single bounded attempt; the first HTTP 200 wins and later endpoints
//! are never consulted. Exhausting the list yields `None`, which
//! callers treat the same as "file absent".

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use crate::catalog::RepoId;
use crate::types::Revision;

/// Timeout for metadata and file fetches.
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for archive snapshot downloads.
pub const ARCHIVE_TIMEOUT: Duration = Duration::from_secs(60);

/// Delivery endpoints in attempt order: jsDelivr mirrors first, proxy
/// front-ends next, the raw origin last.
pub const MIRROR_TEMPLATES: &[&str] = &[
    "https://gcore.jsdelivr.net/gh/{repo}@{rev}/{path}",
    "https://fastly.jsdelivr.net/gh/{repo}@{rev}/{path}",
    "https://cdn.jsdelivr.net/gh/{repo}@{rev}/{path}",
    "https://ghproxy.org/https://raw.githubusercontent.com/{repo}/{rev}/{path}",
    "https://raw.dgithub.xyz/{repo}/{rev}/{path}",
    "https://raw.githubusercontent.com/{repo}/{rev}/{path}",
];

/// Tries each configured endpoint template in order until one returns
/// the file.
#[derive(Debug, Clone)]
pub struct FetchGateway {
    client: Client,
    templates: Vec<String>,
}

impl FetchGateway {
    /// Gateway over the built-in mirror chain.
    pub fn new(client: Client) -> Self {
        Self::with_templates(
            client,
            MIRROR_TEMPLATES.iter().map(|t| (*t).to_string()).collect(),
        )
    }

    /// Gateway over a custom endpoint list. Templates substitute
    /// `{repo}`, `{rev}` and `{path}`. Tests point this at a mock
    /// server.
    pub fn with_templates(client: Client, templates: Vec<String>) -> Self {
        Self { client, templates }
    }

    /// Fetch `path` from `repo` at `rev`.
    ///
    /// Returns the body of the first endpoint answering 200. `None`
    /// means every endpoint failed (non-200, transport error, or
    /// timeout). Mirrors are not compared against each other.
    pub async fn fetch(&self, repo: &RepoId, rev: &Revision, path: &str) -> Option<Bytes> {
        for template in &self.templates {
            let url = expand(template, repo, rev, path);
            match self.try_endpoint(&url).await {
                Ok(body) => {
                    debug!(%url, bytes = body.len(), "fetched");
                    return Some(body);
                }
                Err(e) => {
                    warn!(%url, error = %e, "endpoint failed, trying next");
                }
            }
        }
        debug!(%repo, path, "all endpoints exhausted");
        None
    }

    async fn try_endpoint(&self, url: &str) -> Result<Bytes, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .timeout(METADATA_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        response.bytes().await
    }
}

fn expand(template: &str, repo: &RepoId, rev: &Revision, path: &str) -> String {
    template
        .replace("{repo}", repo.as_str())
        .replace("{rev}", rev.as_str())
        .replace("{path}", path)
}
