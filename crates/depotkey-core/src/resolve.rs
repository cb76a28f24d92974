//! Resolution orchestrator: drives the catalog scan.
//!
//! The scan is a single linear pass in tier priority order with
//! first-success-wins semantics. Sources are never merged: the first
//! source that yields data halts the scan, even when that data turns
//! out to contain zero usable keys. That last behavior is inherited
//! from the published catalog ecosystem and kept as-is.

use tracing::{debug, info};

use crate::catalog::{AccessTier, Source, SourceCatalog};
use crate::error::ResolveError;
use crate::fetch::FetchGateway;
use crate::github::{EntryKind, GithubClient, TreeEntry};
use crate::types::{AppId, Resolution};
use crate::vdf;

/// Candidate configuration file names, matched case-insensitively
/// against the final path segment of blob entries.
const CANDIDATE_FILES: &[&str] = &["key.vdf", "config.vdf"];

/// Per-source outcome of one scan step.
#[derive(Debug)]
enum ScanOutcome {
    /// Nothing here; move to the next source.
    Continue,
    /// Data found; stop the entire scan.
    Halt(Resolution),
}

/// Drives revision lookup, tree listing, fetching, and extraction
/// across the catalog.
///
/// One resolver holds one HTTP client session; all requests of a run
/// share its connection pool, and dropping the resolver releases it.
#[derive(Debug)]
pub struct Resolver {
    catalog: SourceCatalog,
    github: GithubClient,
    gateway: FetchGateway,
}

impl Resolver {
    /// Resolver over the given catalog with a fresh client session.
    pub fn new(catalog: SourceCatalog) -> Self {
        let client = crate::http_client();
        Self::with_parts(
            catalog,
            GithubClient::new(client.clone()),
            FetchGateway::new(client),
        )
    }

    /// Assemble a resolver from pre-built parts. Tests use this to
    /// point both the API client and the gateway at mock servers.
    pub fn with_parts(catalog: SourceCatalog, github: GithubClient, gateway: FetchGateway) -> Self {
        Self {
            catalog,
            github,
            gateway,
        }
    }

    /// Scan the catalog for `appid`.
    ///
    /// Sources are visited strictly sequentially; each network call
    /// completes or times out before the next is issued. The first
    /// source that yields data wins and later sources are never
    /// consulted.
    ///
    /// # Errors
    ///
    /// [`ResolveError::ExhaustedCatalog`] when no source in any tier
    /// yielded data.
    pub async fn resolve(&self, appid: &AppId) -> Result<Resolution, ResolveError> {
        for source in self.catalog.in_priority_order() {
            debug!(repo = %source.repo, tier = %source.tier, "checking source");
            match self.scan_source(source, appid).await {
                ScanOutcome::Halt(resolution) => return Ok(resolution),
                ScanOutcome::Continue => {}
            }
        }
        Err(ResolveError::ExhaustedCatalog(appid.clone()))
    }

    async fn scan_source(&self, source: &Source, appid: &AppId) -> ScanOutcome {
        let Some(rev) = self.github.resolve_revision(&source.repo, appid).await else {
            return ScanOutcome::Continue;
        };
        info!(repo = %source.repo, %rev, "branch found");

        let Some(entries) = self.github.list_tree(&source.repo, &rev).await else {
            return ScanOutcome::Continue;
        };

        let candidates: Vec<&TreeEntry> = entries.iter().filter(|e| is_candidate(e)).collect();

        if candidates.is_empty() {
            debug!(repo = %source.repo, "no key files in tree");
            if source.tier == AccessTier::Branch {
                if let Some(archive) = self.github.download_archive(&source.repo, appid).await {
                    info!(repo = %source.repo, bytes = archive.len(), "branch snapshot downloaded");
                    return ScanOutcome::Halt(Resolution::Archive(archive));
                }
            }
            return ScanOutcome::Continue;
        }

        // "Found" means at least one candidate file was downloaded,
        // even if every key inside was a placeholder.
        let mut keys = Vec::new();
        let mut downloaded = false;
        for entry in candidates {
            let Some(payload) = self.gateway.fetch(&source.repo, &rev, &entry.path).await else {
                continue;
            };
            downloaded = true;
            let extracted = vdf::extract_depot_keys(&payload);
            info!(
                repo = %source.repo,
                path = %entry.path,
                keys = extracted.len(),
                "extracted"
            );
            keys.extend(extracted);
        }

        if downloaded {
            ScanOutcome::Halt(Resolution::Keys(keys))
        } else {
            ScanOutcome::Continue
        }
    }
}

/// Blob entries whose file name matches one of the candidate names.
fn is_candidate(entry: &TreeEntry) -> bool {
    entry.kind == EntryKind::Blob
        && CANDIDATE_FILES
            .iter()
            .any(|c| entry.file_name().eq_ignore_ascii_case(c))
}
