//! depotkey-core
//!
//! Resolves a numeric Steam application id to the set of depot
//! decryption keys published across a fixed catalog of GitHub-hosted
//! manifest repositories.
//!
//! # Pipeline
//!
//! The [`resolve::Resolver`] walks the [`catalog::SourceCatalog`] in
//! tier priority order. For each source it looks up a branch named
//! after the app id, lists the tree at that branch's head, downloads
//! any `key.vdf`/`config.vdf` files through the
//! [`fetch::FetchGateway`] mirror chain, and extracts keys with
//! [`vdf::extract_depot_keys`]. The first source that yields data stops
//! the scan.
//!
//! Every network step is one bounded attempt: failures are logged and
//! the scan degrades to the next endpoint or the next source. Only an
//! invalid app id or a fully exhausted catalog surface as errors.

pub mod catalog;
pub mod error;
pub mod fetch;
pub mod github;
pub mod lua;
pub mod resolve;
pub mod types;
pub mod vdf;

pub use catalog::{AccessTier, RepoId, Source, SourceCatalog};
pub use error::{CatalogError, ResolveError};
pub use resolve::Resolver;
pub use types::{AppId, DepotKey, Resolution, Revision};

/// User Agent string
pub const USER_AGENT: &str = concat!("depotkey/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client session shared by one resolution run.
///
/// The client owns the connection pool; dropping it on any exit path
/// (success, failure, cancellation) releases the underlying sockets.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("failed to build HTTP client")
}
