//! Centralized error types for the depotkey workspace.
//!
//! Per-source network failures never appear here: the pipeline recovers
//! from them locally by moving to the next endpoint or source. Only
//! pre-flight validation, catalog configuration, and a fully exhausted
//! scan are surfaced to the caller.

use thiserror::Error;

use crate::types::AppId;

/// Errors surfaced by a resolution run.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid app id '{0}': expected decimal digits only")]
    InvalidAppId(String),

    #[error("no cataloged source had data for app {0}")]
    ExhaustedCatalog(AppId),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors raised while loading or validating a source catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid repository '{0}': expected 'owner/name'")]
    InvalidRepo(String),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog: {0}")]
    Toml(#[from] toml::de::Error),
}
