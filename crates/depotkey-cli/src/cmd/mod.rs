//! Command implementations.

pub mod fetch;
pub mod sources;

use std::path::Path;

use anyhow::{Context, Result};
use depotkey_core::SourceCatalog;

/// Load the catalog override if one was given, the built-in catalog
/// otherwise.
pub fn load_catalog(path: Option<&Path>) -> Result<SourceCatalog> {
    match path {
        Some(p) => SourceCatalog::load(p)
            .with_context(|| format!("failed to load catalog {}", p.display())),
        None => Ok(SourceCatalog::builtin()),
    }
}
