//! Sources command: show the catalog in scan order.

use std::path::Path;

use anyhow::Result;
use depotkey_core::AccessTier;

/// Print the cataloged sources grouped by tier, highest priority
/// first.
pub fn sources(catalog_path: Option<&Path>) -> Result<()> {
    let catalog = super::load_catalog(catalog_path)?;
    for tier in AccessTier::PRIORITY {
        let repos: Vec<_> = catalog.tier(tier).collect();
        if repos.is_empty() {
            continue;
        }
        println!("{tier} ({}):", repos.len());
        for source in repos {
            println!("  {}", source.repo);
        }
    }
    Ok(())
}
