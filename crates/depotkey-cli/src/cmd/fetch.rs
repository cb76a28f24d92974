//! Fetch command: resolve one app id and write the output artifact.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use depotkey_core::lua::lua_script;
use depotkey_core::{AppId, Resolution, ResolveError, Resolver};

/// Resolve `appid` across the catalog and write `<appid>.lua` or
/// `<appid>_branch.zip` into `output_dir`.
pub async fn fetch(appid: &str, output_dir: &Path, catalog_path: Option<&Path>) -> Result<()> {
    // Validated before any network activity.
    let appid: AppId = appid.parse()?;

    let catalog = super::load_catalog(catalog_path)?;
    println!("Searching {} sources for app {appid}...", catalog.len());

    let resolver = Resolver::new(catalog);
    let resolution = tokio::select! {
        res = resolver.resolve(&appid) => res,
        _ = tokio::signal::ctrl_c() => bail!("interrupted"),
    };

    match resolution {
        Ok(Resolution::Keys(keys)) => {
            let path = output_dir.join(format!("{appid}.lua"));
            let script = lua_script(&appid, &keys);
            std::fs::write(&path, &script)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if keys.is_empty() {
                println!("⚠ A source matched, but every key in it was a placeholder");
            }
            println!("✓ Wrote {} ({} keys)", path.display(), keys.len());
            debug!(%script, "generated script");
            Ok(())
        }
        Ok(Resolution::Archive(bytes)) => {
            let path = output_dir.join(format!("{appid}_branch.zip"));
            std::fs::write(&path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("✓ Wrote {} ({} bytes)", path.display(), bytes.len());
            Ok(())
        }
        Err(e @ ResolveError::ExhaustedCatalog(_)) => {
            bail!("{e}. Try another app id, or check that the app exists in the cataloged repositories.")
        }
        Err(e) => Err(e.into()),
    }
}
