//! Catalog management commands.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use makerfit_core::AppConfig;

/// Sub-commands available under `catalog`.
#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// Upsert every entry of the YAML catalog into `software_catalog`
    Import {
        /// Catalog YAML file (defaults to MAKERFIT_CATALOG_PATH)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Validate the YAML catalog and upsert it entry by entry.
///
/// Entries are keyed by id; an entry marked `active: false` is stored as
/// inactive rather than deleted.
///
/// # Errors
///
/// Returns an error if the file is invalid, the database is unreachable, or
/// an upsert fails.
pub(crate) async fn run_catalog_import(
    config: &AppConfig,
    file: Option<&Path>,
) -> anyhow::Result<()> {
    let path = file.unwrap_or(config.catalog_path.as_path());
    let catalog = makerfit_core::load_catalog(path)?;
    let pool = makerfit_db::connect_pool_from_config(config).await?;

    for item in &catalog.items {
        makerfit_db::upsert_software(&pool, item).await?;
        tracing::debug!(software_id = %item.id, active = item.active, "catalog entry upserted");
    }

    println!(
        "imported {} catalog entr{} from {}",
        catalog.items.len(),
        if catalog.items.len() == 1 { "y" } else { "ies" },
        path.display()
    );
    Ok(())
}
