//! Offline scoring and fingerprint commands. No database is touched.

use std::path::Path;

use makerfit_core::{AppConfig, ProfileStage};
use makerfit_engine::{fingerprint, score_catalog_candidates, StaticCatalog};

use crate::profile::read_profile;

/// Print the ranked candidates for a profile against the YAML catalog.
///
/// # Errors
///
/// Returns an error if the profile or catalog cannot be loaded.
pub(crate) fn run_score(
    config: &AppConfig,
    profile_path: &Path,
    catalog_path: Option<&Path>,
    limit: usize,
) -> anyhow::Result<()> {
    let profile = read_profile(profile_path, ProfileStage::Draft)?;
    let catalog = load_static_catalog(config, catalog_path)?;

    let ranked = score_catalog_candidates(&profile, &catalog.active());
    if ranked.is_empty() {
        println!("catalog has no active items");
        return Ok(());
    }

    println!("{:<6}{:<7}{:<24}REASONS", "RANK", "SCORE", "NAME");
    for (rank, candidate) in ranked.iter().take(limit).enumerate() {
        println!(
            "{:<6}{:<7}{:<24}{}",
            rank + 1,
            candidate.score,
            candidate.item.name,
            candidate.reasons.join("; ")
        );
    }

    Ok(())
}

/// Print the cache fingerprint of a profile.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded.
pub(crate) fn run_fingerprint(profile_path: &Path) -> anyhow::Result<()> {
    let profile = read_profile(profile_path, ProfileStage::Draft)?;
    println!("{}", fingerprint(&profile));
    Ok(())
}

/// Load the YAML catalog from `path`, or from the configured default.
pub(crate) fn load_static_catalog(
    config: &AppConfig,
    path: Option<&Path>,
) -> anyhow::Result<StaticCatalog> {
    let path = path.unwrap_or(config.catalog_path.as_path());
    let file = makerfit_core::load_catalog(path)?;
    tracing::debug!(path = %path.display(), items = file.items.len(), "catalog loaded");
    Ok(StaticCatalog::new(file.items))
}
