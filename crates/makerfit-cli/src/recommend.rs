//! Recommendation commands: an offline run against the YAML catalog, and the
//! cached run against Postgres.

use std::path::Path;

use makerfit_core::{AppConfig, ProfileStage};
use makerfit_engine::{evaluate_profile, fingerprint, Narrator, RecommendationPipeline};
use uuid::Uuid;

use crate::profile::read_profile;
use crate::score::load_static_catalog;
use crate::store::{PgCatalog, PgRecommendationStore};

/// Score, enrich and decide fit without persisting; prints JSON.
///
/// # Errors
///
/// Returns an error if the profile or catalog cannot be loaded.
pub(crate) async fn run_recommend(
    config: &AppConfig,
    profile_path: &Path,
    catalog_path: Option<&Path>,
) -> anyhow::Result<()> {
    let profile = read_profile(profile_path, ProfileStage::Complete)?;
    let catalog = load_static_catalog(config, catalog_path)?;
    let narrator = Narrator::from_config(config);
    tracing::debug!(live = narrator.is_live(), "narrative generator selected");

    let evaluation = evaluate_profile(&profile, &catalog.active(), &narrator).await;
    let candidate_ids: Vec<&str> = evaluation
        .candidates
        .iter()
        .map(|c| c.item.id.as_str())
        .collect();

    let output = serde_json::json!({
        "fingerprint": fingerprint(&profile),
        "candidateIds": candidate_ids,
        "items": evaluation.items,
        "fitDecision": evaluation.outcome.fit_decision,
        "fitReason": evaluation.outcome.fit_reason,
        "fitAnalysis": evaluation.analysis,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Run the cached pipeline against Postgres for `user_id`; prints the stored record.
///
/// # Errors
///
/// Returns an error if the database is unreachable, the profile is invalid,
/// or the pipeline fails.
pub(crate) async fn run_recommend_persisted(
    config: &AppConfig,
    profile_path: &Path,
    user_id: Uuid,
) -> anyhow::Result<()> {
    let profile = read_profile(profile_path, ProfileStage::Complete)?;
    let pool = makerfit_db::connect_pool_from_config(config).await?;

    let pipeline = RecommendationPipeline::new(
        PgCatalog::new(pool.clone()),
        PgRecommendationStore::new(pool),
        Narrator::from_config(config),
    );
    let run = pipeline.recommend(user_id, &profile).await?;

    tracing::info!(
        recommendation_id = %run.recommendation.id,
        cache_hit = run.cache_hit,
        "recommendation ready"
    );
    println!("{}", serde_json::to_string_pretty(&run.recommendation)?);
    Ok(())
}
