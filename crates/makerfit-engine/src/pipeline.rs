//! Recommendation pipeline orchestration.

use makerfit_core::{
    FitAnalysis, FitOutcome, NewRecommendation, ProfileInput, Recommendation, RecommendationItem,
    SoftwareCatalogItem,
};
use uuid::Uuid;

use crate::error::EngineError;
use crate::fingerprint::fingerprint;
use crate::fit::decide_fit_decision;
use crate::narrative::NarrativeGenerator;
use crate::scorer::{score_catalog_candidates, ScoredCandidate};
use crate::store::{CatalogSource, RecommendationStore};

/// How many ranked candidates are kept on a recommendation.
pub const CANDIDATE_LIMIT: usize = 8;

/// Scoring, enrichment and fit decision for one profile, before persistence.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Top [`CANDIDATE_LIMIT`] candidates, best first.
    pub candidates: Vec<ScoredCandidate>,
    pub items: Vec<RecommendationItem>,
    pub outcome: FitOutcome,
    pub analysis: FitAnalysis,
}

/// Score the catalog, enrich the leaders and decide fit.
///
/// Never fails: narrative problems fall back to templates and an empty
/// catalog yields a custom-build decision.
pub async fn evaluate_profile<N: NarrativeGenerator>(
    profile: &ProfileInput,
    catalog: &[SoftwareCatalogItem],
    narrator: &N,
) -> Evaluation {
    let mut candidates = score_catalog_candidates(profile, catalog);
    candidates.truncate(CANDIDATE_LIMIT);

    let items = narrator.recommendation_items(profile, &candidates).await;
    let outcome = decide_fit_decision(&items);
    tracing::info!(
        candidates = candidates.len(),
        top_score = items.first().map_or(0, |item| item.score),
        decision = %outcome.fit_decision,
        "fit decision made"
    );
    let analysis = narrator.fit_analysis(profile, &items, &outcome).await;

    Evaluation {
        candidates,
        items,
        outcome,
        analysis,
    }
}

/// Result of [`RecommendationPipeline::recommend`].
#[derive(Debug, Clone)]
pub struct RecommendationRun {
    pub recommendation: Recommendation,
    /// True when an existing record was reused without re-scoring.
    pub cache_hit: bool,
}

/// Fingerprint-cached recommendation runs.
pub struct RecommendationPipeline<C, S, N> {
    catalog: C,
    store: S,
    narrator: N,
}

impl<C, S, N> RecommendationPipeline<C, S, N>
where
    C: CatalogSource,
    S: RecommendationStore,
    N: NarrativeGenerator,
{
    pub fn new(catalog: C, store: S, narrator: N) -> Self {
        Self {
            catalog,
            store,
            narrator,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the recommendation for this user and profile, computing it on a cache miss.
    ///
    /// A stored record with the same fingerprint is reused unchanged apart
    /// from its `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Catalog`] if the catalog cannot be fetched and
    /// [`EngineError::Store`] if the cache lookup, refresh or insert fails.
    pub async fn recommend(
        &self,
        user_id: Uuid,
        profile: &ProfileInput,
    ) -> Result<RecommendationRun, EngineError> {
        let fp = fingerprint(profile);

        let existing = self
            .store
            .find(user_id, &fp)
            .await
            .map_err(|e| EngineError::Store(Box::new(e)))?;
        if let Some(existing) = existing {
            tracing::info!(%user_id, fingerprint = %fp, "recommendation cache hit");
            let recommendation = self
                .store
                .touch(existing.id)
                .await
                .map_err(|e| EngineError::Store(Box::new(e)))?;
            return Ok(RecommendationRun {
                recommendation,
                cache_hit: true,
            });
        }

        tracing::info!(%user_id, fingerprint = %fp, "recommendation cache miss");
        let catalog = self
            .catalog
            .active_items()
            .await
            .map_err(|e| EngineError::Catalog(Box::new(e)))?;

        let evaluation = evaluate_profile(profile, &catalog, &self.narrator).await;
        let new = NewRecommendation {
            user_id,
            fingerprint: fp,
            profile: profile.clone(),
            candidate_ids: evaluation
                .candidates
                .iter()
                .map(|c| c.item.id.clone())
                .collect(),
            items: evaluation.items,
            fit_decision: evaluation.outcome.fit_decision,
            fit_reason: evaluation.outcome.fit_reason,
            fit_analysis: evaluation.analysis,
        };

        let recommendation = self
            .store
            .insert(new)
            .await
            .map_err(|e| EngineError::Store(Box::new(e)))?;

        Ok(RecommendationRun {
            recommendation,
            cache_hit: false,
        })
    }
}
