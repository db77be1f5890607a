//! Narrative enrichment of ranked candidates.
//!
//! A [`NarrativeGenerator`] turns the top candidates into user-facing prose
//! and writes the fit analysis. [`TemplateFallbackGenerator`] is fully
//! deterministic; [`LiveGenerator`] calls a text-generation service and
//! drops to the template on any failure. Neither ever returns an error, and
//! neither changes a candidate's score.

mod live;
mod schema;
mod template;

use async_trait::async_trait;
use makerfit_core::{AppConfig, FitAnalysis, FitOutcome, ProfileInput, RecommendationItem};

use crate::scorer::ScoredCandidate;

pub use live::LiveGenerator;
pub use template::{fallback_fit_analysis, fallback_item, TemplateFallbackGenerator};

/// How many top candidates receive a narrative.
pub const NARRATIVE_ITEM_LIMIT: usize = 3;

#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Enrich up to [`NARRATIVE_ITEM_LIMIT`] leading candidates, one item each, in order.
    async fn recommendation_items(
        &self,
        profile: &ProfileInput,
        candidates: &[ScoredCandidate],
    ) -> Vec<RecommendationItem>;

    /// Pain analysis, goal refinements and an overall recommendation.
    async fn fit_analysis(
        &self,
        profile: &ProfileInput,
        items: &[RecommendationItem],
        outcome: &FitOutcome,
    ) -> FitAnalysis;
}

/// The generator selected for this process.
pub enum Narrator {
    Live(LiveGenerator),
    Template(TemplateFallbackGenerator),
}

impl Narrator {
    /// Live generation when an API key is configured, the template otherwise.
    ///
    /// A live client that cannot be constructed also selects the template.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let Some(api_key) = config.llm_api_key.as_deref().filter(|_| config.narrative_enabled())
        else {
            tracing::info!("no text-generation key configured; using template narratives");
            return Narrator::Template(TemplateFallbackGenerator);
        };

        match LiveGenerator::new(
            api_key,
            &config.llm_base_url,
            &config.llm_model,
            config.llm_timeout_secs,
        ) {
            Ok(live) => Narrator::Live(live),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "live narrative client unavailable; using template narratives"
                );
                Narrator::Template(TemplateFallbackGenerator)
            }
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, Narrator::Live(_))
    }
}

#[async_trait]
impl NarrativeGenerator for Narrator {
    async fn recommendation_items(
        &self,
        profile: &ProfileInput,
        candidates: &[ScoredCandidate],
    ) -> Vec<RecommendationItem> {
        match self {
            Narrator::Live(live) => live.recommendation_items(profile, candidates).await,
            Narrator::Template(template) => {
                template.recommendation_items(profile, candidates).await
            }
        }
    }

    async fn fit_analysis(
        &self,
        profile: &ProfileInput,
        items: &[RecommendationItem],
        outcome: &FitOutcome,
    ) -> FitAnalysis {
        match self {
            Narrator::Live(live) => live.fit_analysis(profile, items, outcome).await,
            Narrator::Template(template) => template.fit_analysis(profile, items, outcome).await,
        }
    }
}

fn leading(candidates: &[ScoredCandidate]) -> &[ScoredCandidate] {
    &candidates[..candidates.len().min(NARRATIVE_ITEM_LIMIT)]
}
