//! Candidate scoring and fit-decision engine for makerfit.
//!
//! Ranks the software catalog against a user's intake profile using
//! bilingual term expansion and substring matching, enriches the leading
//! candidates with narrative text (live or template), decides between
//! recommending software and commissioning a custom build, and caches the
//! result per profile fingerprint.

pub mod error;
pub mod fingerprint;
pub mod fit;
pub mod narrative;
pub mod pipeline;
pub mod ranking;
pub mod scorer;
pub mod store;
pub mod terms;
pub mod tokenizer;

pub use error::{BoxError, EngineError, NarrativeError};
pub use fingerprint::fingerprint;
pub use fit::{decide_fit_decision, SOFTWARE_FIT_MIN_SCORE};
pub use narrative::{
    LiveGenerator, NarrativeGenerator, Narrator, TemplateFallbackGenerator, NARRATIVE_ITEM_LIMIT,
};
pub use pipeline::{
    evaluate_profile, Evaluation, RecommendationPipeline, RecommendationRun, CANDIDATE_LIMIT,
};
pub use ranking::select_ranking_pool;
pub use scorer::{score_catalog_candidates, ProfileSignals, ScoredCandidate};
pub use store::{CatalogSource, RecommendationStore, StaticCatalog};
pub use tokenizer::tokenize;
