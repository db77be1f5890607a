//! Recommendation output types shared by the engine, storage and CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::ProfileInput;
use crate::CoreError;

/// One ranked, narrative-enriched software recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub software_id: String,
    pub name: String,
    pub why_recommended: String,
    /// Three to five entries.
    pub key_features: Vec<String>,
    /// One to five entries.
    pub pros: Vec<String>,
    /// One to five entries.
    pub cautions: Vec<String>,
    /// Whether this product alone can plausibly solve the user's problem.
    pub solvable: bool,
    pub score: u32,
}

/// Recommend existing software, or route the user to custom development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitDecision {
    SoftwareFit,
    CustomBuild,
}

impl FitDecision {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FitDecision::SoftwareFit => "software_fit",
            FitDecision::CustomBuild => "custom_build",
        }
    }
}

impl std::fmt::Display for FitDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FitDecision {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "software_fit" => Ok(FitDecision::SoftwareFit),
            "custom_build" => Ok(FitDecision::CustomBuild),
            other => Err(CoreError::InvalidFitDecision(other.to_string())),
        }
    }
}

/// A fit decision together with its human-readable justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitOutcome {
    pub fit_decision: FitDecision,
    pub fit_reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PainAnalysis {
    pub pain: String,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRefinement {
    pub goal: String,
    pub refined: String,
}

/// Narrative analysis of the user's pains and goals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitAnalysis {
    pub pain_analysis: Vec<PainAnalysis>,
    pub goal_refinements: Vec<GoalRefinement>,
    pub recommendation: String,
}

/// A freshly computed recommendation, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecommendation {
    pub user_id: Uuid,
    pub fingerprint: String,
    pub profile: ProfileInput,
    /// Ids of the top candidates, best first.
    pub candidate_ids: Vec<String>,
    pub items: Vec<RecommendationItem>,
    pub fit_decision: FitDecision,
    pub fit_reason: String,
    pub fit_analysis: FitAnalysis,
}

/// A persisted recommendation, keyed by user and profile fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fingerprint: String,
    pub profile: ProfileInput,
    pub candidate_ids: Vec<String>,
    pub items: Vec<RecommendationItem>,
    pub fit_decision: FitDecision,
    pub fit_reason: String,
    pub fit_analysis: FitAnalysis,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
