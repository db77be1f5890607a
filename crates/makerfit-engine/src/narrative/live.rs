//! Text-generation client for narrative enrichment.
//!
//! Speaks the OpenAI-compatible `/chat/completions` protocol with a JSON
//! response format. One attempt per call; the client timeout bounds it.

use std::time::Duration;

use async_trait::async_trait;
use makerfit_core::{FitAnalysis, FitOutcome, ProfileInput, RecommendationItem};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::NarrativeError;
use crate::narrative::schema::{align_items, validate_fit_analysis, ItemsEnvelope};
use crate::narrative::template::TemplateFallbackGenerator;
use crate::narrative::{leading, NarrativeGenerator};
use crate::scorer::ScoredCandidate;

const ITEMS_SYSTEM_PROMPT: &str = "You are a software consultant for small Korean businesses. \
Answer in Korean. Respond with a JSON object {\"items\": [...]} holding one entry per candidate, \
each with softwareId, name, whyRecommended, keyFeatures (3-5), pros (1-5), cautions (1-5) and \
solvable (true if this product alone can solve the user's main problem).";

const FIT_ANALYSIS_SYSTEM_PROMPT: &str = "You are a software consultant for small Korean \
businesses. Answer in Korean. Respond with a JSON object with painAnalysis (array of \
{pain, analysis}, one per pain point), goalRefinements (array of {goal, refined}, one per goal) \
and recommendation (string).";

/// Narrative generator backed by a remote language model.
#[derive(Clone)]
pub struct LiveGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    fallback: TemplateFallbackGenerator,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatContent,
}

#[derive(Deserialize)]
struct ChatContent {
    content: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CandidatePayload<'a> {
    software_id: &'a str,
    name: &'a str,
    category: &'a str,
    description: &'a str,
    key_features: &'a [String],
    pricing_model: Option<&'a str>,
    score: u32,
    reasons: &'a [String],
}

impl LiveGenerator {
    /// Build a client for `{base_url}/chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::Http`] if the HTTP client cannot be constructed.
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, NarrativeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("makerfit/0.1 (recommendation-narrative)")
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            fallback: TemplateFallbackGenerator,
        })
    }

    async fn request_items(
        &self,
        profile: &ProfileInput,
        candidates: &[ScoredCandidate],
    ) -> Result<ItemsEnvelope, NarrativeError> {
        let payload: Vec<CandidatePayload<'_>> = candidates
            .iter()
            .map(|c| CandidatePayload {
                software_id: &c.item.id,
                name: &c.item.name,
                category: &c.item.category,
                description: &c.item.description,
                key_features: &c.item.key_features,
                pricing_model: c.item.pricing_model.as_deref(),
                score: c.score,
                reasons: &c.reasons,
            })
            .collect();
        let user = serde_json::json!({ "profile": profile, "candidates": payload }).to_string();

        let envelope: ItemsEnvelope = self.chat_json(ITEMS_SYSTEM_PROMPT, &user).await?;
        envelope.validate()?;
        Ok(envelope)
    }

    async fn request_fit_analysis(
        &self,
        profile: &ProfileInput,
        items: &[RecommendationItem],
        outcome: &FitOutcome,
    ) -> Result<FitAnalysis, NarrativeError> {
        let user = serde_json::json!({
            "profile": profile,
            "recommendations": items,
            "fitDecision": outcome.fit_decision,
            "fitReason": outcome.fit_reason,
        })
        .to_string();

        let analysis: FitAnalysis = self.chat_json(FIT_ANALYSIS_SYSTEM_PROMPT, &user).await?;
        validate_fit_analysis(&analysis)?;
        Ok(analysis)
    }

    async fn chat_json<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
    ) -> Result<T, NarrativeError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: 0.3,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NarrativeError::Status(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(NarrativeError::EmptyResponse)?;

        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl NarrativeGenerator for LiveGenerator {
    async fn recommendation_items(
        &self,
        profile: &ProfileInput,
        candidates: &[ScoredCandidate],
    ) -> Vec<RecommendationItem> {
        let top = leading(candidates);
        if top.is_empty() {
            return Vec::new();
        }

        match self.request_items(profile, top).await {
            Ok(envelope) => align_items(top, envelope.items),
            Err(e) => {
                tracing::warn!(error = %e, "narrative generation failed; using template items");
                self.fallback.recommendation_items(profile, top).await
            }
        }
    }

    async fn fit_analysis(
        &self,
        profile: &ProfileInput,
        items: &[RecommendationItem],
        outcome: &FitOutcome,
    ) -> FitAnalysis {
        match self.request_fit_analysis(profile, items, outcome).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "fit analysis generation failed; using template analysis"
                );
                self.fallback.fit_analysis(profile, items, outcome).await
            }
        }
    }
}
