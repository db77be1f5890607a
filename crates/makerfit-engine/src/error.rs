use thiserror::Error;

/// Boxed collaborator error, kept as the source of an [`EngineError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog fetch failed: {0}")]
    Catalog(#[source] BoxError),

    #[error("recommendation store error: {0}")]
    Store(#[source] BoxError),
}

/// Failures talking to the text-generation collaborator.
///
/// Never leaves the narrative module; every variant downgrades to the
/// template fallback.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("text generation returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("text generation returned no content")]
    EmptyResponse,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema violation: {0}")]
    Schema(String),
}
