//! Shared domain types, intake validation, catalog loading and configuration
//! for the makerfit recommendation engine.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod profile;
pub mod recommendation;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, CatalogFile, SoftwareCatalogItem};
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{validate_profile, ProfileInput, ProfileStage};
pub use recommendation::{
    FitAnalysis, FitDecision, FitOutcome, GoalRefinement, NewRecommendation, PainAnalysis,
    Recommendation, RecommendationItem,
};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("invalid fit decision: {0}")]
    InvalidFitDecision(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
