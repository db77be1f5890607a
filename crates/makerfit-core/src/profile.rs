//! User intake profile and the validation rules applied before scoring.

use serde::{Deserialize, Serialize};

use crate::CoreError;

const MAX_LIST_ITEMS: usize = 20;
const MAX_ENTRY_CHARS: usize = 200;
const MAX_DETAIL_CHARS: usize = 2000;

/// What the user told the onboarding flow about their business problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[serde(default)]
    pub full_name: String,
    pub job_title: String,
    pub industry: String,
    pub team_size: u32,
    #[serde(default)]
    pub pain_points: Vec<String>,
    /// Detailed free-text description of the main pain. Enables strict scoring.
    #[serde(default)]
    pub main_pain_detail: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub current_tools: Vec<String>,
    pub budget_preference: String,
    pub deadline_preference: String,
}

impl ProfileInput {
    /// The main pain detail, trimmed, or `None` when absent or blank.
    #[must_use]
    pub fn main_pain_detail(&self) -> Option<&str> {
        self.main_pain_detail
            .as_deref()
            .map(str::trim)
            .filter(|detail| !detail.is_empty())
    }
}

/// Intake stage the profile is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStage {
    /// Partial save; list fields may still be empty.
    Draft,
    /// Final submission; at least one pain point and goal are required.
    Complete,
}

/// Validate a profile against the intake rules for `stage`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidProfile`] describing the first violated rule.
pub fn validate_profile(profile: &ProfileInput, stage: ProfileStage) -> Result<(), CoreError> {
    let required = [
        ("jobTitle", &profile.job_title),
        ("industry", &profile.industry),
        ("budgetPreference", &profile.budget_preference),
        ("deadlinePreference", &profile.deadline_preference),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CoreError::InvalidProfile(format!("{field} must be non-empty")));
        }
        check_length(field, value, MAX_ENTRY_CHARS)?;
    }

    if profile.team_size == 0 {
        return Err(CoreError::InvalidProfile(
            "teamSize must be at least 1".to_string(),
        ));
    }

    let lists = [
        ("painPoints", &profile.pain_points),
        ("goals", &profile.goals),
        ("currentTools", &profile.current_tools),
    ];
    for (field, values) in lists {
        if values.len() > MAX_LIST_ITEMS {
            return Err(CoreError::InvalidProfile(format!(
                "{field} has {} entries; at most {MAX_LIST_ITEMS} allowed",
                values.len()
            )));
        }
        for value in values {
            check_length(field, value, MAX_ENTRY_CHARS)?;
        }
    }

    if let Some(detail) = &profile.main_pain_detail {
        check_length("mainPainDetail", detail, MAX_DETAIL_CHARS)?;
    }

    if stage == ProfileStage::Complete {
        if !has_entry(&profile.pain_points) {
            return Err(CoreError::InvalidProfile(
                "at least one pain point is required".to_string(),
            ));
        }
        if !has_entry(&profile.goals) {
            return Err(CoreError::InvalidProfile(
                "at least one goal is required".to_string(),
            ));
        }
    }

    Ok(())
}

fn has_entry(values: &[String]) -> bool {
    values.iter().any(|v| !v.trim().is_empty())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::InvalidProfile(format!(
            "{field} is {len} characters; at most {max} allowed"
        )));
    }
    Ok(())
}
