//! Order-insensitive profile fingerprint used as the recommendation cache key.

use makerfit_core::ProfileInput;
use sha2::{Digest, Sha256};

/// Hex SHA-256 of the profile with its list fields sorted.
///
/// Reordering pain points, goals or current tools leaves the fingerprint
/// unchanged; any change to a scalar value or to list membership changes it.
#[must_use]
pub fn fingerprint(profile: &ProfileInput) -> String {
    let canonical = serde_json::json!({
        "fullName": profile.full_name,
        "jobTitle": profile.job_title,
        "industry": profile.industry,
        "teamSize": profile.team_size,
        "painPoints": sorted(&profile.pain_points),
        "mainPainDetail": profile.main_pain_detail,
        "goals": sorted(&profile.goals),
        "currentTools": sorted(&profile.current_tools),
        "budgetPreference": profile.budget_preference,
        "deadlinePreference": profile.deadline_preference,
    });
    format!("{:x}", Sha256::digest(canonical.to_string().as_bytes()))
}

fn sorted(values: &[String]) -> Vec<&str> {
    let mut values: Vec<&str> = values.iter().map(String::as_str).collect();
    values.sort_unstable();
    values
}
