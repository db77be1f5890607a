use std::path::Path;

use anyhow::Context;
use makerfit_core::{validate_profile, ProfileInput, ProfileStage};

/// Read a profile JSON file and validate it for `stage`.
pub(crate) fn read_profile(path: &Path, stage: ProfileStage) -> anyhow::Result<ProfileInput> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile file {}", path.display()))?;
    let profile: ProfileInput = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse profile file {}", path.display()))?;
    validate_profile(&profile, stage)?;
    Ok(profile)
}
