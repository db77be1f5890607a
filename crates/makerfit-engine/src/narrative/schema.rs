//! Response schema of the text-generation collaborator and alignment of its
//! items back onto the candidates that were sent.

use makerfit_core::{FitAnalysis, RecommendationItem};
use serde::Deserialize;

use crate::error::NarrativeError;
use crate::narrative::template::fallback_item;
use crate::scorer::ScoredCandidate;

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsEnvelope {
    pub items: Vec<NarrativeItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NarrativeItem {
    #[serde(default)]
    pub software_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub why_recommended: String,
    pub key_features: Vec<String>,
    pub pros: Vec<String>,
    pub cautions: Vec<String>,
    pub solvable: bool,
}

impl ItemsEnvelope {
    /// Reject the whole response if any item breaks the schema bounds.
    pub(crate) fn validate(&self) -> Result<(), NarrativeError> {
        for (index, item) in self.items.iter().enumerate() {
            if item.why_recommended.trim().is_empty() {
                return Err(NarrativeError::Schema(format!(
                    "items[{index}].whyRecommended is empty"
                )));
            }
            check_bounds(index, "keyFeatures", &item.key_features, 3, 5)?;
            check_bounds(index, "pros", &item.pros, 1, 5)?;
            check_bounds(index, "cautions", &item.cautions, 1, 5)?;
        }
        Ok(())
    }
}

fn check_bounds(
    index: usize,
    field: &str,
    values: &[String],
    min: usize,
    max: usize,
) -> Result<(), NarrativeError> {
    let filled = values.iter().filter(|v| !v.trim().is_empty()).count();
    if filled < min || values.len() > max {
        return Err(NarrativeError::Schema(format!(
            "items[{index}].{field} has {} entries; expected {min}..={max}",
            values.len()
        )));
    }
    Ok(())
}

/// Reject a fit analysis without an overall recommendation.
pub(crate) fn validate_fit_analysis(analysis: &FitAnalysis) -> Result<(), NarrativeError> {
    if analysis.recommendation.trim().is_empty() {
        return Err(NarrativeError::Schema(
            "recommendation is empty".to_string(),
        ));
    }
    Ok(())
}

/// Pair each candidate with at most one returned item.
///
/// Matching runs in passes over all candidates: software id first, then
/// normalized name, then the item at the candidate's own position. An item
/// claimed in an earlier pass is never reused, so a positional match cannot
/// take an item that names another candidate. Unclaimed items are dropped
/// and unmatched candidates get the template narrative. Score always comes
/// from the candidate.
pub(crate) fn align_items(
    candidates: &[ScoredCandidate],
    returned: Vec<NarrativeItem>,
) -> Vec<RecommendationItem> {
    let mut claimed = vec![false; returned.len()];
    let mut assigned: Vec<Option<usize>> = vec![None; candidates.len()];

    for (position, candidate) in candidates.iter().enumerate() {
        let found = returned.iter().enumerate().position(|(i, item)| {
            !claimed[i]
                && item
                    .software_id
                    .as_deref()
                    .is_some_and(|id| id.trim() == candidate.item.id)
        });
        if let Some(index) = found {
            claimed[index] = true;
            assigned[position] = Some(index);
        }
    }

    for (position, candidate) in candidates.iter().enumerate() {
        if assigned[position].is_some() {
            continue;
        }
        let wanted = normalize_name(&candidate.item.name);
        let found = returned.iter().enumerate().position(|(i, item)| {
            !claimed[i]
                && item
                    .name
                    .as_deref()
                    .is_some_and(|name| normalize_name(name) == wanted)
        });
        if let Some(index) = found {
            claimed[index] = true;
            assigned[position] = Some(index);
        }
    }

    for (position, slot) in assigned.iter_mut().enumerate() {
        if slot.is_none() && position < returned.len() && !claimed[position] {
            claimed[position] = true;
            *slot = Some(position);
        }
    }

    candidates
        .iter()
        .zip(assigned)
        .map(|(candidate, slot)| match slot {
            Some(index) => into_recommendation(candidate, &returned[index]),
            None => {
                tracing::debug!(
                    software_id = %candidate.item.id,
                    "no narrative item for candidate; using template"
                );
                fallback_item(candidate)
            }
        })
        .collect()
}

fn into_recommendation(candidate: &ScoredCandidate, item: &NarrativeItem) -> RecommendationItem {
    RecommendationItem {
        software_id: candidate.item.id.clone(),
        name: candidate.item.name.clone(),
        why_recommended: item.why_recommended.trim().to_string(),
        key_features: clean(&item.key_features),
        pros: clean(&item.pros),
        cautions: clean(&item.cautions),
        solvable: item.solvable,
        score: candidate.score,
    }
}

fn clean(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use makerfit_core::SoftwareCatalogItem;

    use super::*;

    fn candidate(id: &str, name: &str, score: u32) -> ScoredCandidate {
        ScoredCandidate {
            item: SoftwareCatalogItem {
                id: id.to_string(),
                name: name.to_string(),
                category: "accounting".to_string(),
                target_roles: vec![],
                tags: vec![],
                description: String::new(),
                pricing_model: None,
                website_url: None,
                key_features: vec![],
                pros: vec![],
                cons: vec![],
                active: true,
            },
            score,
            reasons: vec![],
            detail_match_count: 0,
        }
    }

    fn narrative(id: Option<&str>, name: Option<&str>, why: &str) -> NarrativeItem {
        NarrativeItem {
            software_id: id.map(str::to_string),
            name: name.map(str::to_string),
            why_recommended: why.to_string(),
            key_features: vec!["a".into(), "b".into(), "c".into()],
            pros: vec!["fast".into()],
            cautions: vec!["pricey".into()],
            solvable: true,
        }
    }

    #[test]
    fn aligns_by_id_regardless_of_order() {
        let candidates = vec![candidate("sw-a", "Alpha", 50), candidate("sw-b", "Bravo", 45)];
        let returned = vec![
            narrative(Some("sw-b"), None, "bravo text"),
            narrative(Some("sw-a"), None, "alpha text"),
        ];
        let items = align_items(&candidates, returned);
        assert_eq!(items[0].why_recommended, "alpha text");
        assert_eq!(items[1].why_recommended, "bravo text");
        assert_eq!(items[0].score, 50);
    }

    #[test]
    fn aligns_by_normalized_name() {
        let candidates = vec![candidate("sw-a", "Ledger Pro", 50)];
        let returned = vec![
            narrative(None, Some("other"), "wrong"),
            narrative(None, Some("ledger-pro"), "right"),
        ];
        let items = align_items(&candidates, returned);
        assert_eq!(items[0].why_recommended, "right");
    }

    #[test]
    fn falls_back_to_position() {
        let candidates = vec![candidate("sw-a", "Alpha", 50), candidate("sw-b", "Bravo", 20)];
        let returned = vec![
            narrative(None, None, "first"),
            narrative(None, None, "second"),
        ];
        let items = align_items(&candidates, returned);
        assert_eq!(items[0].why_recommended, "first");
        assert_eq!(items[1].why_recommended, "second");
    }

    #[test]
    fn claimed_items_are_not_reused() {
        let candidates = vec![candidate("sw-a", "Alpha", 50), candidate("sw-b", "Bravo", 20)];
        let returned = vec![
            narrative(Some("zzz"), None, "unknown"),
            narrative(Some("sw-a"), None, "alpha text"),
        ];
        let items = align_items(&candidates, returned);
        assert_eq!(items[0].why_recommended, "alpha text");
        // position 1 was claimed by Alpha, so Bravo gets the template
        assert!(items[1].why_recommended.contains("Bravo"));
        assert!(!items[1].solvable);
    }

    #[test]
    fn positional_match_skips_item_tagged_for_another_candidate() {
        let candidates = vec![candidate("alpha", "Alpha", 60), candidate("beta", "Beta", 50)];
        let mut only_beta = narrative(Some("beta"), None, "Beta is a great fit");
        only_beta.solvable = false;

        let items = align_items(&candidates, vec![only_beta]);

        assert_eq!(items[1].why_recommended, "Beta is a great fit");
        assert!(!items[1].solvable);
        assert_ne!(items[0].why_recommended, "Beta is a great fit");
        assert!(items[0].why_recommended.contains("Alpha"));
        assert!(items[0].solvable);
    }

    #[test]
    fn name_match_outranks_earlier_positional_claim() {
        let candidates = vec![candidate("sw-a", "Alpha", 50), candidate("sw-b", "Bravo", 45)];
        let returned = vec![
            narrative(None, Some("Bravo"), "bravo text"),
            narrative(None, None, "untagged"),
        ];
        let items = align_items(&candidates, returned);
        assert_eq!(items[1].why_recommended, "bravo text");
        assert!(items[0].why_recommended.contains("Alpha"));
    }

    #[test]
    fn missing_items_get_template_narrative() {
        let candidates = vec![candidate("sw-a", "Alpha", 55)];
        let items = align_items(&candidates, vec![]);
        assert_eq!(items.len(), 1);
        assert!(items[0].solvable);
        assert_eq!(items[0].score, 55);
    }

    #[test]
    fn validate_rejects_too_few_features() {
        let mut item = narrative(None, None, "text");
        item.key_features = vec!["only".into(), "two".into()];
        let envelope = ItemsEnvelope { items: vec![item] };
        assert!(matches!(envelope.validate(), Err(NarrativeError::Schema(_))));
    }

    #[test]
    fn validate_rejects_too_many_cautions() {
        let mut item = narrative(None, None, "text");
        item.cautions = (0..6).map(|i| format!("c{i}")).collect();
        let envelope = ItemsEnvelope { items: vec![item] };
        assert!(envelope.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_why() {
        let envelope = ItemsEnvelope {
            items: vec![narrative(None, None, "  ")],
        };
        assert!(envelope.validate().is_err());
    }

    #[test]
    fn validate_accepts_well_formed_items() {
        let envelope = ItemsEnvelope {
            items: vec![narrative(Some("sw-a"), Some("Alpha"), "text")],
        };
        assert!(envelope.validate().is_ok());
    }
}
