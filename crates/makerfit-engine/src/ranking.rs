//! Ranking pool selection and the canonical candidate order.

use std::cmp::Ordering;

use crate::scorer::ScoredCandidate;

/// Strongly aligned candidates needed before strict mode narrows the pool.
pub const MIN_STRONG_POOL: usize = 3;

/// Choose which scored candidates take part in ranking.
///
/// Outside strict mode every candidate is kept. In strict mode only items
/// matching at least one main-pain signal are kept, unless fewer than
/// [`MIN_STRONG_POOL`] qualify, in which case the full set is kept.
#[must_use]
pub fn select_ranking_pool(
    scored: Vec<ScoredCandidate>,
    strict_mode: bool,
) -> Vec<ScoredCandidate> {
    if !strict_mode {
        return scored;
    }

    let strong = scored
        .iter()
        .filter(|candidate| candidate.detail_match_count >= 1)
        .count();
    if strong >= MIN_STRONG_POOL {
        tracing::debug!(strong, total = scored.len(), "ranking within strongly aligned pool");
        scored
            .into_iter()
            .filter(|candidate| candidate.detail_match_count >= 1)
            .collect()
    } else {
        tracing::debug!(
            strong,
            total = scored.len(),
            "too few strongly aligned candidates; ranking full set"
        );
        scored
    }
}

/// Descending score, then descending reason count, then ascending name.
#[must_use]
pub fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.reasons.len().cmp(&a.reasons.len()))
        .then_with(|| a.item.name.cmp(&b.item.name))
}

pub fn sort_candidates(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(compare_candidates);
}

#[cfg(test)]
mod tests {
    use makerfit_core::{ProfileInput, SoftwareCatalogItem};

    use super::*;
    use crate::scorer::score_catalog_candidates;

    fn candidate(name: &str, score: u32, reasons: usize, detail: usize) -> ScoredCandidate {
        ScoredCandidate {
            item: SoftwareCatalogItem {
                id: name.to_lowercase(),
                name: name.to_string(),
                category: String::new(),
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
            reasons: (0..reasons).map(|i| format!("reason {i}")).collect(),
            detail_match_count: detail,
        }
    }

    fn names(candidates: &[ScoredCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.item.name.as_str()).collect()
    }

    #[test]
    fn sorts_by_score_then_reasons_then_name() {
        let mut list = vec![
            candidate("Delta", 30, 1, 0),
            candidate("Bravo", 40, 1, 0),
            candidate("Charlie", 30, 2, 0),
            candidate("Alpha", 30, 1, 0),
        ];
        sort_candidates(&mut list);
        assert_eq!(names(&list), vec!["Bravo", "Charlie", "Alpha", "Delta"]);
    }

    #[test]
    fn equal_score_and_reasons_fall_back_to_name() {
        let mut list = vec![candidate("Zeta", 10, 2, 0), candidate("Eta", 10, 2, 0)];
        sort_candidates(&mut list);
        assert_eq!(names(&list), vec!["Eta", "Zeta"]);
    }

    #[test]
    fn non_strict_keeps_everything() {
        let pool = select_ranking_pool(
            vec![candidate("A", 1, 0, 0), candidate("B", 1, 0, 2)],
            false,
        );
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn strict_narrows_to_strong_pool_when_large_enough() {
        let pool = select_ranking_pool(
            vec![
                candidate("A", 50, 0, 0),
                candidate("B", 10, 0, 1),
                candidate("C", 10, 0, 2),
                candidate("D", 10, 0, 3),
            ],
            true,
        );
        assert_eq!(names(&pool), vec!["B", "C", "D"]);
    }

    #[test]
    fn strict_falls_back_to_full_set_when_pool_too_small() {
        let pool = select_ranking_pool(
            vec![
                candidate("A", 50, 0, 0),
                candidate("B", 10, 0, 1),
                candidate("C", 10, 0, 2),
            ],
            true,
        );
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn unrelated_detail_penalizes_all_and_keeps_full_ranking() {
        let profile = ProfileInput {
            job_title: "인사 담당자".to_string(),
            industry: "제조".to_string(),
            team_size: 12,
            pain_points: vec!["급여 계산".to_string()],
            main_pain_detail: Some("급여 계산 누락 반복 야근".to_string()),
            goals: vec!["급여 자동화".to_string()],
            budget_preference: "미정".to_string(),
            deadline_preference: "1개월".to_string(),
            ..ProfileInput::default()
        };
        let mut catalog: Vec<SoftwareCatalogItem> = ["Sketch Pad", "Color Mixer", "Vector Studio"]
            .iter()
            .map(|name| candidate(name, 0, 0, 0).item)
            .collect();
        for item in &mut catalog {
            item.category = "design".to_string();
            item.target_roles = vec!["designer".to_string()];
            item.tags = vec!["design".to_string(), "prototyping".to_string()];
            item.description = "Vector illustration and mockups".to_string();
        }

        let ranked = score_catalog_candidates(&profile, &catalog);
        assert_eq!(ranked.len(), 3);
        assert_eq!(names(&ranked), vec!["Color Mixer", "Sketch Pad", "Vector Studio"]);
        for candidate in &ranked {
            assert_eq!(candidate.score, 0);
            assert_eq!(candidate.detail_match_count, 0);
            assert!(candidate.reasons.iter().any(|r| r == "상세 고민과 직접 관련 없음"));
            assert!(candidate.reasons.iter().any(|r| r == "업종 관련성 부족"));
        }
    }
}
