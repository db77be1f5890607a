//! Software-fit versus custom-build decision.

use makerfit_core::{FitDecision, FitOutcome, RecommendationItem};

/// Minimum top score for an existing product to count as a fit.
pub const SOFTWARE_FIT_MIN_SCORE: u32 = 40;

/// How many ranked items the decision looks at.
pub const FIT_DECISION_WINDOW: usize = 3;

/// Decide between recommending software and routing to custom development.
///
/// Looks at the first three enriched items: the top score must reach
/// [`SOFTWARE_FIT_MIN_SCORE`] and at least one item must be solvable.
#[must_use]
pub fn decide_fit_decision(items: &[RecommendationItem]) -> FitOutcome {
    let window = &items[..items.len().min(FIT_DECISION_WINDOW)];

    let Some(top) = window.first() else {
        return FitOutcome {
            fit_decision: FitDecision::CustomBuild,
            fit_reason: "조건에 맞는 기존 소프트웨어를 찾지 못했습니다.".to_string(),
        };
    };

    let highest_score = top.score;
    let solvable_count = window.iter().filter(|item| item.solvable).count();

    if highest_score < SOFTWARE_FIT_MIN_SCORE || solvable_count == 0 {
        let fit_reason = if solvable_count == 0 {
            format!(
                "추천 후보 {}개 모두 핵심 문제를 단독으로 해결하기 어렵습니다. \
                 맞춤 개발을 권장합니다.",
                window.len()
            )
        } else {
            format!(
                "가장 적합한 후보({})의 적합도가 {highest_score}점으로 \
                 기준({SOFTWARE_FIT_MIN_SCORE}점)에 못 미칩니다. 맞춤 개발을 권장합니다.",
                top.name
            )
        };
        return FitOutcome {
            fit_decision: FitDecision::CustomBuild,
            fit_reason,
        };
    }

    FitOutcome {
        fit_decision: FitDecision::SoftwareFit,
        fit_reason: format!(
            "{}(적합도 {highest_score}점)를 포함해 \
             {solvable_count}개 후보가 문제를 해결할 수 있습니다.",
            top.name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, score: u32, solvable: bool) -> RecommendationItem {
        RecommendationItem {
            software_id: name.to_lowercase(),
            name: name.to_string(),
            why_recommended: String::new(),
            key_features: vec![],
            pros: vec![],
            cautions: vec![],
            solvable,
            score,
        }
    }

    #[test]
    fn no_items_means_custom_build() {
        let outcome = decide_fit_decision(&[]);
        assert_eq!(outcome.fit_decision, FitDecision::CustomBuild);
        assert!(!outcome.fit_reason.is_empty());
    }

    #[test]
    fn score_39_is_below_threshold() {
        let outcome = decide_fit_decision(&[item("Ledger", 39, true)]);
        assert_eq!(outcome.fit_decision, FitDecision::CustomBuild);
        assert!(outcome.fit_reason.contains("39"));
    }

    #[test]
    fn score_40_is_a_fit() {
        let outcome = decide_fit_decision(&[item("Ledger", 40, true)]);
        assert_eq!(outcome.fit_decision, FitDecision::SoftwareFit);
    }

    #[test]
    fn high_score_without_solvable_items_is_custom_build() {
        let outcome = decide_fit_decision(&[
            item("Ledger", 70, false),
            item("Books", 60, false),
            item("Sheets", 50, false),
        ]);
        assert_eq!(outcome.fit_decision, FitDecision::CustomBuild);
    }

    #[test]
    fn one_solvable_item_in_window_is_enough() {
        let outcome = decide_fit_decision(&[
            item("Ledger", 70, false),
            item("Books", 20, true),
        ]);
        assert_eq!(outcome.fit_decision, FitDecision::SoftwareFit);
        assert!(outcome.fit_reason.contains("Ledger"));
    }

    #[test]
    fn items_beyond_the_window_are_ignored() {
        let outcome = decide_fit_decision(&[
            item("A", 70, false),
            item("B", 60, false),
            item("C", 50, false),
            item("D", 45, true),
        ]);
        assert_eq!(outcome.fit_decision, FitDecision::CustomBuild);
    }
}
