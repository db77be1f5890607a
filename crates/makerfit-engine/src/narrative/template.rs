//! Deterministic narratives built from catalog fields and scores.

use async_trait::async_trait;
use makerfit_core::{
    FitAnalysis, FitDecision, FitOutcome, GoalRefinement, PainAnalysis, ProfileInput,
    RecommendationItem,
};

use crate::fit::SOFTWARE_FIT_MIN_SCORE;
use crate::narrative::{leading, NarrativeGenerator};
use crate::scorer::ScoredCandidate;

const MIN_FEATURES: usize = 3;
const MAX_LIST: usize = 5;

/// Narrative generator that never leaves the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFallbackGenerator;

#[async_trait]
impl NarrativeGenerator for TemplateFallbackGenerator {
    async fn recommendation_items(
        &self,
        _profile: &ProfileInput,
        candidates: &[ScoredCandidate],
    ) -> Vec<RecommendationItem> {
        leading(candidates).iter().map(fallback_item).collect()
    }

    async fn fit_analysis(
        &self,
        profile: &ProfileInput,
        items: &[RecommendationItem],
        outcome: &FitOutcome,
    ) -> FitAnalysis {
        fallback_fit_analysis(profile, items, outcome)
    }
}

/// Template narrative for one candidate; solvable when the score reaches the fit threshold.
#[must_use]
pub fn fallback_item(candidate: &ScoredCandidate) -> RecommendationItem {
    let item = &candidate.item;
    let category = non_blank(&item.category).unwrap_or("업무용");

    let mut why = format!("{}은(는) {category} 분야의 소프트웨어입니다.", item.name);
    if let Some(description) = non_blank(&item.description) {
        why.push(' ');
        why.push_str(description);
    }
    if !candidate.reasons.is_empty() {
        why.push_str(&format!(" 추천 근거: {}.", candidate.reasons.join(", ")));
    }
    why.push_str(&format!(" 적합도 점수는 {}점입니다.", candidate.score));

    let mut key_features = take_clean(&item.key_features);
    for tag in &item.tags {
        if key_features.len() >= MIN_FEATURES {
            break;
        }
        push_unique(&mut key_features, format!("{} 지원", tag.trim()));
    }
    for filler in [
        format!("{category} 핵심 기능"),
        "팀 단위 사용 지원".to_string(),
        "웹 브라우저에서 바로 사용".to_string(),
    ] {
        if key_features.len() >= MIN_FEATURES {
            break;
        }
        push_unique(&mut key_features, filler);
    }

    let mut pros = take_clean(&item.pros);
    if pros.is_empty() {
        pros.push(format!("{}의 기본 기능만으로 바로 시작할 수 있습니다.", item.name));
    }

    let mut cautions = take_clean(&item.cons);
    if cautions.is_empty() {
        cautions.push(match item.pricing_model.as_deref().and_then(non_blank) {
            Some(pricing) => format!("요금제({pricing})가 예산에 맞는지 도입 전에 확인하세요."),
            None => "도입 전 무료 체험으로 팀 업무 방식과 맞는지 확인하세요.".to_string(),
        });
    }

    RecommendationItem {
        software_id: item.id.clone(),
        name: item.name.clone(),
        why_recommended: why,
        key_features,
        pros,
        cautions,
        solvable: candidate.score >= SOFTWARE_FIT_MIN_SCORE,
        score: candidate.score,
    }
}

/// Template fit analysis: one entry per pain point and goal plus a
/// decision-dependent summary.
#[must_use]
pub fn fallback_fit_analysis(
    profile: &ProfileInput,
    items: &[RecommendationItem],
    outcome: &FitOutcome,
) -> FitAnalysis {
    let tools = if profile.current_tools.is_empty() {
        "기존 방식".to_string()
    } else {
        profile.current_tools.join(", ")
    };

    let pain_analysis = profile
        .pain_points
        .iter()
        .map(|pain| PainAnalysis {
            pain: pain.clone(),
            analysis: format!(
                "'{}' 문제는 {}에서 반복 작업과 정보 분산으로 이어지기 쉽습니다. \
                 현재 사용 중인 {tools}와의 연계를 함께 검토해야 합니다.",
                pain.trim(),
                profile.industry.trim()
            ),
        })
        .collect();

    let goal_refinements = profile
        .goals
        .iter()
        .map(|goal| GoalRefinement {
            goal: goal.clone(),
            refined: format!(
                "'{}'을(를) {} 안에 확인할 수 있는 측정 지표로 구체화하세요.",
                goal.trim(),
                profile.deadline_preference.trim()
            ),
        })
        .collect();

    let recommendation = match (outcome.fit_decision, items.first()) {
        (FitDecision::SoftwareFit, Some(top)) => format!(
            "{}을(를) 우선 도입해 보세요. 기존 소프트웨어로 현재 고민을 충분히 해결할 수 있습니다.",
            top.name
        ),
        (FitDecision::SoftwareFit, None) => {
            "기존 소프트웨어로 현재 고민을 충분히 해결할 수 있습니다.".to_string()
        }
        (FitDecision::CustomBuild, _) => {
            "기존 소프트웨어로는 요구사항을 충분히 채우기 어렵습니다. \
             검증된 메이커에게 맞춤 개발 견적을 받아 보세요.".to_string()
        }
    };

    FitAnalysis {
        pain_analysis,
        goal_refinements,
        recommendation,
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn take_clean(values: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for value in values.iter().filter_map(|v| non_blank(v)) {
        if out.len() >= MAX_LIST {
            break;
        }
        push_unique(&mut out, value.to_string());
    }
    out
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}
