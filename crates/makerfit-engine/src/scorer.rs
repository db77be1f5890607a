//! Multi-signal relevance scorer over the software catalog.
//!
//! Every catalog item gets a non-negative integer score built from additive
//! bonuses (role, semantic tags, category, industry, budget, team size) and,
//! when the profile carries a detailed main-pain description, strict-mode
//! penalties. Matching is substring based throughout, not token equality.

use makerfit_core::{ProfileInput, SoftwareCatalogItem};

use crate::ranking::{select_ranking_pool, sort_candidates};
use crate::terms::{
    expand_mapped_signals, expand_mapped_signals_from_list, mapped_terms, normalize,
    INDUSTRY_TAGS, PAIN_TAGS, ROLE_TAGS,
};
use crate::tokenizer::tokenize;

/// Number of main-pain signals at which strict mode switches on.
pub const STRICT_MODE_MIN_SIGNALS: usize = 4;

const ROLE_BASE: i64 = 12;
const ROLE_PER_MATCH: i64 = 8;
const ROLE_CAP: i64 = 30;
const SEMANTIC_BASE: i64 = 8;
const SEMANTIC_PER_MATCH: i64 = 4;
const SEMANTIC_CAP: i64 = 40;
const CATEGORY_BONUS: i64 = 8;
const INDUSTRY_BONUS: i64 = 8;
const FREE_PLAN_BONUS: i64 = 7;
const ENTERPRISE_PLAN_BONUS: i64 = 6;
const LARGE_TEAM_SIZE: u32 = 20;
const LARGE_TEAM_BONUS: i64 = 5;
const SMALL_TEAM_SIZE: u32 = 3;
const SMALL_TEAM_BONUS: i64 = 4;
const SMALL_TEAM_TAGS: &[&str] = &["kanban", "no-code", "scheduling"];
const DETAIL_PER_MATCH: i64 = 6;
const DETAIL_CAP: i64 = 26;
const DETAIL_MISS_STRICT: i64 = 32;
const DETAIL_MISS: i64 = 18;
const DETAIL_WEAK_STRICT: i64 = 10;
const INDUSTRY_MISS_STRICT: i64 = 12;

/// A catalog item paired with its score for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub item: SoftwareCatalogItem,
    /// Final score, floored at zero.
    pub score: u32,
    /// One entry per scoring contribution, in the order applied.
    pub reasons: Vec<String>,
    /// How many main-pain signals appear in the item text.
    pub detail_match_count: usize,
}

/// Everything the scorer derives from a profile once per run.
#[derive(Debug, Clone, Default)]
pub struct ProfileSignals {
    pub role: Vec<String>,
    pub semantic: Vec<String>,
    pub industry: Vec<String>,
    pub tokens: Vec<String>,
    pub main_pain: Vec<String>,
    pub has_main_pain_detail: bool,
    pub wants_free_plan: bool,
    pub wants_outsourced_build: bool,
    pub team_size: u32,
}

impl ProfileSignals {
    #[must_use]
    pub fn from_profile(profile: &ProfileInput) -> Self {
        let role = non_empty(expand_mapped_signals(&profile.job_title, ROLE_TAGS));
        let industry = non_empty(expand_mapped_signals(&profile.industry, INDUSTRY_TAGS));

        let detail = profile.main_pain_detail();
        let main_pain = detail.map(main_pain_signals).unwrap_or_default();

        let mut semantic = expand_mapped_signals_from_list(&profile.goals, PAIN_TAGS);
        semantic.extend(expand_mapped_signals_from_list(&profile.pain_points, PAIN_TAGS));
        semantic.extend(main_pain.iter().cloned());
        let semantic = dedup(non_empty(semantic));

        let mut tokens = tokenize(&profile.job_title);
        tokens.extend(tokenize(&profile.industry));
        for text in profile.pain_points.iter().chain(&profile.goals) {
            tokens.extend(tokenize(text));
        }
        if let Some(detail) = detail {
            tokens.extend(tokenize(detail));
        }

        let budget = normalize(&profile.budget_preference);
        let wants_free_plan = budget.contains("무료") || budget.contains("free");
        let wants_outsourced_build =
            budget.contains("50") || budget.contains("외주") || budget.contains("개발");

        Self {
            role,
            semantic,
            industry,
            tokens,
            main_pain,
            has_main_pain_detail: detail.is_some(),
            wants_free_plan,
            wants_outsourced_build,
            team_size: profile.team_size,
        }
    }

    /// Strict mode: a detailed main pain yielding enough distinct signals.
    #[must_use]
    pub fn strict_mode(&self) -> bool {
        self.has_main_pain_detail && self.main_pain.len() >= STRICT_MODE_MIN_SIGNALS
    }
}

/// Tokens plus expanded pain tags of the main-pain detail, deduplicated.
#[must_use]
pub fn main_pain_signals(detail: &str) -> Vec<String> {
    let mut signals = tokenize(detail);
    signals.extend(mapped_terms(&normalize(detail), PAIN_TAGS));
    dedup(
        signals
            .into_iter()
            .filter(|signal| signal.chars().count() > 1)
            .collect(),
    )
}

/// Score and rank the catalog for a profile.
///
/// Returns candidates ordered by descending score, then by descending
/// reason count, then by name. In strict mode the ranking is restricted to
/// items matching the main-pain detail when at least three of them exist.
/// An empty catalog yields an empty ranking.
#[must_use]
pub fn score_catalog_candidates(
    profile: &ProfileInput,
    catalog: &[SoftwareCatalogItem],
) -> Vec<ScoredCandidate> {
    let signals = ProfileSignals::from_profile(profile);
    let scored = catalog
        .iter()
        .map(|item| score_item(&signals, item))
        .collect();

    let mut ranked = select_ranking_pool(scored, signals.strict_mode());
    sort_candidates(&mut ranked);
    ranked
}

/// Score one catalog item against precomputed profile signals.
#[must_use]
pub fn score_item(signals: &ProfileSignals, item: &SoftwareCatalogItem) -> ScoredCandidate {
    let text = item_text(item);
    let mut score: i64 = 0;
    let mut reasons = Vec::new();

    let matched_roles: Vec<String> = item
        .target_roles
        .iter()
        .map(|role| normalize(role))
        .filter(|role| !role.is_empty())
        .filter(|role| {
            signals
                .role
                .iter()
                .any(|signal| role.contains(signal.as_str()) || signal.contains(role.as_str()))
        })
        .collect();
    if !matched_roles.is_empty() {
        score += (ROLE_BASE + ROLE_PER_MATCH * count(matched_roles.len())).min(ROLE_CAP);
        reasons.push(format!("직무 적합: {}", matched_roles.join(", ")));
    }

    let semantic_hits = signals
        .semantic
        .iter()
        .filter(|signal| text.contains(signal.as_str()))
        .count();
    if semantic_hits > 0 {
        score += (SEMANTIC_BASE + SEMANTIC_PER_MATCH * count(semantic_hits)).min(SEMANTIC_CAP);
        reasons.push(format!("목표·고민 키워드 {semantic_hits}개 일치"));
    }

    let category = normalize(&item.category);
    if !category.is_empty()
        && signals
            .tokens
            .iter()
            .any(|token| category.contains(token.as_str()) || token.contains(category.as_str()))
    {
        score += CATEGORY_BONUS;
        reasons.push(format!("카테고리 일치: {}", item.category.trim()));
    }

    let industry_hit = signals
        .industry
        .iter()
        .any(|signal| text.contains(signal.as_str()));
    if industry_hit {
        score += INDUSTRY_BONUS;
        reasons.push("업종 키워드 일치".to_string());
    }

    let pricing = item
        .pricing_model
        .as_deref()
        .map(normalize)
        .unwrap_or_default();
    if signals.wants_free_plan && pricing.contains("free") {
        score += FREE_PLAN_BONUS;
        reasons.push("무료 요금제 선호와 일치".to_string());
    }
    if signals.wants_outsourced_build && pricing.contains("enterprise") {
        score += ENTERPRISE_PLAN_BONUS;
        reasons.push("예산 규모에 맞는 엔터프라이즈 요금제".to_string());
    }

    if signals.team_size >= LARGE_TEAM_SIZE && item.has_tag("collaboration") {
        score += LARGE_TEAM_BONUS;
        reasons.push("대규모 팀 협업 지원".to_string());
    }
    if signals.team_size <= SMALL_TEAM_SIZE && SMALL_TEAM_TAGS.iter().any(|tag| item.has_tag(tag)) {
        score += SMALL_TEAM_BONUS;
        reasons.push("소규모 팀에 맞는 간편 도구".to_string());
    }

    let mut detail_match_count = 0;
    if signals.has_main_pain_detail {
        let strict = signals.strict_mode();
        detail_match_count = signals
            .main_pain
            .iter()
            .filter(|signal| text.contains(signal.as_str()))
            .count();

        if detail_match_count > 0 {
            score += (DETAIL_PER_MATCH * count(detail_match_count)).min(DETAIL_CAP);
            reasons.push(format!("상세 고민 키워드 {detail_match_count}개 일치"));
        } else {
            score -= if strict { DETAIL_MISS_STRICT } else { DETAIL_MISS };
            reasons.push("상세 고민과 직접 관련 없음".to_string());
        }

        if strict && detail_match_count <= 1 {
            score -= DETAIL_WEAK_STRICT;
            reasons.push("상세 고민 일치도 부족".to_string());
        }
        if strict && !industry_hit {
            score -= INDUSTRY_MISS_STRICT;
            reasons.push("업종 관련성 부족".to_string());
        }
    }

    ScoredCandidate {
        item: item.clone(),
        score: u32::try_from(score.max(0)).unwrap_or(u32::MAX),
        reasons,
        detail_match_count,
    }
}

/// Lower-cased concatenation of every searchable field of an item.
#[must_use]
pub fn item_text(item: &SoftwareCatalogItem) -> String {
    let mut parts: Vec<&str> = vec![&item.name, &item.category, &item.description];
    parts.extend(item.target_roles.iter().map(String::as_str));
    parts.extend(item.tags.iter().map(String::as_str));
    parts.extend(item.key_features.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn non_empty(values: Vec<String>) -> Vec<String> {
    values.into_iter().filter(|v| !v.is_empty()).collect()
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
