//! Integration tests for `LiveGenerator` using wiremock HTTP mocks.

use makerfit_core::{FitDecision, FitOutcome, ProfileInput, RecommendationItem, SoftwareCatalogItem};
use makerfit_engine::{LiveGenerator, NarrativeGenerator, ScoredCandidate};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_generator(base_url: &str) -> LiveGenerator {
    LiveGenerator::new("test-key", base_url, "test-model", 5)
        .expect("client construction should not fail")
}

fn candidate(id: &str, name: &str, score: u32) -> ScoredCandidate {
    ScoredCandidate {
        item: SoftwareCatalogItem {
            id: id.to_string(),
            name: name.to_string(),
            category: "operations".to_string(),
            target_roles: vec!["operations".to_string()],
            tags: vec!["crm".to_string(), "automation".to_string()],
            description: "Customer pipeline".to_string(),
            pricing_model: Some("freemium".to_string()),
            website_url: None,
            key_features: vec!["Pipelines".to_string()],
            pros: vec![],
            cons: vec![],
            active: true,
        },
        score,
        reasons: vec!["직무 적합".to_string()],
        detail_match_count: 0,
    }
}

fn profile() -> ProfileInput {
    ProfileInput {
        job_title: "Operations Manager".to_string(),
        industry: "SaaS".to_string(),
        team_size: 12,
        pain_points: vec!["반복 업무".to_string()],
        goals: vec!["자동화".to_string()],
        ..ProfileInput::default()
    }
}

fn chat_body(content: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content.to_string() } }
        ]
    })
}

fn narrative(id: Option<&str>, name: &str, why: &str) -> serde_json::Value {
    serde_json::json!({
        "softwareId": id,
        "name": name,
        "whyRecommended": why,
        "keyFeatures": ["a", "b", "c"],
        "pros": ["fast"],
        "cautions": ["pricey"],
        "solvable": true
    })
}

async fn mount_chat(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn is_template(item: &RecommendationItem) -> bool {
    item.why_recommended.contains("적합도 점수는")
}

#[tokio::test]
async fn items_are_aligned_to_candidates_and_keep_scores() {
    let server = MockServer::start().await;
    // Returned out of order; the second entry matches by name only.
    let content = serde_json::json!({
        "items": [
            narrative(Some("beta"), "Beta", "beta why"),
            narrative(None, "alpha crm", "alpha why"),
        ]
    });
    mount_chat(&server, ResponseTemplate::new(200).set_body_json(chat_body(&content))).await;

    let candidates = vec![
        candidate("alpha", "Alpha CRM", 60),
        candidate("beta", "Beta", 30),
        candidate("gamma", "Gamma", 10),
    ];
    let items = test_generator(&server.uri())
        .recommendation_items(&profile(), &candidates)
        .await;

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].software_id, "alpha");
    assert_eq!(items[0].why_recommended, "alpha why");
    assert_eq!(items[0].score, 60);
    assert_eq!(items[1].software_id, "beta");
    assert_eq!(items[1].why_recommended, "beta why");
    assert_eq!(items[1].score, 30);
    assert_eq!(items[2].software_id, "gamma");
    assert!(is_template(&items[2]));
}

#[tokio::test]
async fn subset_response_keeps_narratives_with_their_candidates() {
    let server = MockServer::start().await;
    let mut beta = narrative(Some("beta"), "Beta", "Beta is a great fit");
    beta["solvable"] = serde_json::json!(false);
    let content = serde_json::json!({ "items": [beta] });
    mount_chat(&server, ResponseTemplate::new(200).set_body_json(chat_body(&content))).await;

    let candidates = vec![candidate("alpha", "Alpha", 60), candidate("beta", "Beta", 50)];
    let items = test_generator(&server.uri())
        .recommendation_items(&profile(), &candidates)
        .await;

    assert_eq!(items[0].software_id, "alpha");
    assert!(is_template(&items[0]));
    assert!(items[0].solvable);
    assert_eq!(items[1].why_recommended, "Beta is a great fit");
    assert!(!items[1].solvable);
}

#[tokio::test]
async fn only_three_candidates_are_enriched() {
    let server = MockServer::start().await;
    let content = serde_json::json!({
        "items": [
            narrative(Some("a"), "A", "a why"),
            narrative(Some("b"), "B", "b why"),
            narrative(Some("c"), "C", "c why"),
        ]
    });
    mount_chat(&server, ResponseTemplate::new(200).set_body_json(chat_body(&content))).await;

    let candidates: Vec<ScoredCandidate> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|id| candidate(id, &id.to_uppercase(), 20))
        .collect();
    let items = test_generator(&server.uri())
        .recommendation_items(&profile(), &candidates)
        .await;

    let ids: Vec<&str> = items.iter().map(|i| i.software_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn server_error_falls_back_to_template_items() {
    let server = MockServer::start().await;
    mount_chat(&server, ResponseTemplate::new(500)).await;

    let candidates = vec![candidate("alpha", "Alpha", 55), candidate("beta", "Beta", 12)];
    let items = test_generator(&server.uri())
        .recommendation_items(&profile(), &candidates)
        .await;

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(is_template));
    assert!(items[0].solvable);
    assert!(!items[1].solvable);
    assert_eq!(items[0].score, 55);
}

#[tokio::test]
async fn malformed_content_falls_back_to_template_items() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "choices": [ { "message": { "content": "this is not json" } } ]
    });
    mount_chat(&server, ResponseTemplate::new(200).set_body_json(body)).await;

    let items = test_generator(&server.uri())
        .recommendation_items(&profile(), &[candidate("alpha", "Alpha", 44)])
        .await;

    assert_eq!(items.len(), 1);
    assert!(is_template(&items[0]));
}

#[tokio::test]
async fn schema_violation_rejects_whole_response() {
    let server = MockServer::start().await;
    let mut short = narrative(Some("beta"), "Beta", "beta why");
    short["keyFeatures"] = serde_json::json!(["only one"]);
    let content = serde_json::json!({
        "items": [narrative(Some("alpha"), "Alpha", "alpha why"), short]
    });
    mount_chat(&server, ResponseTemplate::new(200).set_body_json(chat_body(&content))).await;

    let candidates = vec![candidate("alpha", "Alpha", 50), candidate("beta", "Beta", 20)];
    let items = test_generator(&server.uri())
        .recommendation_items(&profile(), &candidates)
        .await;

    assert!(items.iter().all(is_template));
}

#[tokio::test]
async fn empty_candidates_skip_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let items = test_generator(&server.uri())
        .recommendation_items(&profile(), &[])
        .await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn fit_analysis_is_parsed_from_response() {
    let server = MockServer::start().await;
    let content = serde_json::json!({
        "painAnalysis": [ { "pain": "반복 업무", "analysis": "자동화 여지가 큽니다." } ],
        "goalRefinements": [ { "goal": "자동화", "refined": "주간 보고 자동화" } ],
        "recommendation": "Alpha로 시작하세요."
    });
    mount_chat(&server, ResponseTemplate::new(200).set_body_json(chat_body(&content))).await;

    let outcome = FitOutcome {
        fit_decision: FitDecision::SoftwareFit,
        fit_reason: "ok".to_string(),
    };
    let analysis = test_generator(&server.uri())
        .fit_analysis(&profile(), &[], &outcome)
        .await;

    assert_eq!(analysis.recommendation, "Alpha로 시작하세요.");
    assert_eq!(analysis.pain_analysis.len(), 1);
    assert_eq!(analysis.goal_refinements[0].refined, "주간 보고 자동화");
}

#[tokio::test]
async fn fit_analysis_falls_back_on_empty_recommendation() {
    let server = MockServer::start().await;
    let content = serde_json::json!({
        "painAnalysis": [],
        "goalRefinements": [],
        "recommendation": "   "
    });
    mount_chat(&server, ResponseTemplate::new(200).set_body_json(chat_body(&content))).await;

    let outcome = FitOutcome {
        fit_decision: FitDecision::CustomBuild,
        fit_reason: "no fit".to_string(),
    };
    let analysis = test_generator(&server.uri())
        .fit_analysis(&profile(), &[], &outcome)
        .await;

    assert!(analysis.recommendation.contains("맞춤 개발"));
    assert_eq!(analysis.pain_analysis.len(), 1);
    assert_eq!(analysis.goal_refinements.len(), 1);
}
