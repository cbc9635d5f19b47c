use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use scoreline_api::api::{AppState, create_router};
use scoreline_api::cache::CacheStore;
use scoreline_api::clock::ManualClock;
use scoreline_api::provider::DataProvider;
use scoreline_api::testing_utils::{MockDataProvider, TestDataBuilder};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

struct Harness {
    router: Router,
    provider: Arc<MockDataProvider>,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    let provider = Arc::new(MockDataProvider::new());
    let clock = Arc::new(ManualClock::new());
    let cache = CacheStore::with_clock(Duration::from_secs(30), clock.clone());
    let state = AppState::new(cache, provider.clone() as Arc<dyn DataProvider>, 2023);

    Harness {
        router: create_router(state),
        provider,
        clock,
    }
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn labels(body: &Value) -> Vec<Vec<String>> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|group| {
            group["predictions"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p["outcome"].as_str().unwrap().to_string())
                .collect()
        })
        .collect()
}

/// Two reads within the TTL reach the provider once and return the same document
#[tokio::test]
async fn test_teams_served_from_cache_within_ttl() {
    let h = harness();

    let (first_status, first) = get(&h.router, "/api/teams").await;
    h.clock.advance(Duration::from_secs(5));
    let (second_status, second) = get(&h.router, "/api/teams").await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, TestDataBuilder::team_document(2023));
    assert_eq!(first, second);
    assert_eq!(h.provider.teams_calls(), 1);
}

#[tokio::test]
async fn test_teams_refetched_after_ttl() {
    let h = harness();

    get(&h.router, "/api/teams").await;
    h.provider.set_teams(json!({"_id": 2023, "teams": []}));
    h.clock.advance(Duration::from_secs(30));
    let (status, body) = get(&h.router, "/api/teams").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"_id": 2023, "teams": []}));
    assert_eq!(h.provider.teams_calls(), 2);
}

#[tokio::test]
async fn test_fantasy_failure_keeps_fresh_entry() {
    let h = harness();

    let (status, first) = get(&h.router, "/api/fantasy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        first,
        json!({"fantasy_data": TestDataBuilder::fantasy_document()})
    );

    h.provider.fail_fantasy(true);
    h.clock.advance(Duration::from_secs(10));
    let (status, second) = get(&h.router, "/api/fantasy").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(h.provider.fantasy_calls(), 1);
}

#[tokio::test]
async fn test_fantasy_failure_on_stale_entry_reports_error_and_keeps_entry() {
    let h = harness();

    get(&h.router, "/api/fantasy").await;
    h.provider.fail_fantasy(true);
    h.clock.advance(Duration::from_secs(31));

    let (status, body) = get(&h.router, "/api/fantasy").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("fantasy"));
    assert_eq!(body.as_object().unwrap().len(), 1);

    let (_, health) = get(&h.router, "/api/health").await;
    let fantasy = health["cache"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["category"] == "fantasy")
        .unwrap();
    assert_eq!(fantasy["present"], json!(true));
    assert_eq!(fantasy["fresh"], json!(false));

    h.provider.fail_fantasy(false);
    let (status, _) = get(&h.router, "/api/fantasy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.provider.fantasy_calls(), 3);
}

#[tokio::test]
async fn test_teams_failure_on_empty_cache() {
    let h = harness();
    h.provider.fail_teams(true);

    let (status, body) = get(&h.router, "/api/teams").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_predictions_wire_shape() {
    let h = harness();

    let (status, body) = get(&h.router, "/api/predictions").await;

    assert_eq!(status, StatusCode::OK);
    let groups = body["predictions_data"].as_array().unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0]["_id"], "2023-08-11");
    assert_eq!(
        groups[0]["predictions"][0],
        json!({
            "_id": "BUR vs MCI",
            "datetime": "2023-08-11T19:00:00",
            "home": "BUR",
            "away": "MCI",
            "prediction": {"homeGoals": 0.6, "awayGoals": 2.4},
            "actual": {"homeGoals": 0, "awayGoals": 3}
        })
    );
    assert_eq!(groups[1]["predictions"][0]["actual"], Value::Null);
}

#[tokio::test]
async fn test_score_predictions() {
    let h = harness();

    let (status, body) = get(&h.router, "/api/scorepredictions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        labels(&body),
        vec![
            vec!["Over 1.5 goals"],
            vec![
                "Over 1.5 goals",
                "Over 1.5 goals",
                "Under 1.5 goals",
                "Under 1.5 goals"
            ],
            vec!["Over 1.5 goals", "Over 1.5 goals"],
        ]
    );
    assert_eq!(
        body[0]["predictions"][0],
        json!({
            "_id": "BUR vs MCI",
            "datetime": "2023-08-11T19:00:00",
            "home": "BUR",
            "away": "MCI",
            "totalGoals": 3.0,
            "outcome": "Over 1.5 goals",
            "actual": {"homeGoals": 0, "awayGoals": 3}
        })
    );
}

#[tokio::test]
async fn test_risk_predictions() {
    let h = harness();

    let (status, body) = get(&h.router, "/api/riskpredictions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        labels(&body),
        vec![
            vec!["Under 1.5 goals"],
            vec![
                "Under 1.5 goals",
                "Over 1.5 goals and GG",
                "Under 4.5 goals",
                "Under 4.5 goals"
            ],
            vec!["Under 1.5 goals", "Under 1.5 goals"],
        ]
    );
}

#[tokio::test]
async fn test_classified_views_are_not_cached() {
    let h = harness();

    get(&h.router, "/api/scorepredictions").await;
    get(&h.router, "/api/riskpredictions").await;
    get(&h.router, "/api/scorepredictions").await;

    assert_eq!(h.provider.predictions_calls(), 3);

    let (_, health) = get(&h.router, "/api/health").await;
    let predictions = health["cache"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["category"] == "predictions")
        .unwrap();
    assert_eq!(predictions["present"], json!(false));
}

#[tokio::test]
async fn test_malformed_record_fails_whole_view() {
    let h = harness();
    let mut groups = TestDataBuilder::matchweek_groups();
    groups[1].predictions[1].prediction = None;
    h.provider.set_predictions(groups);

    let (status, body) = get(&h.router, "/api/riskpredictions").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("BOU vs WHU"));
}

#[tokio::test]
async fn test_classified_view_provider_failure() {
    let h = harness();
    h.provider.fail_predictions(true);

    let (status, body) = get(&h.router, "/api/scorepredictions").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_health_reports_every_category() {
    let h = harness();
    get(&h.router, "/api/teams").await;
    h.clock.advance(Duration::from_millis(1500));

    let (status, body) = get(&h.router, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let cache = body["cache"].as_array().unwrap();
    let categories: Vec<_> = cache.iter().map(|c| c["category"].as_str().unwrap()).collect();
    assert_eq!(categories, ["teams", "fantasy", "predictions"]);
    assert_eq!(cache[0]["present"], json!(true));
    assert_eq!(cache[0]["fresh"], json!(true));
    assert_eq!(cache[0]["age_ms"], json!(1500));
    assert_eq!(cache[1]["age_ms"], Value::Null);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let h = harness();

    let response = h
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/teams")
                .header(header::ORIGIN, "http://frontend.local")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let h = harness();
    let (status, _) = get(&h.router, "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Concurrent misses are served without coordination between them
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_all_succeed() {
    let h = harness();

    let requests = (0..16).map(|_| get(&h.router, "/api/predictions"));
    let responses = futures::future::join_all(requests).await;

    assert!(responses.iter().all(|(status, _)| *status == StatusCode::OK));
    assert!(responses.windows(2).all(|pair| pair[0].1 == pair[1].1));
    let calls = h.provider.predictions_calls();
    assert!((1..=16).contains(&calls), "unexpected provider calls: {calls}");
}
