mod support;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use support::{build_test_router, request, send_json};

async fn analyze(app: &axum::Router, analysis_type: &str) -> support::JsonResponse {
    send_json(
        app,
        request(
            Method::POST,
            "/analyze",
            Some(json!({
                "dockerfile_content": "FROM ubuntu:latest\nRUN apt-get update && apt-get install -y curl",
                "analysis_type": analysis_type
            })),
        ),
    )
    .await
}

fn recommendation_count(body: &Value) -> usize {
    body.get("recommendations")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

fn score(body: &Value) -> f64 {
    body.get("score").and_then(Value::as_f64).unwrap_or(-1.0)
}

#[tokio::test]
async fn optimization_analysis_scores_three_recommendations() {
    let app = build_test_router();
    let response = analyze(&app, "optimization").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("analysis_type").and_then(Value::as_str),
        Some("optimization")
    );
    assert_eq!(recommendation_count(&response.body), 3);
    assert_eq!(score(&response.body), 0.75);
    assert_eq!(
        response.body.get("details").and_then(Value::as_str),
        Some("Analysis completed with 3 recommendations")
    );
}

#[tokio::test]
async fn security_analysis_scores_three_recommendations() {
    let app = build_test_router();
    let response = analyze(&app, "security").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(recommendation_count(&response.body), 3);
    assert_eq!(score(&response.body), 0.65);
}

#[tokio::test]
async fn performance_analysis_scores_three_recommendations() {
    let app = build_test_router();
    let response = analyze(&app, "performance").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(recommendation_count(&response.body), 3);
    assert_eq!(score(&response.body), 0.80);
}

#[tokio::test]
async fn general_analysis_yields_the_empty_default() {
    let app = build_test_router();
    let response = analyze(&app, "general").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(recommendation_count(&response.body), 0);
    assert_eq!(score(&response.body), 0.0);
    assert_eq!(
        response.body.get("details").and_then(Value::as_str),
        Some("Analysis completed with 0 recommendations")
    );
}

#[tokio::test]
async fn unrecognized_analysis_type_yields_the_empty_default() {
    let app = build_test_router();
    let response = analyze(&app, "style").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("analysis_type").and_then(Value::as_str),
        Some("style")
    );
    assert_eq!(recommendation_count(&response.body), 0);
    assert_eq!(score(&response.body), 0.0);
}

#[tokio::test]
async fn analysis_type_defaults_to_optimization() {
    let app = build_test_router();
    let response = send_json(
        &app,
        request(
            Method::POST,
            "/analyze",
            Some(json!({ "dockerfile_content": "FROM alpine:3.20" })),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("analysis_type").and_then(Value::as_str),
        Some("optimization")
    );
    assert_eq!(score(&response.body), 0.75);
}
