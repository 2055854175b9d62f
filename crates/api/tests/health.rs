// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for readiness, health, metrics and documentation endpoints

mod fixtures;

use api::{HealthCheck, HealthStatus, routes::handlers::READY_MESSAGE};
use axum::http::StatusCode;
use fixtures::{RecordingClassifier, spawn_server};
use sentiment_classifier::ModelSource;
use tokio_test::assert_ok;

#[tokio::test]
async fn index_reports_readiness() {
    let server = spawn_server(RecordingClassifier::twitter_positive(), ModelSource::Primary).await;

    let response = assert_ok!(server.client.get(server.url("/")).send().await);

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("text/plain"))
    );
    assert_eq!(assert_ok!(response.text().await), READY_MESSAGE);
}

#[tokio::test]
async fn health_up_on_primary_model() {
    let server = spawn_server(RecordingClassifier::twitter_positive(), ModelSource::Primary).await;

    let response = assert_ok!(server.client.get(server.url("/health")).send().await);
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthCheck = assert_ok!(response.json().await);
    assert_eq!(health.status, HealthStatus::Up);
    assert_eq!(
        &*health.model.id,
        "cardiffnlp/twitter-roberta-base-sentiment-latest"
    );
    assert_eq!(health.model.source, ModelSource::Primary);
    assert_eq!(&*health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_degraded_on_fallback_model() {
    let server = spawn_server(RecordingClassifier::sst2_negative(), ModelSource::Fallback).await;

    let health: HealthCheck = assert_ok!(
        assert_ok!(server.client.get(server.url("/health")).send().await)
            .json()
            .await
    );

    assert!(matches!(health.status, HealthStatus::Degraded { .. }));
    assert_eq!(health.model.source, ModelSource::Fallback);
}

#[tokio::test]
async fn metrics_exported() {
    let server = spawn_server(RecordingClassifier::twitter_positive(), ModelSource::Primary).await;

    // produce at least one observation
    assert_ok!(
        server
            .client
            .post(server.url("/predict"))
            .json(&serde_json::json!({"text": "nice"}))
            .send()
            .await
    );

    let response = assert_ok!(server.client.get(server.url("/metrics")).send().await);
    assert_eq!(response.status(), StatusCode::OK);

    let body = assert_ok!(response.text().await);
    assert!(body.contains("sentiment_api_predictions_total"));
    assert!(body.contains("sentiment_api_fallback_model_active"));
}

#[tokio::test]
async fn openapi_document_served() {
    let server = spawn_server(RecordingClassifier::twitter_positive(), ModelSource::Primary).await;

    let response = assert_ok!(
        server
            .client
            .get(server.url("/api-doc/openapi.json"))
            .send()
            .await
    );
    assert_eq!(response.status(), StatusCode::OK);

    let doc: serde_json::Value = assert_ok!(response.json().await);
    assert!(doc["paths"]["/predict"]["post"].is_object());

    let response = assert_ok!(server.client.get(server.url("/swagger-ui")).send().await);
    assert_eq!(response.status(), StatusCode::OK);
}
