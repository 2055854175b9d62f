// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the prediction endpoint

mod fixtures;

use std::sync::Arc;

use api::routes::handlers::PredictionResponse;
use axum::http::StatusCode;
use fixtures::{FailingClassifier, PanickingClassifier, RecordingClassifier, spawn_server};
use sentiment_classifier::{LabelScore, ModelSource};
use serde_json::{Value, json};

async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("error body should be JSON");
    body["error"]
        .as_str()
        .expect("error body should carry a message")
        .to_string()
}

#[tokio::test]
async fn predicts_lowercased_sentiment() {
    let classifier = RecordingClassifier::twitter_positive();
    let server = spawn_server(classifier.clone(), ModelSource::Primary).await;

    let response = server
        .client
        .post(server.url("/predict"))
        .json(&json!({"text": "I love this!"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let prediction: PredictionResponse = response.json().await.expect("body should be JSON");
    assert_eq!(
        prediction,
        PredictionResponse {
            sentiment: "positive".to_string(),
            confidence: 0.9877,
        }
    );
    assert_eq!(classifier.seen(), vec!["I love this!"]);
}

#[tokio::test]
async fn response_has_exactly_two_fields() {
    let server = spawn_server(RecordingClassifier::sst2_negative(), ModelSource::Primary).await;

    let body: Value = server
        .client
        .post(server.url("/predict"))
        .json(&json!({"text": "This was a waste of time."}))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("body should be JSON");

    assert_eq!(body, json!({"sentiment": "negative", "confidence": 0.9123}));
}

#[tokio::test]
async fn empty_text_is_bad_request() {
    let classifier = RecordingClassifier::twitter_positive();
    let server = spawn_server(classifier.clone(), ModelSource::Primary).await;

    for payload in [json!({"text": ""}), json!({"text": "   \n\t "}), json!({})] {
        let response = server
            .client
            .post(server.url("/predict"))
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(error_message(response).await, "Empty input text");
    }

    assert!(classifier.seen().is_empty());
}

#[tokio::test]
async fn long_text_truncated_to_512_characters() {
    let classifier = RecordingClassifier::twitter_positive();
    let server = spawn_server(classifier.clone(), ModelSource::Primary).await;

    let text = format!("  {}  ", "ü".repeat(600));
    let response = server
        .client
        .post(server.url("/predict"))
        .json(&json!({ "text": text }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(classifier.seen(), vec!["ü".repeat(512)]);
}

#[tokio::test]
async fn classifier_failure_is_server_error() {
    let server = spawn_server(
        Arc::new(FailingClassifier {
            cause: "CUDA out of memory",
        }),
        ModelSource::Primary,
    )
    .await;

    let response = server
        .client
        .post(server.url("/predict"))
        .json(&json!({"text": "hello"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = error_message(response).await;
    assert!(message.starts_with("Prediction failed: "), "{message}");
    assert!(message.contains("CUDA out of memory"));
}

#[tokio::test]
async fn classifier_panic_is_server_error() {
    let server = spawn_server(Arc::new(PanickingClassifier), ModelSource::Primary).await;

    let response = server
        .client
        .post(server.url("/predict"))
        .json(&json!({"text": "hello"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(response).await.starts_with("Prediction failed: "));

    // the server keeps serving after a crashed prediction
    let response = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_ranking_is_server_error() {
    let server = spawn_server(
        RecordingClassifier::new("test/silent", Vec::new()),
        ModelSource::Primary,
    )
    .await;

    let response = server
        .client
        .post(server.url("/predict"))
        .json(&json!({"text": "hello"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(response).await.starts_with("Prediction failed: "));
}

#[tokio::test]
async fn malformed_bodies_are_server_errors() {
    let classifier = RecordingClassifier::twitter_positive();
    let server = spawn_server(classifier.clone(), ModelSource::Primary).await;

    let malformed_json = server
        .client
        .post(server.url("/predict"))
        .header("content-type", "application/json")
        .body(r#"{"text": "unterminated"#)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(malformed_json.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(malformed_json).await.starts_with("Prediction failed: "));

    let wrong_content_type = server
        .client
        .post(server.url("/predict"))
        .header("content-type", "text/plain")
        .body(r#"{"text": "hello"}"#)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(wrong_content_type.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let non_string_text = server
        .client
        .post(server.url("/predict"))
        .json(&json!({"text": 42}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(non_string_text.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(non_string_text).await.contains("'text' must be a string"));

    assert!(classifier.seen().is_empty());
}

#[tokio::test]
async fn fallback_model_labels_pass_through() {
    let server = spawn_server(
        RecordingClassifier::new(
            "org/five-star",
            vec![LabelScore::new("4 Stars", 0.55), LabelScore::new("5 Stars", 0.45)],
        ),
        ModelSource::Fallback,
    )
    .await;

    let prediction: PredictionResponse = server
        .client
        .post(server.url("/predict"))
        .json(&json!({"text": "Pretty good"}))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("body should be JSON");

    assert_eq!(prediction.sentiment, "4 stars");
    assert!((prediction.confidence - 0.55).abs() < 1e-9);
}

#[tokio::test]
async fn identical_requests_agree() {
    let server = spawn_server(RecordingClassifier::twitter_positive(), ModelSource::Primary).await;

    let mut predictions = Vec::new();
    for _ in 0..3 {
        let prediction: PredictionResponse = server
            .client
            .post(server.url("/predict"))
            .json(&json!({"text": "Same text every time"}))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("body should be JSON");
        predictions.push(prediction);
    }

    assert!(predictions.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn responses_carry_request_id_and_cors() {
    let server = spawn_server(RecordingClassifier::twitter_positive(), ModelSource::Primary).await;

    let response = server
        .client
        .post(server.url("/predict"))
        .header("origin", "https://example.com")
        .json(&json!({"text": "hello"}))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}
