// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! This module provides HTTP request handlers for the sentiment API server:
//! the readiness banner, sentiment prediction and health checks.

use std::time::Instant;

use axum::{Json, extract::State, response::IntoResponse};
use sentiment_classifier::{InferenceError, InferenceResult, infer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::{
    error::ServerError,
    extractors::JsonExtractor,
    metrics::{observe_prediction, outcome_label},
    state::{HealthCheck, ServerState},
};

/// Plain-text body of `GET /`
pub const READY_MESSAGE: &str = "Sentiment Analysis API with optimized BERT is running!";

/// Readiness endpoint handler
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    summary = "Readiness banner",
    description = "Returns a plain-text message once a sentiment model has been loaded and the server is accepting requests.",
    responses(
        (status = 200, description = "Service is ready", body = String, content_type = "text/plain")
    )
)]
pub async fn index_handler() -> &'static str {
    READY_MESSAGE
}

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the current health status of the API service including version, environment information and the loaded sentiment model. The status is `Degraded` while the fallback model is serving.",
    responses(
        (status = 200, description = "Service health report", body = HealthCheck)
    )
)]
pub async fn health_handler(State(state): State<ServerState>) -> impl IntoResponse {
    Json(state.health_check())
}

/// Sentiment prediction request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictRequest {
    /// Text to classify; only the first 512 characters are used
    #[schema(example = "I love this product!")]
    pub text: Option<String>,
}

/// Sentiment prediction result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PredictionResponse {
    /// Lowercased label of the most likely class
    #[schema(example = "positive")]
    pub sentiment: String,
    /// Probability of that class, rounded to four decimals
    #[schema(example = 0.9876)]
    pub confidence: f64,
}

impl From<InferenceResult> for PredictionResponse {
    fn from(result: InferenceResult) -> Self {
        Self {
            sentiment: result.sentiment,
            confidence: result.confidence,
        }
    }
}

/// Error body returned by the prediction endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// What went wrong
    #[schema(example = "Empty input text")]
    pub error: String,
}

/// Sentiment prediction
///
/// Trims the input, keeps its first 512 characters and classifies it with the
/// model loaded at startup. The classifier runs on the blocking thread pool.
///
/// # Errors
///
/// Returns `ServerError::Inference` for empty input (400) and for any failure
/// while producing a prediction (500).
#[utoipa::path(
    post,
    path = "/predict",
    tag = "sentiment",
    summary = "Classify the sentiment of a text",
    description = "Classifies the sentiment of `text`. Leading and trailing whitespace is ignored and input longer than 512 characters is truncated. Label names depend on the loaded model and are always lowercase.",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Prediction succeeded", body = PredictionResponse),
        (status = 400, description = "Input text is missing or blank", body = ErrorResponse),
        (status = 500, description = "Prediction failed", body = ErrorResponse)
    )
)]
pub async fn predict_handler(
    State(state): State<ServerState>,
    JsonExtractor(payload): JsonExtractor<Value>,
) -> Result<Json<PredictionResponse>, ServerError> {
    let handle = state.classifier().clone();
    let started = Instant::now();

    let outcome = tokio::task::spawn_blocking(move || infer(&handle, &payload))
        .await
        .unwrap_or_else(|e| Err(InferenceError::prediction(e)));

    observe_prediction(
        outcome_label(outcome.as_ref().map(|_| ())),
        started.elapsed().as_secs_f64(),
    );

    match outcome {
        Ok(result) => {
            debug!(
                sentiment = %result.sentiment,
                confidence = result.confidence,
                "prediction served"
            );
            Ok(Json(result.into()))
        }
        Err(e) => {
            warn!(error = %e, "prediction rejected");
            Err(e.into())
        }
    }
}
