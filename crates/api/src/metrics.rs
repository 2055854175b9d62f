// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::sync::LazyLock;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, IntGauge, TextEncoder, register_histogram_vec,
    register_int_counter_vec, register_int_gauge,
};
use sentiment_classifier::InferenceError;
use tracing::error;

/// Outcome label for a successful prediction
pub const OUTCOME_SUCCESS: &str = "success";
/// Outcome label for a request rejected for empty text
pub const OUTCOME_EMPTY_INPUT: &str = "empty_input";
/// Outcome label for a failed prediction
pub const OUTCOME_FAILURE: &str = "failure";

/// Total number of prediction requests, labeled by outcome.
pub static PREDICTIONS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "sentiment_api_predictions_total",
        "Total number of prediction requests, labeled by outcome",
        &["outcome"]
    )
    .expect("Failed to create sentiment_api_predictions_total counter vec")
});

/// Histogram for prediction durations in seconds.
pub static PREDICTION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "sentiment_api_prediction_duration_seconds",
        "Prediction durations in seconds, labeled by outcome",
        &["outcome"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to create prediction duration histogram")
});

/// 1 while the fallback model is serving, 0 on the preferred model.
pub static FALLBACK_MODEL_ACTIVE: LazyLock<IntGauge> = LazyLock::new(|| {
    register_int_gauge!(
        "sentiment_api_fallback_model_active",
        "Whether the fallback sentiment model is serving (1) or the preferred one (0)"
    )
    .expect("Failed to create fallback model gauge")
});

/// Metric label for a prediction outcome
pub fn outcome_label(outcome: Result<(), &InferenceError>) -> &'static str {
    match outcome {
        Ok(()) => OUTCOME_SUCCESS,
        Err(InferenceError::EmptyInput) => OUTCOME_EMPTY_INPUT,
        Err(InferenceError::PredictionFailure(_)) => OUTCOME_FAILURE,
    }
}

/// Record one prediction
///
/// # Arguments
/// * `outcome` - One of the `OUTCOME_*` labels
/// * `duration_secs` - Time spent producing the result, in seconds
pub fn observe_prediction(outcome: &str, duration_secs: f64) {
    PREDICTIONS.with_label_values(&[outcome]).inc();
    PREDICTION_DURATION
        .with_label_values(&[outcome])
        .observe(duration_secs);
}

/// Record which model the process is serving
pub fn set_fallback_model_active(active: bool) {
    FALLBACK_MODEL_ACTIVE.set(i64::from(active));
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels() {
        assert_eq!(outcome_label(Ok(())), OUTCOME_SUCCESS);
        assert_eq!(
            outcome_label(Err(&InferenceError::EmptyInput)),
            OUTCOME_EMPTY_INPUT
        );
        assert_eq!(
            outcome_label(Err(&InferenceError::prediction("boom"))),
            OUTCOME_FAILURE
        );
    }

    #[test]
    fn predictions_are_counted() {
        let before = PREDICTIONS.with_label_values(&[OUTCOME_SUCCESS]).get();
        observe_prediction(OUTCOME_SUCCESS, 0.02);
        assert!(PREDICTIONS.with_label_values(&[OUTCOME_SUCCESS]).get() > before);
    }

    #[tokio::test]
    async fn metrics_are_exported() {
        set_fallback_model_active(true);
        observe_prediction(OUTCOME_FAILURE, 0.1);

        let response = metrics_handler().await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let text = String::from_utf8(body.to_vec()).expect("metrics should be UTF-8");

        assert!(text.contains("sentiment_api_predictions_total"));
        assert!(text.contains("sentiment_api_prediction_duration_seconds"));
        assert!(text.contains("sentiment_api_fallback_model_active"));
    }
}
