// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! This module provides error types for server operations, including HTTP
//! response mapping for the two request-scoped inference outcomes.

use std::net::SocketAddr;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sentiment_classifier::{InferenceError, LoadError};
use thiserror::Error;

/// Error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Task join errors for async operations
    #[error("Task join error: {source}")]
    TaskJoin {
        /// Underlying tokio join error
        #[source]
        source: tokio::task::JoinError,
    },

    /// Neither sentiment model could be loaded at startup
    #[error(transparent)]
    ModelLoad(#[from] LoadError),

    /// A prediction request could not be served
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, json_body) = match &self {
            // The prediction contract is exactly `{"error": message}`
            ServerError::Inference(err) => {
                let status = if err.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, serde_json::json!({ "error": err.to_string() }))
            }
            ServerError::Config { .. }
            | ServerError::Bind { .. }
            | ServerError::Startup { .. }
            | ServerError::Shutdown { .. }
            | ServerError::TaskJoin { .. }
            | ServerError::ModelLoad(..) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "error": self.to_string(),
                    "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16()
                }),
            ),
        };

        let body = Json(json_body);
        (status, body).into_response()
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(source: tokio::task::JoinError) -> Self {
        Self::TaskJoin { source }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[tokio::test]
    async fn empty_input_is_bad_request() {
        let response = ServerError::from(InferenceError::EmptyInput).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Empty input text" })
        );
    }

    #[tokio::test]
    async fn prediction_failure_is_server_error() {
        let response =
            ServerError::from(InferenceError::prediction("tensor shape mismatch")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Prediction failed: tensor shape mismatch" })
        );
    }

    #[tokio::test]
    async fn operational_errors_carry_status() {
        let response = ServerError::Config {
            message: "bad port".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["status"], 500);
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|message| message.contains("bad port"))
        );
    }
}
