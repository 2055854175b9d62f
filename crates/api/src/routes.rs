// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration and handlers for the sentiment API server.

pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use handlers::{health_handler, index_handler, predict_handler};

use crate::{
    metrics::metrics_handler,
    openapi::{openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes
pub fn create_routes() -> Router<ServerState> {
    let monitoring_routes = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    let docs_routes = Router::new()
        .route("/api-doc/openapi.json", get(openapi_spec))
        .route("/swagger-ui", get(swagger_ui));

    let api_routes = Router::new().route("/predict", post(predict_handler));

    Router::new()
        .merge(monitoring_routes)
        .merge(docs_routes)
        .merge(api_routes)
}
