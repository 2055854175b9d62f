// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Sentiment API Server Implementation
//!
//! This crate provides the HTTP server for the sentiment classification service, built
//! with Axum around a single pretrained classifier loaded before the server starts.
//!
//! # Module Structure
//!
//! - [`config`]: Server configuration and environment management with hierarchical loading
//! - [`error`]: Error types and HTTP response mapping with proper status codes
//! - [`extractors`]: JSON body extraction with descriptive rejection messages
//! - [`state`]: Shared application state holding the loaded classifier
//! - [`server`]: Main server implementation, lifecycle, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`metrics`]: Prometheus metrics and the `/metrics` exporter
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints for API documentation
//!
//! # Endpoints
//!
//! - `GET /`: plain-text readiness message
//! - `POST /predict`: sentiment of `{"text": ...}`
//! - `GET /health`: health report, `Degraded` while the fallback model is serving
//! - `GET /metrics`: Prometheus exposition
//! - `GET /api-doc/openapi.json`, `GET /swagger-ui`: API documentation

pub mod config;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::Server;
pub use state::{HealthCheck, HealthStatus, ServerState};
