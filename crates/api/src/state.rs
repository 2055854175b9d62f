// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the sentiment API server:
//! configuration and the classifier loaded at startup.

use sentiment_classifier::{ClassifierHandle, ModelSource};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{Environment, ServerConfig};

/// Shared application state
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// The one classifier every request shares
    classifier: ClassifierHandle,
}

impl ServerState {
    /// Create new server state
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `classifier` - Classifier loaded at startup
    pub fn new(config: ServerConfig, classifier: ClassifierHandle) -> Self {
        Self { config, classifier }
    }

    /// The loaded classifier
    pub fn classifier(&self) -> &ClassifierHandle {
        &self.classifier
    }

    /// Report service health
    ///
    /// Serving from the fallback model is reported as degraded.
    pub fn health_check(&self) -> HealthCheck {
        let status = match self.classifier.source() {
            ModelSource::Primary => HealthStatus::Up,
            ModelSource::Fallback => HealthStatus::Degraded {
                reason: format!(
                    "serving fallback model '{}', preferred model failed to load",
                    self.classifier.model_id()
                )
                .into_boxed_str(),
            },
        };

        HealthCheck {
            status,
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            model: ModelInfo {
                id: Box::from(self.classifier.model_id()),
                source: self.classifier.source(),
            },
        }
    }
}

/// Health status of the service
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum HealthStatus {
    /// Service is fully operational and responding normally
    Up,

    /// Service is operational but running with reduced capability
    Degraded {
        /// Human-readable explanation of the degradation condition
        reason: Box<str>,
    },
}

/// The model answering predictions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ModelInfo {
    /// Hub repository id of the loaded model
    #[schema(example = "cardiffnlp/twitter-roberta-base-sentiment-latest")]
    pub id: Box<str>,
    /// Whether the preferred or the fallback model is loaded
    #[schema(value_type = String, example = "primary")]
    pub source: ModelSource,
}

/// Health check status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Loaded model
    pub model: ModelInfo,
}
