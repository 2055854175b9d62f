// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Startup model loading
//!
//! [`load_classifier`] runs once before the server starts. It tries the
//! preferred model and, if that fails for any reason, the fallback model. The
//! result is the only [`ClassifierHandle`] the process will ever hold.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::{
    classifier::{ClassifierHandle, ModelSource, TextClassifier},
    config::{ClassifierConfig, DeviceKind, ModelSpec},
    error::{ClassifierResult, LoadError},
    hub::download_model,
    models::load_sequence_classifier,
};

/// Builds a ready-to-use classifier from a model spec
#[cfg_attr(test, mockall::automock)]
pub trait ModelProvider: Send + Sync {
    /// Load the model `spec` describes
    fn load(&self, spec: &ModelSpec) -> ClassifierResult<Arc<dyn TextClassifier>>;
}

/// Downloads models from the Hugging Face Hub and runs them with candle
#[derive(Debug, Clone, Copy, Default)]
pub struct HubModelProvider {
    device: DeviceKind,
}

impl HubModelProvider {
    /// Create a provider that places models on `device`
    pub fn new(device: DeviceKind) -> Self {
        Self { device }
    }
}

impl ModelProvider for HubModelProvider {
    #[instrument(skip_all, fields(model = %spec, device = %self.device))]
    fn load(&self, spec: &ModelSpec) -> ClassifierResult<Arc<dyn TextClassifier>> {
        let files = download_model(spec)?;
        load_sequence_classifier(spec, &files, self.device)
    }
}

/// Load the preferred model, falling back to the secondary one on failure
///
/// Blocks until a model is ready. Errors only when both models fail.
#[instrument(skip_all, fields(primary = %config.primary, fallback = %config.fallback))]
pub fn load_classifier<P: ModelProvider + ?Sized>(
    provider: &P,
    config: &ClassifierConfig,
) -> Result<ClassifierHandle, LoadError> {
    let primary_error = match provider.load(&config.primary) {
        Ok(classifier) => {
            info!(model = %config.primary.repo_id, "loaded primary sentiment model");
            return Ok(ClassifierHandle::new(classifier, ModelSource::Primary));
        }
        Err(e) => e,
    };

    warn!(
        model = %config.primary.repo_id,
        error = %primary_error,
        fallback = %config.fallback.repo_id,
        "failed to load primary sentiment model, using fallback"
    );

    match provider.load(&config.fallback) {
        Ok(classifier) => {
            info!(model = %config.fallback.repo_id, "loaded fallback sentiment model");
            Ok(ClassifierHandle::new(classifier, ModelSource::Fallback))
        }
        Err(fallback_error) => {
            error!(
                model = %config.fallback.repo_id,
                error = %fallback_error,
                "failed to load fallback sentiment model"
            );
            Err(LoadError {
                primary_model: config.primary.repo_id.clone(),
                primary_error,
                fallback_model: config.fallback.repo_id.clone(),
                fallback_error,
            })
        }
    }
}
