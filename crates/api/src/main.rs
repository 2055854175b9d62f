// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Sentiment API Server
//!
//! Loads a pretrained sentiment model, then serves predictions over HTTP.

use anyhow::Result;
use api::{Server, ServerConfig, ServerError};
use sentiment_classifier::{HubModelProvider, load_classifier};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    info!(
        primary = %config.model.primary,
        fallback = %config.model.fallback,
        device = %config.model.device,
        "loading sentiment model"
    );

    // Model download and weight loading block, keep them off the runtime workers
    let model_config = config.model.clone();
    let classifier = tokio::task::spawn_blocking(move || {
        let provider = HubModelProvider::new(model_config.device);
        load_classifier(&provider, &model_config)
    })
    .await
    .map_err(ServerError::from)?
    .map_err(|e| {
        error!(error = %e, "no sentiment model could be loaded, refusing to serve");
        ServerError::from(e)
    })?;

    let server = Server::new(config, classifier)?;

    // NOTE: the `#[tokio::main]` task does not run a worker future, we must spawn
    tokio::spawn(async move { server.run().await }).await??;

    Ok(())
}
