// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Pretrained sentiment classification
//!
//! This crate owns the inference-serving core of the sentiment API: loading a
//! pretrained text-classification model once at startup (with a fallback model
//! when the preferred one cannot be loaded) and turning one request's raw JSON
//! payload into a sentiment label and confidence score.
//!
//! # Architecture
//!
//! - [`classifier`]: the [`TextClassifier`] trait and the shared [`ClassifierHandle`]
//! - [`config`]: model specifications for the primary and fallback models
//! - [`hub`]: Hugging Face Hub downloads for config, tokenizer and weights
//! - [`models`]: candle-backed RoBERTa, BERT and DistilBERT sequence classifiers
//! - [`loader`]: startup model loading with fallback
//! - [`inference`]: per-request normalization, invocation and result shaping
//! - [`error`]: error types for loading and inference
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use sentiment_classifier::{ClassifierConfig, HubModelProvider, infer, load_classifier};
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClassifierConfig::default();
//! let provider = HubModelProvider::new(config.device);
//!
//! // Slow: downloads model artifacts on first use
//! let handle = load_classifier(&provider, &config)?;
//!
//! let result = infer(&handle, &json!({ "text": "I love this!" }))?;
//! println!("{} ({})", result.sentiment, result.confidence);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod hub;
pub mod inference;
pub mod loader;
pub mod models;

pub use classifier::{ClassifierHandle, LabelScore, ModelSource, TextClassifier};
pub use config::{ClassifierConfig, DeviceKind, ModelSpec};
pub use error::{ClassifierError, ClassifierResult, InferenceError, LoadError};
pub use inference::{InferenceResult, MAX_INPUT_CHARS, infer};
pub use loader::{HubModelProvider, ModelProvider, load_classifier};
