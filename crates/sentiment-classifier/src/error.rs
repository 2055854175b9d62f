// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for sentiment classification
//!
//! Three layers of errors live here:
//!
//! - [`ClassifierError`]: anything that goes wrong while provisioning or running a model
//! - [`InferenceError`]: the two request-scoped outcomes reported to callers
//! - [`LoadError`]: the fatal startup condition where neither model could be loaded

use thiserror::Error;

/// Result type alias for model operations
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Errors raised while downloading, building or running a classifier
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Model artifact could not be fetched from the hub
    #[error("Download error: {message}")]
    Download {
        /// Error message
        message: String,
    },

    /// Tokenizer could not be loaded or failed to encode input
    #[error("Tokenizer error: {message}")]
    Tokenizer {
        /// Error message
        message: String,
    },

    /// Model configuration is missing, malformed or unsupported
    #[error("Model configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Compute device could not be initialized
    #[error("Device error: {message}")]
    Device {
        /// Error message
        message: String,
    },

    /// Tensor runtime failure while loading weights or running a forward pass
    #[error("Model runtime error: {0}")]
    Runtime(#[from] candle_core::Error),

    /// Model produced output that cannot be interpreted
    #[error("Invalid model output: {message}")]
    InvalidOutput {
        /// Error message
        message: String,
    },

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClassifierError {
    /// Create a download error
    pub fn download<T: ToString>(message: T) -> Self {
        Self::Download {
            message: message.to_string(),
        }
    }

    /// Create a tokenizer error
    pub fn tokenizer<T: ToString>(message: T) -> Self {
        Self::Tokenizer {
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config<T: ToString>(message: T) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    /// Create a device error
    pub fn device<T: ToString>(message: T) -> Self {
        Self::Device {
            message: message.to_string(),
        }
    }

    /// Create an invalid output error
    pub fn invalid_output<T: ToString>(message: T) -> Self {
        Self::InvalidOutput {
            message: message.to_string(),
        }
    }
}

/// Request-scoped inference outcomes other than success
///
/// The display text of each variant is exactly the message returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// No usable text after trimming whitespace
    #[error("Empty input text")]
    EmptyInput,

    /// Anything else that went wrong while producing a result
    #[error("Prediction failed: {0}")]
    PredictionFailure(String),
}

impl InferenceError {
    /// Create a prediction failure from any displayable cause
    pub fn prediction<T: ToString>(cause: T) -> Self {
        Self::PredictionFailure(cause.to_string())
    }

    /// Whether the caller is at fault (as opposed to the service)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}

/// Neither the primary nor the fallback model could be loaded
#[derive(Debug, Error)]
#[error(
    "failed to load any sentiment model: primary '{primary_model}': {primary_error}; \
     fallback '{fallback_model}': {fallback_error}"
)]
pub struct LoadError {
    /// Repository id of the preferred model
    pub primary_model: String,
    /// Why the preferred model failed
    pub primary_error: ClassifierError,
    /// Repository id of the fallback model
    pub fallback_model: String,
    /// Why the fallback model failed
    pub fallback_error: ClassifierError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_error_messages() {
        assert_eq!(InferenceError::EmptyInput.to_string(), "Empty input text");
        assert_eq!(
            InferenceError::prediction("out of memory").to_string(),
            "Prediction failed: out of memory"
        );
    }

    #[test]
    fn inference_error_classification() {
        assert!(InferenceError::EmptyInput.is_client_error());
        assert!(!InferenceError::prediction("boom").is_client_error());
    }

    #[test]
    fn classifier_error_constructors() {
        let err = ClassifierError::download("network unreachable");
        assert!(matches!(err, ClassifierError::Download { .. }));
        assert!(err.to_string().contains("network unreachable"));

        let err = ClassifierError::config("unsupported model_type 'gpt2'");
        assert!(matches!(err, ClassifierError::Configuration { .. }));

        let err = ClassifierError::invalid_output("no labels");
        assert_eq!(err.to_string(), "Invalid model output: no labels");
    }

    #[test]
    fn load_error_names_both_causes() {
        let err = LoadError {
            primary_model: "org/primary".to_string(),
            primary_error: ClassifierError::download("timeout"),
            fallback_model: "org/fallback".to_string(),
            fallback_error: ClassifierError::config("bad config"),
        };

        let message = err.to_string();
        assert!(message.contains("org/primary"));
        assert!(message.contains("timeout"));
        assert!(message.contains("org/fallback"));
        assert!(message.contains("bad config"));
    }
}
