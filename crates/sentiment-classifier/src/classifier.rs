// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Classifier abstraction and the process-wide handle

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::error::ClassifierResult;

/// One label with the probability the model assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// Label as named by the model's configuration
    pub label: String,
    /// Probability in `[0, 1]`
    pub score: f32,
}

impl LabelScore {
    /// Create a new label/score pair
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A pretrained text classifier
///
/// Implementations must be safe to call concurrently through `&self`.
pub trait TextClassifier: Send + Sync + fmt::Debug {
    /// Identifier of the loaded model
    fn model_id(&self) -> &str;

    /// Classify one text, returning every label ordered by descending score
    fn classify(&self, text: &str) -> ClassifierResult<Vec<LabelScore>>;
}

/// Which configured model ended up loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSource {
    /// The preferred model
    Primary,
    /// The fallback model, after the preferred one failed
    Fallback,
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Primary => write!(f, "primary"),
            ModelSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Shared, read-only reference to the one classifier loaded at startup
///
/// Cloning is cheap; every clone refers to the same model instance.
#[derive(Debug, Clone)]
pub struct ClassifierHandle {
    classifier: Arc<dyn TextClassifier>,
    source: ModelSource,
}

impl ClassifierHandle {
    /// Wrap a loaded classifier
    pub fn new(classifier: Arc<dyn TextClassifier>, source: ModelSource) -> Self {
        Self { classifier, source }
    }

    /// The underlying classifier
    pub fn classifier(&self) -> &dyn TextClassifier {
        self.classifier.as_ref()
    }

    /// Identifier of the loaded model
    pub fn model_id(&self) -> &str {
        self.classifier.model_id()
    }

    /// Whether the preferred or the fallback model is loaded
    pub fn source(&self) -> ModelSource {
        self.source
    }

    /// Whether the service is running on the fallback model
    pub fn is_fallback(&self) -> bool {
        self.source == ModelSource::Fallback
    }
}
