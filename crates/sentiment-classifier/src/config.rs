// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Model configuration
//!
//! Describes which pretrained models the loader should try and on which
//! compute device. Defaults name the preferred Twitter-RoBERTa sentiment model
//! and the stock DistilBERT SST-2 model as the fallback.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Preferred sentiment model
pub const DEFAULT_PRIMARY_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";

/// Tokenizer repository for the preferred model, which ships no `tokenizer.json`
pub const DEFAULT_PRIMARY_TOKENIZER: &str = "FacebookAI/roberta-base";

/// Generic sentiment model used when the preferred one fails to load
pub const DEFAULT_FALLBACK_MODEL: &str = "distilbert/distilbert-base-uncased-finetuned-sst-2-english";

/// Maximum token length configured on the preferred model
pub const DEFAULT_MAX_LENGTH: usize = 512;

const DEFAULT_REVISION: &str = "main";

/// One loadable model on the Hugging Face Hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Hub repository id holding `config.json` and the weights
    pub repo_id: String,
    /// Git revision of the repository
    #[serde(default = "default_revision")]
    pub revision: String,
    /// Repository to take the tokenizer from, if not `repo_id`
    #[serde(default)]
    pub tokenizer_repo: Option<String>,
    /// Git revision of `tokenizer_repo`
    ///
    /// Defaults to `main` for a separate tokenizer repository and to
    /// `revision` otherwise.
    #[serde(default)]
    pub tokenizer_revision: Option<String>,
    /// Token limit; when set, inputs are truncated to this many tokens
    #[serde(default)]
    pub max_length: Option<usize>,
}

impl ModelSpec {
    /// Create a spec for `repo_id` at the `main` revision with no truncation
    pub fn new(repo_id: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            revision: default_revision(),
            tokenizer_repo: None,
            tokenizer_revision: None,
            max_length: None,
        }
    }

    /// Take the tokenizer from another repository
    #[must_use]
    pub fn with_tokenizer_repo(mut self, repo: impl Into<String>) -> Self {
        self.tokenizer_repo = Some(repo.into());
        self
    }

    /// Pin the revision of the tokenizer repository
    #[must_use]
    pub fn with_tokenizer_revision(mut self, revision: impl Into<String>) -> Self {
        self.tokenizer_revision = Some(revision.into());
        self
    }

    /// Enable truncation at `max_length` tokens
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Pin a repository revision
    #[must_use]
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// The preferred sentiment model, truncating at 512 tokens
    pub fn default_primary() -> Self {
        Self::new(DEFAULT_PRIMARY_MODEL)
            .with_tokenizer_repo(DEFAULT_PRIMARY_TOKENIZER)
            .with_max_length(DEFAULT_MAX_LENGTH)
    }

    /// The generic fallback model, with no explicit length configuration
    pub fn default_fallback() -> Self {
        Self::new(DEFAULT_FALLBACK_MODEL)
    }

    /// Repository the tokenizer is loaded from
    pub fn tokenizer_repo(&self) -> &str {
        self.tokenizer_repo.as_deref().unwrap_or(&self.repo_id)
    }

    /// Revision the tokenizer is loaded at
    ///
    /// A pinned model revision only applies to `repo_id`; a separate tokenizer
    /// repository is read at `main` unless pinned on its own.
    pub fn tokenizer_revision(&self) -> &str {
        match (&self.tokenizer_revision, &self.tokenizer_repo) {
            (Some(revision), _) => revision,
            (None, Some(_)) => DEFAULT_REVISION,
            (None, None) => &self.revision,
        }
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repo_id, self.revision)
    }
}

fn default_revision() -> String {
    DEFAULT_REVISION.to_string()
}

/// Compute device for model execution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// CPU execution
    #[default]
    Cpu,
    /// First CUDA GPU
    Cuda,
    /// Apple Metal GPU
    Metal,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Cpu => write!(f, "cpu"),
            DeviceKind::Cuda => write!(f, "cuda"),
            DeviceKind::Metal => write!(f, "metal"),
        }
    }
}

/// Models the loader tries, in order, and where they run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Preferred model
    #[serde(default = "ModelSpec::default_primary")]
    pub primary: ModelSpec,
    /// Model used when the preferred one fails to load
    #[serde(default = "ModelSpec::default_fallback")]
    pub fallback: ModelSpec,
    /// Compute device
    #[serde(default)]
    pub device: DeviceKind,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            primary: ModelSpec::default_primary(),
            fallback: ModelSpec::default_fallback(),
            device: DeviceKind::default(),
        }
    }
}
