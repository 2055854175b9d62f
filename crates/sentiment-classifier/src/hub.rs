// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Hugging Face Hub downloads
//!
//! Fetches the files a sequence classifier needs into the standard Hugging Face
//! cache (`HF_HOME`, `~/.cache/huggingface/hub` by default). Calls block on
//! network I/O and belong on a blocking thread.

use std::path::PathBuf;

use hf_hub::{
    Repo, RepoType,
    api::sync::{Api, ApiRepo},
};
use tracing::{debug, info, instrument};

use crate::{
    config::ModelSpec,
    error::{ClassifierError, ClassifierResult},
};

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const VOCAB_FILE: &str = "vocab.txt";
const SAFETENSORS_FILE: &str = "model.safetensors";
const PYTORCH_FILE: &str = "pytorch_model.bin";

/// Where the tokenizer definition was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerSource {
    /// Serialized `tokenizer.json`
    Json(PathBuf),
    /// WordPiece vocabulary, one token per line
    Vocab(PathBuf),
}

/// Weight file format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightsFile {
    /// `model.safetensors`
    SafeTensors(PathBuf),
    /// `pytorch_model.bin`
    Pytorch(PathBuf),
}

/// Local paths of one model's downloaded files
#[derive(Debug, Clone)]
pub struct ModelFiles {
    /// `config.json`
    pub config: PathBuf,
    /// Tokenizer definition
    pub tokenizer: TokenizerSource,
    /// Model weights
    pub weights: WeightsFile,
}

/// Download everything `spec` needs
#[instrument(skip_all, fields(model = %spec))]
pub fn download_model(spec: &ModelSpec) -> ClassifierResult<ModelFiles> {
    let api = Api::new().map_err(|e| {
        ClassifierError::download(format!("failed to initialize Hugging Face Hub API: {e}"))
    })?;

    let repo = api.repo(Repo::with_revision(
        spec.repo_id.clone(),
        RepoType::Model,
        spec.revision.clone(),
    ));

    let config = fetch(&repo, &spec.repo_id, CONFIG_FILE)?;

    let tokenizer_repo = api.repo(Repo::with_revision(
        spec.tokenizer_repo().to_string(),
        RepoType::Model,
        spec.tokenizer_revision().to_string(),
    ));
    let tokenizer = match tokenizer_repo.get(TOKENIZER_FILE) {
        Ok(path) => TokenizerSource::Json(path),
        Err(e) => {
            debug!(
                repo = spec.tokenizer_repo(),
                error = %e,
                "no tokenizer.json, trying vocab.txt"
            );
            TokenizerSource::Vocab(fetch(&tokenizer_repo, spec.tokenizer_repo(), VOCAB_FILE)?)
        }
    };

    let weights = match repo.get(SAFETENSORS_FILE) {
        Ok(path) => WeightsFile::SafeTensors(path),
        Err(e) => {
            debug!(error = %e, "no model.safetensors, trying pytorch_model.bin");
            WeightsFile::Pytorch(fetch(&repo, &spec.repo_id, PYTORCH_FILE)?)
        }
    };

    info!(repo = %spec.repo_id, "model files available");

    Ok(ModelFiles {
        config,
        tokenizer,
        weights,
    })
}

fn fetch(repo: &ApiRepo, repo_id: &str, filename: &str) -> ClassifierResult<PathBuf> {
    repo.get(filename).map_err(|e| {
        ClassifierError::download(format!(
            "failed to download '{filename}' from '{repo_id}': {e}"
        ))
    })
}
