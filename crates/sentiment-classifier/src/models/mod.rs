// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Candle-backed sequence classification models
//!
//! A model's `config.json` decides which implementation is built:
//! `roberta`/`xlm-roberta` checkpoints use [`RobertaSentimentClassifier`],
//! `bert` checkpoints use [`BertSentimentClassifier`] and `distilbert`
//! checkpoints use [`DistilBertSentimentClassifier`]. Labels always come from
//! the checkpoint's own `id2label` table.

mod bert;
mod distilbert;
mod roberta;

use std::{collections::HashMap, fmt, path::Path, sync::Arc};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use serde::Deserialize;
use tokenizers::{
    Model, Tokenizer, TruncationParams,
    models::wordpiece::WordPiece,
    normalizers::BertNormalizer,
    pre_tokenizers::bert::BertPreTokenizer,
    processors::bert::BertProcessing,
};
use tracing::{debug, info};

pub use bert::BertSentimentClassifier;
pub use distilbert::DistilBertSentimentClassifier;
pub use roberta::RobertaSentimentClassifier;

use crate::{
    classifier::{LabelScore, TextClassifier},
    config::{DeviceKind, ModelSpec},
    error::{ClassifierError, ClassifierResult},
    hub::{ModelFiles, TokenizerSource, WeightsFile},
};

/// Supported checkpoint architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    /// RoBERTa and XLM-RoBERTa
    Roberta,
    /// BERT
    Bert,
    /// DistilBERT
    DistilBert,
}

impl Architecture {
    /// Map a `config.json` `model_type` onto a supported architecture
    pub fn from_model_type(model_type: &str) -> ClassifierResult<Self> {
        match model_type {
            "roberta" | "xlm-roberta" => Ok(Self::Roberta),
            "bert" => Ok(Self::Bert),
            "distilbert" => Ok(Self::DistilBert),
            other => Err(ClassifierError::config(format!(
                "unsupported model_type '{other}', expected one of roberta, xlm-roberta, bert, distilbert"
            ))),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::Roberta => write!(f, "roberta"),
            Architecture::Bert => write!(f, "bert"),
            Architecture::DistilBert => write!(f, "distilbert"),
        }
    }
}

/// The parts of a Hugging Face `config.json` shared by every architecture
#[derive(Debug, Clone, Deserialize)]
pub struct CheckpointConfig {
    /// Architecture family
    pub model_type: String,
    /// Hidden state width (`dim` in DistilBERT configs)
    #[serde(alias = "dim")]
    pub hidden_size: usize,
    /// Class index → label name
    #[serde(default)]
    pub id2label: HashMap<String, String>,
}

impl CheckpointConfig {
    /// Parse the shared fields out of raw `config.json` text
    pub fn from_json(raw: &str) -> ClassifierResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Labels ordered by class index
    ///
    /// Indices missing from `id2label` are named `label_<index>`.
    pub fn labels(&self) -> ClassifierResult<Vec<String>> {
        let mut indexed = Vec::with_capacity(self.id2label.len());
        for (id, label) in &self.id2label {
            let index: usize = id.parse().map_err(|_| {
                ClassifierError::config(format!("id2label key '{id}' is not a class index"))
            })?;
            indexed.push((index, label));
        }

        let Some(num_labels) = indexed.iter().map(|(index, _)| index + 1).max() else {
            return Err(ClassifierError::config(
                "config.json has no id2label entries",
            ));
        };

        let mut labels: Vec<String> = (0..num_labels).map(|i| format!("label_{i}")).collect();
        for (index, label) in indexed {
            labels[index].clone_from(label);
        }
        Ok(labels)
    }
}

/// Build the classifier described by `files`
pub fn load_sequence_classifier(
    spec: &ModelSpec,
    files: &ModelFiles,
    device_kind: DeviceKind,
) -> ClassifierResult<Arc<dyn TextClassifier>> {
    let raw_config = std::fs::read_to_string(&files.config)?;
    let checkpoint = CheckpointConfig::from_json(&raw_config)?;
    let architecture = Architecture::from_model_type(&checkpoint.model_type)?;
    let labels = checkpoint.labels()?;

    let device = select_device(device_kind)?;
    let tokenizer = load_tokenizer(&files.tokenizer, spec.max_length)?;
    let vb = load_var_builder(&files.weights, &device)?;

    info!(
        model = %spec.repo_id,
        %architecture,
        labels = ?labels,
        device = %device_kind,
        max_length = ?spec.max_length,
        "building sequence classifier"
    );

    let classifier: Arc<dyn TextClassifier> = match architecture {
        Architecture::Roberta => Arc::new(RobertaSentimentClassifier::load(
            spec.repo_id.clone(),
            &raw_config,
            vb,
            tokenizer,
            labels,
            device,
        )?),
        Architecture::Bert => Arc::new(BertSentimentClassifier::load(
            spec.repo_id.clone(),
            &raw_config,
            checkpoint.hidden_size,
            vb,
            tokenizer,
            labels,
            device,
        )?),
        Architecture::DistilBert => Arc::new(DistilBertSentimentClassifier::load(
            spec.repo_id.clone(),
            &raw_config,
            checkpoint.hidden_size,
            vb,
            tokenizer,
            labels,
            device,
        )?),
    };

    Ok(classifier)
}

/// Initialize the requested compute device
pub fn select_device(kind: DeviceKind) -> ClassifierResult<Device> {
    match kind {
        DeviceKind::Cpu => Ok(Device::Cpu),
        DeviceKind::Cuda => Device::new_cuda(0)
            .map_err(|e| ClassifierError::device(format!("failed to initialize CUDA: {e}"))),
        DeviceKind::Metal => Device::new_metal(0)
            .map_err(|e| ClassifierError::device(format!("failed to initialize Metal: {e}"))),
    }
}

/// Load a tokenizer, enabling truncation when `max_length` is set
pub fn load_tokenizer(
    source: &TokenizerSource,
    max_length: Option<usize>,
) -> ClassifierResult<Tokenizer> {
    let mut tokenizer = match source {
        TokenizerSource::Json(path) => {
            debug!(path = %path.display(), "loading tokenizer.json");
            Tokenizer::from_file(path).map_err(|e| {
                ClassifierError::tokenizer(format!(
                    "failed to load tokenizer from '{}': {e}",
                    path.display()
                ))
            })?
        }
        TokenizerSource::Vocab(path) => {
            debug!(path = %path.display(), "building WordPiece tokenizer from vocab.txt");
            wordpiece_tokenizer(path)?
        }
    };

    if let Some(max_length) = max_length {
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| {
                ClassifierError::tokenizer(format!("failed to enable truncation: {e}"))
            })?;
    }

    Ok(tokenizer)
}

fn wordpiece_tokenizer(vocab: &Path) -> ClassifierResult<Tokenizer> {
    let wordpiece = WordPiece::from_file(&vocab.to_string_lossy())
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(|e| ClassifierError::tokenizer(format!("failed to build WordPiece model: {e}")))?;

    let special = |token: &str| {
        wordpiece.token_to_id(token).ok_or_else(|| {
            ClassifierError::tokenizer(format!("vocabulary has no '{token}' token"))
        })
    };
    let sep = ("[SEP]".to_string(), special("[SEP]")?);
    let cls = ("[CLS]".to_string(), special("[CLS]")?);

    let mut tokenizer = Tokenizer::new(wordpiece);
    tokenizer.with_normalizer(Some(BertNormalizer::default()));
    tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));
    tokenizer.with_post_processor(Some(BertProcessing::new(sep, cls)));

    Ok(tokenizer)
}

fn load_var_builder(weights: &WeightsFile, device: &Device) -> ClassifierResult<VarBuilder<'static>> {
    let vb = match weights {
        WeightsFile::SafeTensors(path) => {
            let data = std::fs::read(path)?;
            VarBuilder::from_buffered_safetensors(data, DType::F32, device)?
        }
        WeightsFile::Pytorch(path) => VarBuilder::from_pth(path, DType::F32, device)?,
    };
    Ok(vb)
}

/// Encoded single-sequence model inputs, each shaped `(1, seq_len)`
struct EncodedInput {
    input_ids: Tensor,
    attention_mask: Tensor,
    token_type_ids: Tensor,
}

fn encode(tokenizer: &Tokenizer, text: &str, device: &Device) -> ClassifierResult<EncodedInput> {
    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| ClassifierError::tokenizer(format!("tokenization failed: {e}")))?;

    Ok(EncodedInput {
        input_ids: Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?,
        attention_mask: Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?,
        token_type_ids: Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?,
    })
}

/// Turn `(1, num_labels)` logits into labels ranked by probability
fn rank_logits(logits: &Tensor, labels: &[String]) -> ClassifierResult<Vec<LabelScore>> {
    let probs = candle_nn::ops::softmax_last_dim(logits)?
        .squeeze(0)?
        .to_vec1::<f32>()?;
    rank_labels(&probs, labels)
}

fn rank_labels(probs: &[f32], labels: &[String]) -> ClassifierResult<Vec<LabelScore>> {
    if probs.len() != labels.len() {
        return Err(ClassifierError::invalid_output(format!(
            "model produced {} scores for {} labels",
            probs.len(),
            labels.len()
        )));
    }

    let mut ranked: Vec<LabelScore> = labels
        .iter()
        .zip(probs)
        .map(|(label, &score)| LabelScore::new(label.clone(), score))
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}
