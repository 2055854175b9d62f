// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use candle_core::{Device, IndexOp, Module};
use candle_nn::{Linear, VarBuilder, linear};
use candle_transformers::models::distilbert::{Config, DistilBertModel};
use tokenizers::Tokenizer;

use super::{encode, rank_logits};
use crate::{
    classifier::{LabelScore, TextClassifier},
    error::{ClassifierError, ClassifierResult},
};

/// DistilBERT checkpoint with `pre_classifier` and linear classification head
pub struct DistilBertSentimentClassifier {
    model_id: String,
    distilbert: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

impl DistilBertSentimentClassifier {
    /// Build the model from a parsed checkpoint
    pub fn load(
        model_id: String,
        raw_config: &str,
        hidden_size: usize,
        vb: VarBuilder<'_>,
        tokenizer: Tokenizer,
        labels: Vec<String>,
        device: Device,
    ) -> ClassifierResult<Self> {
        let config: Config = serde_json::from_str(raw_config).map_err(|e| {
            ClassifierError::config(format!("invalid distilbert config for '{model_id}': {e}"))
        })?;

        let distilbert = DistilBertModel::load(vb.pp("distilbert"), &config)?;
        let pre_classifier = linear(hidden_size, hidden_size, vb.pp("pre_classifier"))?;
        let classifier = linear(hidden_size, labels.len(), vb.pp("classifier"))?;

        Ok(Self {
            model_id,
            distilbert,
            pre_classifier,
            classifier,
            tokenizer,
            labels,
            device,
        })
    }
}

impl TextClassifier for DistilBertSentimentClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn classify(&self, text: &str) -> ClassifierResult<Vec<LabelScore>> {
        let input = encode(&self.tokenizer, text, &self.device)?;

        // candle's DistilBERT masks positions where the mask is 1
        let padding_mask = input.attention_mask.eq(0u32)?;
        let hidden = self.distilbert.forward(&input.input_ids, &padding_mask)?;

        let cls = hidden.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&cls)?.relu()?;
        let logits = self.classifier.forward(&pooled)?;

        rank_logits(&logits, &self.labels)
    }
}

impl fmt::Debug for DistilBertSentimentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistilBertSentimentClassifier")
            .field("model_id", &self.model_id)
            .field("labels", &self.labels)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}
