// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use candle_core::Device;
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{Config, XLMRobertaForSequenceClassification};
use tokenizers::Tokenizer;

use super::{encode, rank_logits};
use crate::{
    classifier::{LabelScore, TextClassifier},
    error::{ClassifierError, ClassifierResult},
};

/// RoBERTa-family checkpoint with a sequence classification head
pub struct RobertaSentimentClassifier {
    model_id: String,
    model: XLMRobertaForSequenceClassification,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

impl RobertaSentimentClassifier {
    /// Build the model from a parsed checkpoint
    pub fn load(
        model_id: String,
        raw_config: &str,
        vb: VarBuilder<'_>,
        tokenizer: Tokenizer,
        labels: Vec<String>,
        device: Device,
    ) -> ClassifierResult<Self> {
        let config: Config = serde_json::from_str(raw_config).map_err(|e| {
            ClassifierError::config(format!("invalid roberta config for '{model_id}': {e}"))
        })?;
        let model = XLMRobertaForSequenceClassification::new(labels.len(), &config, vb)?;

        Ok(Self {
            model_id,
            model,
            tokenizer,
            labels,
            device,
        })
    }
}

impl TextClassifier for RobertaSentimentClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn classify(&self, text: &str) -> ClassifierResult<Vec<LabelScore>> {
        let input = encode(&self.tokenizer, text, &self.device)?;
        let logits = self.model.forward(
            &input.input_ids,
            &input.attention_mask,
            &input.token_type_ids,
        )?;
        rank_logits(&logits, &self.labels)
    }
}

impl fmt::Debug for RobertaSentimentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobertaSentimentClassifier")
            .field("model_id", &self.model_id)
            .field("labels", &self.labels)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}
