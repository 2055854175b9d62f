// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use candle_core::{Device, IndexOp, Module};
use candle_nn::{Linear, VarBuilder, linear};
use candle_transformers::models::bert::{BertModel, Config};
use tokenizers::Tokenizer;

use super::{encode, rank_logits};
use crate::{
    classifier::{LabelScore, TextClassifier},
    error::{ClassifierError, ClassifierResult},
};

/// BERT checkpoint with pooler and linear classification head
///
/// Mirrors `BertForSequenceClassification`: the `[CLS]` hidden state goes
/// through `bert.pooler.dense` and `tanh`, then through `classifier`.
pub struct BertSentimentClassifier {
    model_id: String,
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

impl BertSentimentClassifier {
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
            ClassifierError::config(format!("invalid bert config for '{model_id}': {e}"))
        })?;

        let bert = BertModel::load(vb.pp("bert"), &config)?;
        let pooler = linear(hidden_size, hidden_size, vb.pp("bert.pooler.dense"))?;
        let classifier = linear(hidden_size, labels.len(), vb.pp("classifier"))?;

        Ok(Self {
            model_id,
            bert,
            pooler,
            classifier,
            tokenizer,
            labels,
            device,
        })
    }
}

impl TextClassifier for BertSentimentClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn classify(&self, text: &str) -> ClassifierResult<Vec<LabelScore>> {
        let input = encode(&self.tokenizer, text, &self.device)?;
        let hidden = self.bert.forward(
            &input.input_ids,
            &input.token_type_ids,
            Some(&input.attention_mask),
        )?;

        // (1, seq_len, hidden) -> (1, hidden)
        let cls = hidden.i((.., 0))?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        let logits = self.classifier.forward(&pooled)?;

        rank_logits(&logits, &self.labels)
    }
}

impl fmt::Debug for BertSentimentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BertSentimentClassifier")
            .field("model_id", &self.model_id)
            .field("labels", &self.labels)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}
