// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Per-request inference
//!
//! [`infer`] turns one raw JSON payload into an [`InferenceResult`]:
//!
//! 1. read `text` (absent means empty) and trim it
//! 2. reject empty text with [`InferenceError::EmptyInput`]
//! 3. keep at most [`MAX_INPUT_CHARS`] characters
//! 4. classify and keep the top-ranked label
//! 5. lowercase the label and round the score to four decimals
//!
//! Every failure after step 2 becomes [`InferenceError::PredictionFailure`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{classifier::ClassifierHandle, error::InferenceError};

/// Longest input, in characters, passed to the classifier
pub const MAX_INPUT_CHARS: usize = 512;

const SCORE_SCALE: f64 = 10_000.0;

/// Sentiment of one input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Lowercased label of the top-ranked class
    pub sentiment: String,
    /// Probability of that class, rounded to four decimals
    pub confidence: f64,
}

/// Classify the `text` field of `raw_input`
pub fn infer(handle: &ClassifierHandle, raw_input: &Value) -> Result<InferenceResult, InferenceError> {
    let text = extract_text(raw_input)?;

    let text = text.trim_matches(is_strippable);
    if text.is_empty() {
        return Err(InferenceError::EmptyInput);
    }

    let text = truncate_chars(text, MAX_INPUT_CHARS);

    let ranked = handle
        .classifier()
        .classify(text)
        .map_err(InferenceError::prediction)?;

    let Some(top) = ranked.into_iter().next() else {
        return Err(InferenceError::prediction("classifier returned no labels"));
    };

    if !top.score.is_finite() || !(0.0..=1.0).contains(&top.score) {
        return Err(InferenceError::prediction(format!(
            "classifier returned invalid score {} for label '{}'",
            top.score, top.label
        )));
    }

    Ok(InferenceResult {
        sentiment: top.label.to_lowercase(),
        confidence: round_score(top.score),
    })
}

fn extract_text(raw_input: &Value) -> Result<&str, InferenceError> {
    let Value::Object(fields) = raw_input else {
        return Err(InferenceError::prediction(format!(
            "request body must be a JSON object, got {}",
            json_type(raw_input)
        )));
    };

    match fields.get("text") {
        None => Ok(""),
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(InferenceError::prediction(format!(
            "'text' must be a string, got {}",
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Unicode whitespace plus the ASCII information separators `\x1c`..=`\x1f`
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// First `max_chars` characters of `text`
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            debug!(
                original_chars = text.chars().count(),
                kept_chars = max_chars,
                "truncating input text"
            );
            &text[..cut]
        }
        None => text,
    }
}

fn round_score(score: f32) -> f64 {
    (f64::from(score) * SCORE_SCALE).round() / SCORE_SCALE
}
