// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Custom extractors for improved error handling
//!
//! This module provides a JSON extractor that reports body problems as
//! prediction failures carrying a descriptive message, instead of Axum's
//! default plain-text rejections.

use axum::{
    extract::{FromRequest, Request},
    http::header,
};
use sentiment_classifier::InferenceError;
use serde::de::DeserializeOwned;

use crate::error::ServerError;

mod error_hints {
    pub const MISSING_COMMA: &str =
        "check for missing or extra commas between object properties or array elements";
    pub const MISSING_BRACE: &str = "check for missing closing brace '}' for JSON object";
    pub const MISSING_BRACKET: &str = "check for missing closing bracket ']' for JSON array";
    pub const MISSING_QUOTES: &str =
        "check for missing or improperly escaped quotes around string values";
    pub const CONTROL_CHARS: &str = "JSON contains invalid control characters that must be escaped";
    pub const EXPECTED_VALUE: &str =
        "expected a valid JSON value (string, number, boolean, null, object, or array)";
    pub const DEFAULT_SYNTAX: &str = "check JSON formatting and structure";
    pub const EMPTY_BODY: &str = "request body is empty, expected valid JSON";
    pub const TRUNCATED_JSON: &str =
        "unexpected end of JSON input, request appears to be truncated";
}

/// Largest accepted request body
pub const MAX_JSON_PAYLOAD_SIZE: usize = 1024 * 1024;

/// JSON extractor whose rejections are `Prediction failed: ...` responses
#[derive(Debug)]
pub struct JsonExtractor<T>(pub T);

impl<T, S> FromRequest<S> for JsonExtractor<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Self::extract_json(req, state)
            .await
            .map(JsonExtractor)
            .map_err(|message| ServerError::Inference(InferenceError::PredictionFailure(message)))
    }
}

/// `application/json` or any `application/*+json` type, parameters ignored
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

impl<T> JsonExtractor<T>
where
    T: DeserializeOwned,
{
    async fn extract_json<S>(req: Request, state: &S) -> Result<T, String>
    where
        S: Send + Sync,
    {
        match req
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|value| value.to_str())
        {
            Some(Ok(content_type)) if is_json_content_type(content_type) => {}
            Some(Ok(content_type)) => {
                return Err(format!(
                    "invalid content-type: expected 'application/json', got '{content_type}'"
                ));
            }
            Some(Err(_)) => {
                return Err("invalid content-type header encoding".to_string());
            }
            None => {
                return Err("missing content-type: expected 'application/json'".to_string());
            }
        }

        let bytes = axum::body::Bytes::from_request(req, state)
            .await
            .map_err(|rejection| format!("failed to read request body: {rejection}"))?;

        if bytes.len() > MAX_JSON_PAYLOAD_SIZE {
            return Err(format!(
                "request body too large: {} bytes (max: {} bytes)",
                bytes.len(),
                MAX_JSON_PAYLOAD_SIZE
            ));
        }

        if bytes.is_empty() {
            return Err(error_hints::EMPTY_BODY.to_string());
        }

        serde_json::from_slice::<T>(&bytes).map_err(|err| {
            if err.is_syntax() {
                format!(
                    "invalid JSON syntax at line {}, column {}: {}",
                    err.line(),
                    err.column(),
                    get_json_syntax_hint(&err)
                )
            } else if err.is_eof() {
                error_hints::TRUNCATED_JSON.to_string()
            } else {
                format!("JSON parsing error: {err}")
            }
        })
    }
}

/// Provides helpful hints for JSON syntax errors
fn get_json_syntax_hint(err: &serde_json::Error) -> &'static str {
    let err_msg = err.to_string();

    if err_msg.contains("expected ','") || err_msg.contains("trailing comma") {
        error_hints::MISSING_COMMA
    } else if err_msg.contains("expected '}'") {
        error_hints::MISSING_BRACE
    } else if err_msg.contains("expected ']'") {
        error_hints::MISSING_BRACKET
    } else if err_msg.contains("expected '\"'") {
        error_hints::MISSING_QUOTES
    } else if err_msg.contains("control character") {
        error_hints::CONTROL_CHARS
    } else if err_msg.contains("expected value") {
        error_hints::EXPECTED_VALUE
    } else {
        error_hints::DEFAULT_SYNTAX
    }
}
