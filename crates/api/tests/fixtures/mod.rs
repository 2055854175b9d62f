// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Test fixtures for driving the server over HTTP
//!
//! Fake classifiers stand in for downloaded models so tests never touch the
//! network.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use api::{Server, ServerConfig};
use sentiment_classifier::{
    ClassifierError, ClassifierHandle, ClassifierResult, LabelScore, ModelSource, TextClassifier,
};
use tokio_util::sync::CancellationToken;

/// Returns a fixed ranking and records every text it receives
#[derive(Debug)]
pub struct RecordingClassifier {
    model_id: String,
    ranking: Vec<LabelScore>,
    seen: Mutex<Vec<String>>,
}

impl RecordingClassifier {
    pub fn new(model_id: &str, ranking: Vec<LabelScore>) -> Arc<Self> {
        Arc::new(Self {
            model_id: model_id.to_string(),
            ranking,
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Three-class Twitter-RoBERTa style output, `Positive` on top
    pub fn twitter_positive() -> Arc<Self> {
        Self::new(
            "cardiffnlp/twitter-roberta-base-sentiment-latest",
            vec![
                LabelScore::new("Positive", 0.987_66),
                LabelScore::new("Neutral", 0.010_1),
                LabelScore::new("Negative", 0.002_24),
            ],
        )
    }

    /// Two-class SST-2 style output, `NEGATIVE` on top
    pub fn sst2_negative() -> Arc<Self> {
        Self::new(
            "distilbert/distilbert-base-uncased-finetuned-sst-2-english",
            vec![
                LabelScore::new("NEGATIVE", 0.912_345),
                LabelScore::new("POSITIVE", 0.087_655),
            ],
        )
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().expect("lock poisoned").clone()
    }
}

impl TextClassifier for RecordingClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn classify(&self, text: &str) -> ClassifierResult<Vec<LabelScore>> {
        self.seen.lock().expect("lock poisoned").push(text.to_string());
        Ok(self.ranking.clone())
    }
}

/// Fails every classification with a fixed cause
#[derive(Debug)]
pub struct FailingClassifier {
    pub cause: &'static str,
}

impl TextClassifier for FailingClassifier {
    fn model_id(&self) -> &str {
        "test/failing"
    }

    fn classify(&self, _text: &str) -> ClassifierResult<Vec<LabelScore>> {
        Err(ClassifierError::invalid_output(self.cause))
    }
}

/// Panics inside the blocking inference task
#[derive(Debug)]
pub struct PanickingClassifier;

impl TextClassifier for PanickingClassifier {
    fn model_id(&self) -> &str {
        "test/panicking"
    }

    #[allow(clippy::panic)]
    fn classify(&self, _text: &str) -> ClassifierResult<Vec<LabelScore>> {
        panic!("classifier crashed")
    }
}

/// A running test server, shut down on drop
#[derive(Debug)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: CancellationToken,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Start a server around `classifier`
pub async fn spawn_server(classifier: Arc<dyn TextClassifier>, source: ModelSource) -> TestServer {
    let handle = ClassifierHandle::new(classifier, source);
    let (addr, shutdown) = Server::new(ServerConfig::for_testing(), handle)
        .expect("Failed to create server")
        .run_for_testing()
        .await
        .expect("Failed to start test server");

    TestServer {
        addr,
        shutdown,
        client: reqwest::Client::new(),
    }
}
