//! SNA Inference - Pretrained neural facilities
//!
//! Clients for the three hosted pipelines used by the analysis service:
//! - Summarization (seq2seq, greedy decoding, token length bounds)
//! - Named entity recognition (grouped entities)
//! - Extractive question answering
//!
//! Each facility is addressed by a fixed model identifier and shares one
//! HTTP client pinned to the configured compute device.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;

use sna_core::{EntityRecognizer, InferenceConfig, QuestionAnswerer, Result, Summarizer};

pub mod client;
pub mod ner;
pub mod qa;
pub mod summarization;

pub use client::{HfClient, RequestOptions};
pub use ner::HfEntityRecognizer;
pub use qa::HfQuestionAnswerer;
pub use summarization::HfSummarizer;

/// The three neural facilities, ready to share across requests
#[derive(Clone)]
pub struct InferenceFacilities {
    pub summarizer: Arc<dyn Summarizer>,
    pub recognizer: Arc<dyn EntityRecognizer>,
    pub answerer: Arc<dyn QuestionAnswerer>,
}

impl InferenceFacilities {
    /// Create all facilities from config
    pub fn from_config(config: &InferenceConfig) -> Result<Self> {
        let client = HfClient::from_config(config)?;

        tracing::info!(
            endpoint = %config.endpoint,
            device = %config.device,
            summarization = %config.summarization_model,
            ner = %config.ner_model,
            qa = %config.qa_model,
            "Initialized inference facilities"
        );

        Ok(Self {
            summarizer: Arc::new(HfSummarizer::new(
                client.clone(),
                config.summarization_model.clone(),
            )),
            recognizer: Arc::new(HfEntityRecognizer::new(
                client.clone(),
                config.ner_model.clone(),
            )),
            answerer: Arc::new(HfQuestionAnswerer::new(client, config.qa_model.clone())),
        })
    }
}
