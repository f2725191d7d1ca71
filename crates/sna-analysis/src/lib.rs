//! SNA Analysis - Analysis orchestrator
//!
//! Feeds one article independently into whichever facility was requested:
//! - Analyze: classification, summarization (long articles only), NER
//! - GetAnswer: extractive question answering over the article
//!
//! The service is stateless. Every call recomputes from scratch and the
//! injected facilities are shared read-only.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;
use std::time::Instant;

use sna_core::{
    is_blank, word_count, AnalysisConfig, AnalysisReport, EntityRecognizer, InputField, QaAnswer,
    QuestionAnswerer, Result, SnaError, SummaryBounds, Summarizer, TopicClassifier,
};

pub mod bootstrap;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use bootstrap::build_service;

/// Orchestrates the four analysis facilities
pub struct AnalysisService {
    classifier: Arc<dyn TopicClassifier>,
    summarizer: Arc<dyn Summarizer>,
    recognizer: Arc<dyn EntityRecognizer>,
    answerer: Arc<dyn QuestionAnswerer>,
    config: AnalysisConfig,
}

impl AnalysisService {
    /// Create a service from already-initialized facilities
    pub fn new(
        classifier: Arc<dyn TopicClassifier>,
        summarizer: Arc<dyn Summarizer>,
        recognizer: Arc<dyn EntityRecognizer>,
        answerer: Arc<dyn QuestionAnswerer>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            classifier,
            summarizer,
            recognizer,
            answerer,
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Token bounds passed to the summarizer
    pub fn summary_bounds(&self) -> SummaryBounds {
        SummaryBounds {
            min_length: self.config.summary_min_length,
            max_length: self.config.summary_max_length,
        }
    }

    /// Whether an article is long enough to summarize
    pub fn should_summarize(&self, text: &str) -> bool {
        word_count(text) > self.config.min_summary_words
    }

    /// Classify, summarize and extract entities from an article
    ///
    /// Facilities run one after another on the raw text. Any facility
    /// failure aborts the whole analysis.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisReport> {
        if is_blank(text) {
            return Err(SnaError::EmptyInput(InputField::Article));
        }

        let start = Instant::now();
        let words = word_count(text);

        let classification = self.classifier.classify(text)?;

        let summary = if self.should_summarize(text) {
            Some(self.summarizer.summarize(text, self.summary_bounds()).await?)
        } else {
            tracing::debug!(words, "Article too short, skipping summarization");
            None
        };

        let entities = self.recognizer.recognize(text).await?;

        let processing_time_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            words,
            category = %classification.category,
            summarized = summary.is_some(),
            entities = entities.len(),
            processing_time_ms,
            "Analyzed article"
        );

        Ok(AnalysisReport {
            classification,
            summary,
            entities,
            processing_time_ms,
        })
    }

    /// Answer a question about an article
    pub async fn get_answer(&self, text: &str, question: &str) -> Result<QaAnswer> {
        if is_blank(text) {
            return Err(SnaError::EmptyInput(InputField::Article));
        }
        if is_blank(question) {
            return Err(SnaError::EmptyInput(InputField::Question));
        }

        let start = Instant::now();
        let answer = self.answerer.answer(text, question).await?;

        tracing::info!(
            score = answer.score,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Answered question"
        );

        Ok(answer)
    }
}

// ============================================================================
// Tests
// ============================================================================
