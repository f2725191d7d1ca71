//! Stub facilities for tests
//!
//! Deterministic stand-ins for the classifier and the three neural
//! facilities. Each stub counts its invocations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sna_core::{
    AnalysisConfig, Category, ClassificationResult, EntityAnnotation, EntityRecognizer, QaAnswer,
    QuestionAnswerer, Result, SnaError, SummaryBounds, SummaryResult, Summarizer, TopicClassifier,
};

use crate::AnalysisService;

const ARTICLE_WORDS: [&str; 12] = [
    "FC", "Barcelona", "won", "the", "match", "against", "Real", "Madrid", "after", "a", "late",
    "goal",
];

/// A sports article of exactly `words` whitespace-separated words
pub fn article_of(words: usize) -> String {
    ARTICLE_WORDS
        .iter()
        .cycle()
        .take(words)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Classifier
// ============================================================================

/// Keyword classifier
#[derive(Default)]
pub struct StubClassifier {
    calls: AtomicUsize,
}

impl StubClassifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TopicClassifier for StubClassifier {
    fn classify(&self, text: &str) -> Result<ClassificationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let lower = text.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        let label_index = if has(&["match", "goal", "scores", "team"]) {
            1
        } else if has(&["market", "stocks", "shares"]) {
            2
        } else if has(&["software", "chip", "science"]) {
            3
        } else {
            0
        };

        Ok(ClassificationResult {
            category: Category::from_index(label_index)?,
            label_index,
        })
    }
}

// ============================================================================
// Summarizer
// ============================================================================

/// Returns the first words of the text, or a fixed summary
#[derive(Default)]
pub struct StubSummarizer {
    calls: AtomicUsize,
    fixed: Option<String>,
    last_bounds: Mutex<Option<SummaryBounds>>,
}

impl StubSummarizer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_bounds(&self) -> Option<SummaryBounds> {
        self.last_bounds.lock().ok().and_then(|b| *b)
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<SummaryResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_bounds.lock() {
            *last = Some(bounds);
        }

        let text = match &self.fixed {
            Some(fixed) => fixed.clone(),
            None => text
                .split_whitespace()
                .take(bounds.max_length as usize)
                .collect::<Vec<_>>()
                .join(" "),
        };
        Ok(SummaryResult { text })
    }

    fn model_id(&self) -> &str {
        "stub-summarizer"
    }
}

// ============================================================================
// Entity recognizer
// ============================================================================

/// Groups runs of capitalized words into MISC entities
#[derive(Default)]
pub struct StubRecognizer {
    calls: AtomicUsize,
    fail: bool,
}

impl StubRecognizer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Entities the stub reports for a text, left to right
    pub fn entities_for(&self, text: &str) -> Vec<EntityAnnotation> {
        let mut entities = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for token in text.split_whitespace() {
            let word = token.trim_matches(|c: char| !c.is_alphanumeric());
            if word.chars().next().is_some_and(char::is_uppercase) {
                current.push(word);
            } else {
                push_group(&mut entities, &mut current);
            }
        }
        push_group(&mut entities, &mut current);

        entities
    }
}

fn push_group(entities: &mut Vec<EntityAnnotation>, current: &mut Vec<&str>) {
    if !current.is_empty() {
        entities.push(EntityAnnotation {
            word: current.join(" "),
            entity_group: "MISC".to_string(),
            score: 0.9,
            start: None,
            end: None,
        });
        current.clear();
    }
}

#[async_trait]
impl EntityRecognizer for StubRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<EntityAnnotation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SnaError::Inference("stub recognizer failure".to_string()));
        }
        Ok(self.entities_for(text))
    }

    fn model_id(&self) -> &str {
        "stub-ner"
    }
}

// ============================================================================
// Question answerer
// ============================================================================

/// Answers with the first capitalized word of the context
#[derive(Default)]
pub struct StubAnswerer {
    calls: AtomicUsize,
}

impl StubAnswerer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionAnswerer for StubAnswerer {
    async fn answer(&self, context: &str, _question: &str) -> Result<QaAnswer> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let answer = context
            .split_whitespace()
            .find(|w| w.chars().next().is_some_and(char::is_uppercase))
            .or_else(|| context.split_whitespace().next())
            .unwrap_or_default()
            .to_string();

        Ok(QaAnswer {
            answer,
            score: 0.73,
            start: None,
            end: None,
        })
    }

    fn model_id(&self) -> &str {
        "stub-qa"
    }
}

// ============================================================================
// Bundle
// ============================================================================

/// All four stubs, kept so tests can inspect call counts
#[derive(Clone)]
pub struct StubFacilities {
    pub classifier: Arc<StubClassifier>,
    pub summarizer: Arc<StubSummarizer>,
    pub recognizer: Arc<StubRecognizer>,
    pub answerer: Arc<StubAnswerer>,
}

impl StubFacilities {
    pub fn new() -> Self {
        Self {
            classifier: Arc::new(StubClassifier::default()),
            summarizer: Arc::new(StubSummarizer::default()),
            recognizer: Arc::new(StubRecognizer::default()),
            answerer: Arc::new(StubAnswerer::default()),
        }
    }

    /// Summarizer always returns `summary`
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summarizer = Arc::new(StubSummarizer {
            fixed: Some(summary.into()),
            ..Default::default()
        });
        self
    }

    /// Recognizer always fails with an inference error
    pub fn with_failing_recognizer(mut self) -> Self {
        self.recognizer = Arc::new(StubRecognizer {
            fail: true,
            ..Default::default()
        });
        self
    }

    /// Service wired to these stubs with default thresholds
    pub fn service(&self) -> AnalysisService {
        AnalysisService::new(
            self.classifier.clone(),
            self.summarizer.clone(),
            self.recognizer.clone(),
            self.answerer.clone(),
            AnalysisConfig::default(),
        )
    }
}

impl Default for StubFacilities {
    fn default() -> Self {
        Self::new()
    }
}
