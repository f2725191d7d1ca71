//! SNA Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the SNA system:
//! - Analysis results (category, summary, entities, answers)
//! - Common error types
//! - Shared traits for the classification and inference facilities
//! - Configuration management
//! - Tracing bootstrap
//!
//! Author: hephaex@gmail.com

pub mod config;
pub mod telemetry;

pub use config::{
    AnalysisConfig, AppConfig, ConfigError, Device, InferenceConfig, LoggingConfig, ModelsConfig,
    ServerConfig,
};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Which user input was left blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputField {
    Article,
    Question,
}

impl InputField {
    /// Warning shown to the user when this field is blank
    pub fn warning(&self) -> &'static str {
        match self {
            Self::Article => "Please enter some text to analyze.",
            Self::Question => "Please enter a question about the article.",
        }
    }
}

/// Core error types for SNA operations
#[derive(Error, Debug)]
pub enum SnaError {
    #[error("{}", .0.warning())]
    EmptyInput(InputField),

    #[error("Failed to load model artifact {path}: {reason}")]
    ArtifactLoad { path: PathBuf, reason: String },

    #[error("Model mismatch: {0}")]
    ModelMismatch(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SnaError {
    /// True for errors that are reported as a non-blocking warning
    pub fn is_user_warning(&self) -> bool {
        matches!(self, Self::EmptyInput(_))
    }
}

impl From<ConfigError> for SnaError {
    fn from(err: ConfigError) -> Self {
        SnaError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnaError>;

// ============================================================================
// Classification
// ============================================================================

/// News topic category
///
/// The label set is closed and positional: the classifier emits an index
/// into `[World, Sports, Business, Sci/Tech]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    World,
    Sports,
    Business,
    #[serde(rename = "Sci/Tech")]
    SciTech,
}

impl Category {
    /// All categories in label-index order
    pub const ALL: [Category; 4] = [
        Category::World,
        Category::Sports,
        Category::Business,
        Category::SciTech,
    ];

    /// Map a predicted label index to its category
    pub fn from_index(index: i64) -> Result<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| {
                SnaError::ModelMismatch(format!(
                    "predicted label index {index} is outside the {} known categories",
                    Self::ALL.len()
                ))
            })
    }

    /// Get the display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::World => "World",
            Self::Sports => "Sports",
            Self::Business => "Business",
            Self::SciTech => "Sci/Tech",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running the feature extractor and classifier on an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    /// Raw label value produced by the classifier
    pub label_index: i64,
}

impl std::fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Predicted Category: {}", self.category)
    }
}

// ============================================================================
// Summarization
// ============================================================================

/// Token length bounds passed to the summarizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryBounds {
    pub min_length: u32,
    pub max_length: u32,
}

impl Default for SummaryBounds {
    fn default() -> Self {
        Self {
            min_length: 20,
            max_length: 50,
        }
    }
}

/// A single generated summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub text: String,
}

// ============================================================================
// Entities and Answers
// ============================================================================

/// A grouped named entity found in the article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAnnotation {
    /// Surface form as it appears in the text
    pub word: String,
    /// Grouped entity type (PER, ORG, LOC, MISC, ...)
    pub entity_group: String,
    /// Confidence in [0, 1]
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

impl std::fmt::Display for EntityAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} → {} (score={})",
            self.word,
            self.entity_group,
            format_score(self.score)
        )
    }
}

/// Answer span extracted from the article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaAnswer {
    pub answer: String,
    /// Confidence in [0, 1]
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

impl std::fmt::Display for QaAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Answer: {} (score={})",
            self.answer,
            format_score(self.score)
        )
    }
}

/// Everything produced by one Analyze action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub classification: ClassificationResult,
    /// Absent when the article is too short to summarize
    pub summary: Option<SummaryResult>,
    pub entities: Vec<EntityAnnotation>,
    pub processing_time_ms: u64,
}

// ============================================================================
// Text helpers
// ============================================================================

/// Format a confidence score with exactly two decimal digits
pub fn format_score(score: f32) -> String {
    format!("{score:.2}")
}

/// Separators between words: Unicode whitespace plus the ASCII
/// file/group/record/unit separators (U+001C..=U+001F)
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Count separator-delimited tokens
pub fn word_count(text: &str) -> usize {
    text.split(is_separator).filter(|w| !w.is_empty()).count()
}

/// True when the text contains nothing but separators
pub fn is_blank(text: &str) -> bool {
    text.chars().all(is_separator)
}

// ============================================================================
// Traits
// ============================================================================

/// Trait for the classical topic classifier (feature extractor + linear model)
pub trait TopicClassifier: Send + Sync {
    /// Predict the topic category of a text
    fn classify(&self, text: &str) -> Result<ClassificationResult>;
}

/// Trait for abstractive summarizers
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize text within the given token bounds using greedy decoding
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<SummaryResult>;

    /// Model identifier for logging
    fn model_id(&self) -> &str;
}

/// Trait for named-entity recognizers with adjacent-token grouping
#[async_trait::async_trait]
pub trait EntityRecognizer: Send + Sync {
    /// Recognize grouped entities, ordered by position in the text
    async fn recognize(&self, text: &str) -> Result<Vec<EntityAnnotation>>;

    /// Model identifier for logging
    fn model_id(&self) -> &str;
}

/// Trait for extractive question answering
#[async_trait::async_trait]
pub trait QuestionAnswerer: Send + Sync {
    /// Extract the best answer span for the question from the context
    async fn answer(&self, context: &str, question: &str) -> Result<QaAnswer>;

    /// Model identifier for logging
    fn model_id(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_category_from_index() {
        assert_eq!(Category::from_index(0).unwrap(), Category::World);
        assert_eq!(Category::from_index(1).unwrap(), Category::Sports);
        assert_eq!(Category::from_index(2).unwrap(), Category::Business);
        assert_eq!(Category::from_index(3).unwrap(), Category::SciTech);
    }

    #[test]
    fn test_category_out_of_range() {
        assert!(matches!(
            Category::from_index(4),
            Err(SnaError::ModelMismatch(_))
        ));
        assert!(matches!(
            Category::from_index(-1),
            Err(SnaError::ModelMismatch(_))
        ));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::SciTech.to_string(), "Sci/Tech");
        let result = ClassificationResult {
            category: Category::Sports,
            label_index: 1,
        };
        assert_eq!(result.to_string(), "Predicted Category: Sports");
    }

    #[test]
    fn test_entity_line() {
        let entity = EntityAnnotation {
            word: "Barack Obama".to_string(),
            entity_group: "PER".to_string(),
            score: 0.99871,
            start: Some(0),
            end: Some(12),
        };
        assert_eq!(entity.to_string(), "Barack Obama → PER (score=1.00)");
    }

    #[test]
    fn test_answer_line() {
        let answer = QaAnswer {
            answer: "Real Madrid".to_string(),
            score: 0.4567,
            start: None,
            end: None,
        };
        assert_eq!(answer.to_string(), "Answer: Real Madrid (score=0.46)");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("one two\tthree\nfour  five"), 5);
    }

    #[test]
    fn test_information_separators_split_words() {
        assert_eq!(word_count("a\u{1c}b c"), 3);
        assert_eq!(word_count("a\u{1f}\u{1d}b"), 2);
        assert_eq!(word_count("\u{85}x\u{a0}y\u{3000}"), 2);
        assert!(is_blank("\u{1c}\u{1e} \n"));
        assert!(!is_blank("\u{1c}a"));
    }

    #[test]
    fn test_empty_input_messages() {
        let err = SnaError::EmptyInput(InputField::Article);
        assert!(err.is_user_warning());
        assert_eq!(err.to_string(), "Please enter some text to analyze.");

        let err = SnaError::Inference("boom".to_string());
        assert!(!err.is_user_warning());
    }

    proptest! {
        #[test]
        fn prop_score_has_two_decimals(score in 0.0f32..=1.0f32) {
            let formatted = format_score(score);
            let (_, decimals) = formatted.split_once('.').unwrap();
            prop_assert_eq!(decimals.len(), 2);
        }

        #[test]
        fn prop_index_maps_into_label_set(index in any::<i64>()) {
            match Category::from_index(index) {
                Ok(category) => prop_assert!(Category::ALL.contains(&category)),
                Err(err) => {
                    prop_assert!(!(0..4).contains(&index));
                    prop_assert!(matches!(err, SnaError::ModelMismatch(_)));
                }
            }
        }
    }
}
