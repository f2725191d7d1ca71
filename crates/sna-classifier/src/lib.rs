//! SNA Classifier - Classical topic classification
//!
//! Combines a fitted TF-IDF feature extractor with a fitted linear
//! classifier. Both are read once from JSON artifact files at startup and
//! never mutated afterwards.
//!
//! Author: hephaex@gmail.com

use std::path::Path;

use serde::de::DeserializeOwned;
use sna_core::{Category, ClassificationResult, Result, SnaError, TopicClassifier};

pub mod linear;
pub mod tfidf;

pub use linear::{LinearArtifact, LinearClassifier};
pub use tfidf::{Norm, TfidfArtifact, TfidfVectorizer};

// ============================================================================
// Feature vectors
// ============================================================================

/// Fixed-width sparse feature vector, entries sorted by column
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn new(dim: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|&(column, _)| column);
        Self { dim, entries }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }
}

/// Read and decode a JSON artifact, mapping every failure to `ArtifactLoad`
pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| SnaError::ArtifactLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| SnaError::ArtifactLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

// ============================================================================
// Text classifier
// ============================================================================

/// Feature extractor and classifier loaded together
#[derive(Debug)]
pub struct TextClassifier {
    vectorizer: TfidfVectorizer,
    classifier: LinearClassifier,
}

impl TextClassifier {
    /// Pair a vectorizer with a classifier of matching width
    pub fn new(vectorizer: TfidfVectorizer, classifier: LinearClassifier) -> Result<Self> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(SnaError::ModelMismatch(format!(
                "vectorizer produces {} features but classifier expects {}",
                vectorizer.n_features(),
                classifier.n_features()
            )));
        }

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Load both artifacts, failing on the first missing or corrupt file
    pub fn load(vectorizer_path: impl AsRef<Path>, classifier_path: impl AsRef<Path>) -> Result<Self> {
        let vectorizer = TfidfVectorizer::load(vectorizer_path.as_ref())?;
        let classifier = LinearClassifier::load(classifier_path.as_ref())?;
        let text_classifier = Self::new(vectorizer, classifier)?;

        tracing::info!(
            vectorizer = %vectorizer_path.as_ref().display(),
            classifier = %classifier_path.as_ref().display(),
            features = text_classifier.vectorizer.n_features(),
            classes = text_classifier.classifier.classes().len(),
            "Loaded classification artifacts"
        );

        Ok(text_classifier)
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &LinearClassifier {
        &self.classifier
    }
}

impl TopicClassifier for TextClassifier {
    fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let features = self.vectorizer.transform(text);
        let label_index = self.classifier.predict(&features)?;
        let category = Category::from_index(label_index)?;

        tracing::debug!(label_index, %category, nonzero = features.entries().len(), "Classified text");

        Ok(ClassificationResult {
            category,
            label_index,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
