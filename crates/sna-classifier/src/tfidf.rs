//! TF-IDF feature extraction
//!
//! Applies a vectorizer fitted offline: the vocabulary, idf weights and
//! tokenization settings all come from the artifact file.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sna_core::{Result, SnaError};

use crate::{read_artifact, SparseVector};

// ============================================================================
// Artifact
// ============================================================================

/// Vector normalization applied after idf weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized form of a fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfArtifact {
    /// Term -> feature column
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column
    pub idf: Vec<f64>,

    #[serde(default = "default_lowercase")]
    pub lowercase: bool,

    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Inclusive word n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,

    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,

    #[serde(default)]
    pub stop_words: Vec<String>,
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

// ============================================================================
// Vectorizer
// ============================================================================

/// Fitted TF-IDF vectorizer
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    token_pattern: Regex,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    stop_words: HashSet<String>,
}

impl std::fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("ngram_range", &self.ngram_range)
            .field("sublinear_tf", &self.sublinear_tf)
            .field("norm", &self.norm)
            .finish()
    }
}

impl TfidfVectorizer {
    /// Build a vectorizer from a decoded artifact, checking its consistency
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self> {
        let n_features = artifact.idf.len();
        if artifact.vocabulary.len() != n_features {
            return Err(SnaError::ModelMismatch(format!(
                "vocabulary has {} terms but idf has {} weights",
                artifact.vocabulary.len(),
                n_features
            )));
        }
        if let Some((term, column)) = artifact
            .vocabulary
            .iter()
            .find(|&(_, &column)| column >= n_features)
        {
            return Err(SnaError::ModelMismatch(format!(
                "term {term:?} maps to column {column}, beyond {n_features} features"
            )));
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SnaError::ModelMismatch(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let token_pattern = Regex::new(&artifact.token_pattern).map_err(|e| {
            SnaError::ModelMismatch(format!("invalid token_pattern: {e}"))
        })?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            token_pattern,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            stop_words: artifact.stop_words.into_iter().collect(),
        })
    }

    /// Load a vectorizer artifact from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let artifact: TfidfArtifact = read_artifact(path)?;
        Self::from_artifact(artifact).map_err(|e| SnaError::ArtifactLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Width of every produced feature vector
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Transform a document into its TF-IDF feature vector
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (column, tf * self.idf[column])
            })
            .collect();

        let scale = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if scale > 0.0 {
            for (_, value) in &mut entries {
                *value /= scale;
            }
        }

        SparseVector::new(self.n_features(), entries)
    }

    /// Tokenize, drop stop words, and expand to word n-grams
    fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> TfidfArtifact {
        let vocabulary = [("goal", 0), ("match", 1), ("market", 2), ("the match", 3)]
            .into_iter()
            .map(|(t, c)| (t.to_string(), c))
            .collect();
        TfidfArtifact {
            vocabulary,
            idf: vec![1.0, 2.0, 1.5, 3.0],
            lowercase: true,
            token_pattern: default_token_pattern(),
            ngram_range: (1, 1),
            sublinear_tf: false,
            norm: None,
            stop_words: vec![],
        }
    }

    #[test]
    fn test_transform_counts_and_idf() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact()).unwrap();
        let v = vectorizer.transform("Goal! goal, and a MATCH.");

        assert_eq!(v.dim(), 4);
        assert_eq!(v.entries(), &[(0, 2.0), (1, 2.0)]);
    }

    #[test]
    fn test_single_char_tokens_ignored() {
        let mut a = artifact();
        a.vocabulary.remove("the match");
        a.vocabulary.insert("a".to_string(), 3);
        let vectorizer = TfidfVectorizer::from_artifact(a).unwrap();
        assert!(vectorizer.transform("a a a").entries().is_empty());
    }

    #[test]
    fn test_l2_norm() {
        let mut a = artifact();
        a.norm = Some(Norm::L2);
        let vectorizer = TfidfVectorizer::from_artifact(a).unwrap();
        let v = vectorizer.transform("goal market");

        let length: f64 = v.entries().iter().map(|(_, x)| x * x).sum::<f64>().sqrt();
        assert!((length - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sublinear_tf() {
        let mut a = artifact();
        a.sublinear_tf = true;
        let vectorizer = TfidfVectorizer::from_artifact(a).unwrap();
        let v = vectorizer.transform("goal goal goal");

        assert_eq!(v.entries().len(), 1);
        assert!((v.entries()[0].1 - (1.0 + 3f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_bigrams_and_stop_words() {
        let mut a = artifact();
        a.ngram_range = (1, 2);
        let vectorizer = TfidfVectorizer::from_artifact(a.clone()).unwrap();
        let columns: Vec<usize> = vectorizer
            .transform("the match")
            .entries()
            .iter()
            .map(|(c, _)| *c)
            .collect();
        assert_eq!(columns, vec![1, 3]);

        a.stop_words = vec!["the".to_string()];
        let vectorizer = TfidfVectorizer::from_artifact(a).unwrap();
        let columns: Vec<usize> = vectorizer
            .transform("the match")
            .entries()
            .iter()
            .map(|(c, _)| *c)
            .collect();
        assert_eq!(columns, vec![1]);
    }

    #[test]
    fn test_inconsistent_artifact_rejected() {
        let mut a = artifact();
        a.idf.pop();
        assert!(matches!(
            TfidfVectorizer::from_artifact(a),
            Err(SnaError::ModelMismatch(_))
        ));
    }

    #[test]
    fn test_artifact_defaults() {
        let json = r#"{"vocabulary": {"goal": 0}, "idf": [1.0]}"#;
        let a: TfidfArtifact = serde_json::from_str(json).unwrap();
        assert!(a.lowercase);
        assert_eq!(a.ngram_range, (1, 1));
        assert_eq!(a.norm, Some(Norm::L2));

        let json = r#"{"vocabulary": {"goal": 0}, "idf": [1.0], "norm": null}"#;
        let a: TfidfArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(a.norm, None);
    }
}
