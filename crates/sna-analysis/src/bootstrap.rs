//! Startup routine
//!
//! Constructs the five model handles once and injects them into the
//! service. Artifact failures abort startup; there is no degraded mode.

use std::sync::Arc;

use sna_classifier::TextClassifier;
use sna_core::{AppConfig, Result};
use sna_inference::InferenceFacilities;

use crate::AnalysisService;

/// Load the classifier artifacts and initialize the inference facilities
pub fn build_service(config: &AppConfig) -> Result<AnalysisService> {
    tracing::info!(
        vectorizer = %config.models.vectorizer_path.display(),
        classifier = %config.models.classifier_path.display(),
        "Loading classification artifacts"
    );
    let classifier = TextClassifier::load(
        &config.models.vectorizer_path,
        &config.models.classifier_path,
    )?;

    let facilities = InferenceFacilities::from_config(&config.inference)?;

    Ok(AnalysisService::new(
        Arc::new(classifier),
        facilities.summarizer,
        facilities.recognizer,
        facilities.answerer,
        config.analysis.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sna_core::SnaError;
    use std::io::Write;

    #[test]
    fn test_missing_artifacts_fail_fast() {
        let mut config = AppConfig::default();
        config.models.vectorizer_path = "/nonexistent/tfidf.json".into();

        let err = build_service(&config).err().unwrap();
        assert!(matches!(err, SnaError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_builds_with_valid_artifacts() {
        let mut vectorizer = tempfile::NamedTempFile::new().unwrap();
        write!(vectorizer, r#"{{"vocabulary": {{"goal": 0}}, "idf": [1.0]}}"#).unwrap();
        let mut classifier = tempfile::NamedTempFile::new().unwrap();
        write!(
            classifier,
            r#"{{"coef": [[1.0], [2.0], [0.0], [0.0]], "intercept": [0, 0, 0, 0], "classes": [0, 1, 2, 3]}}"#
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.models.vectorizer_path = vectorizer.path().to_path_buf();
        config.models.classifier_path = classifier.path().to_path_buf();

        let service = build_service(&config).unwrap();
        assert_eq!(service.config().min_summary_words, 10);
    }
}
