//! Linear classifier (logistic regression decision function)

use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use sna_core::{Result, SnaError};

use crate::{read_artifact, SparseVector};

/// Serialized form of a fitted linear classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    /// One row per class (a single row for binary models)
    pub coef: Vec<Vec<f64>>,

    /// One intercept per coefficient row
    pub intercept: Vec<f64>,

    /// Label value for each class, in decision-function order
    pub classes: Vec<i64>,
}

/// Fitted linear classifier
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coef: Array2<f64>,
    intercept: Vec<f64>,
    classes: Vec<i64>,
}

impl LinearClassifier {
    /// Build a classifier from a decoded artifact, checking its shape
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self> {
        let n_rows = artifact.coef.len();
        let n_features = artifact.coef.first().map(Vec::len).unwrap_or(0);

        if n_rows == 0 || n_features == 0 {
            return Err(SnaError::ModelMismatch(
                "classifier has no coefficients".to_string(),
            ));
        }
        if artifact.intercept.len() != n_rows {
            return Err(SnaError::ModelMismatch(format!(
                "{} coefficient rows but {} intercepts",
                n_rows,
                artifact.intercept.len()
            )));
        }
        let expected_classes = if n_rows == 1 { 2 } else { n_rows };
        if artifact.classes.len() != expected_classes {
            return Err(SnaError::ModelMismatch(format!(
                "{} coefficient rows require {} classes, found {}",
                n_rows,
                expected_classes,
                artifact.classes.len()
            )));
        }

        if artifact.coef.iter().any(|row| row.len() != n_features) {
            return Err(SnaError::ModelMismatch(
                "coefficient rows have unequal widths".to_string(),
            ));
        }

        let flat: Vec<f64> = artifact.coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((n_rows, n_features), flat)
            .map_err(|e| SnaError::ModelMismatch(format!("invalid coefficient matrix: {e}")))?;

        Ok(Self {
            coef,
            intercept: artifact.intercept,
            classes: artifact.classes,
        })
    }

    /// Load a classifier artifact from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let artifact: LinearArtifact = read_artifact(path)?;
        Self::from_artifact(artifact).map_err(|e| SnaError::ArtifactLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Number of input features expected
    pub fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    /// Label values this classifier can emit
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Per-row scores `coef · x + intercept`
    pub fn decision_function(&self, x: &SparseVector) -> Result<Vec<f64>> {
        if x.dim() != self.n_features() {
            return Err(SnaError::ModelMismatch(format!(
                "feature vector has width {}, classifier expects {}",
                x.dim(),
                self.n_features()
            )));
        }

        Ok(self
            .coef
            .rows()
            .into_iter()
            .zip(&self.intercept)
            .map(|(row, b)| b + x.entries().iter().map(|&(j, v)| row[j] * v).sum::<f64>())
            .collect())
    }

    /// Predict the label value for a feature vector
    pub fn predict(&self, x: &SparseVector) -> Result<i64> {
        let scores = self.decision_function(x)?;

        let position = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            // First maximum wins on ties
            scores
                .iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |best, (i, &s)| {
                    if s > best.1 {
                        (i, s)
                    } else {
                        best
                    }
                })
                .0
        };

        Ok(self.classes[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiclass() -> LinearClassifier {
        LinearClassifier::from_artifact(LinearArtifact {
            coef: vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
            intercept: vec![0.0, 0.0, 0.1],
            classes: vec![0, 1, 2],
        })
        .unwrap()
    }

    #[test]
    fn test_multiclass_argmax() {
        let clf = multiclass();
        let x = SparseVector::new(3, vec![(1, 0.9)]);
        assert_eq!(clf.predict(&x).unwrap(), 1);

        // Empty vector falls back to the intercepts
        let empty = SparseVector::new(3, vec![]);
        assert_eq!(clf.predict(&empty).unwrap(), 2);
    }

    #[test]
    fn test_ties_pick_first() {
        let clf = LinearClassifier::from_artifact(LinearArtifact {
            coef: vec![vec![1.0], vec![1.0]],
            intercept: vec![0.0, 0.0],
            classes: vec![5, 6],
        })
        .unwrap();
        let x = SparseVector::new(1, vec![(0, 1.0)]);
        assert_eq!(clf.predict(&x).unwrap(), 5);
    }

    #[test]
    fn test_binary_threshold() {
        let clf = LinearClassifier::from_artifact(LinearArtifact {
            coef: vec![vec![2.0, -2.0]],
            intercept: vec![0.0],
            classes: vec![0, 1],
        })
        .unwrap();

        assert_eq!(clf.predict(&SparseVector::new(2, vec![(0, 1.0)])).unwrap(), 1);
        assert_eq!(clf.predict(&SparseVector::new(2, vec![(1, 1.0)])).unwrap(), 0);
    }

    #[test]
    fn test_width_mismatch() {
        let clf = multiclass();
        let x = SparseVector::new(5, vec![]);
        assert!(matches!(
            clf.decision_function(&x),
            Err(SnaError::ModelMismatch(_))
        ));
    }

    #[test]
    fn test_invalid_shapes_rejected() {
        let ragged = LinearArtifact {
            coef: vec![vec![1.0, 2.0], vec![1.0]],
            intercept: vec![0.0, 0.0],
            classes: vec![0, 1],
        };
        assert!(LinearClassifier::from_artifact(ragged).is_err());

        let missing_classes = LinearArtifact {
            coef: vec![vec![1.0], vec![1.0], vec![1.0]],
            intercept: vec![0.0, 0.0, 0.0],
            classes: vec![0, 1],
        };
        assert!(LinearClassifier::from_artifact(missing_classes).is_err());
    }
}
