//! Classifier and label-decoder seams.
//!
//! The core treats the trained model as opaque: a feature vector goes in, a
//! vector of per-class probabilities comes out. Shipped implementations are
//! JSON artifacts (tree ensemble, logistic) loaded once at startup.

mod artifact;
mod encoder;
mod logistic;
mod trees;

pub use artifact::{load_artifacts, load_classifier, LoadedArtifacts, ModelArtifact};
pub use encoder::LabelEncoder;
pub use logistic::LogisticModel;
pub use trees::{Objective, TreeEnsemble, TreeNode};

use crate::error::ClassifierError;

/// Opaque binary/multi-class classifier.
///
/// Implementations must be deterministic and safe to share across threads;
/// the service never mutates a loaded classifier.
pub trait Classifier: Send + Sync {
    /// Per-class probabilities for one feature vector. Length 1 means a single
    /// positive-class score; length >= 2 means one entry per class index.
    fn predict_probabilities(&self, features: &[f32]) -> Result<Vec<f32>, ClassifierError>;

    /// Number of entries `predict_probabilities` returns, if known up front.
    fn output_len(&self) -> Option<usize> {
        None
    }
}

/// Maps class indices to human-readable labels.
pub trait LabelDecoder: Send + Sync {
    /// Known labels, ordered by class index.
    fn classes(&self) -> &[String];

    fn decode(&self, index: usize) -> Option<&str> {
        self.classes().get(index).map(String::as_str)
    }

    /// Decodes every index, or `None` if any is unknown.
    fn decode_many(&self, indices: &[usize]) -> Option<Vec<String>> {
        indices
            .iter()
            .map(|&i| self.decode(i).map(str::to_string))
            .collect()
    }
}

pub(crate) fn check_feature_count(expected: usize, features: &[f32]) -> Result<(), ClassifierError> {
    if features.len() != expected {
        return Err(ClassifierError::FeatureCount {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
