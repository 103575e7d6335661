//! Logistic regression over the raw feature vector.

use serde::{Deserialize, Serialize};

use super::{check_feature_count, sigmoid, Classifier};
use crate::error::ClassifierError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f32>,
    #[serde(default)]
    pub bias: f32,
    /// Emit only `[P(positive)]` instead of `[P(negative), P(positive)]`.
    #[serde(default)]
    pub single_score: bool,
}

impl LogisticModel {
    fn score(&self, features: &[f32]) -> f32 {
        let z = self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.bias;
        sigmoid(z)
    }
}

impl Classifier for LogisticModel {
    fn predict_probabilities(&self, features: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        check_feature_count(self.weights.len(), features)?;
        let p = self.score(features);
        if !p.is_finite() {
            return Err(ClassifierError::Inference(format!(
                "non-finite logistic score {p}"
            )));
        }
        Ok(if self.single_score {
            vec![p]
        } else {
            vec![1.0 - p, p]
        })
    }

    fn output_len(&self) -> Option<usize> {
        Some(if self.single_score { 1 } else { 2 })
    }
}
