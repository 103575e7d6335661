//! Classification adapter: feature record in, canonical prediction out.
//!
//! The classifier may return one score, two class probabilities, or N.
//! Whatever the arity, the caller gets the same shape: a decoded label, the
//! confidence of that label, and a label → probability map summing to ~1.
//!
//! Class semantics are positional: index 0 is the negative class and index 1
//! the positive class. Labels always come from the decoder, never from
//! assumed names.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classifier::{Classifier, LabelDecoder};
use crate::error::{LoadError, PredictError};
use crate::features::FeatureRecord;

/// Score at or above which a single-score model predicts the positive class.
const SINGLE_SCORE_THRESHOLD: f32 = 0.5;

/// Allowed distance of a multi-probability output's sum from 1.
const SUM_TOLERANCE: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_label: String,
    /// Probability of `predicted_label`, in `[0, 1]`.
    pub confidence: f64,
    pub class_probabilities: BTreeMap<String, f64>,
}

/// Rejects decoders that cannot label every output the classifier produces,
/// or that give two classes the same label.
pub fn check_labels(classifier: &dyn Classifier, decoder: &dyn LabelDecoder) -> Result<(), LoadError> {
    let mut seen = HashSet::new();
    if let Some(label) = decoder.classes().iter().find(|l| !seen.insert(l.as_str())) {
        return Err(LoadError::DuplicateLabel {
            label: label.clone(),
        });
    }
    let labels = decoder.classes().len();
    let required = match classifier.output_len() {
        Some(1) | None => 2,
        Some(n) => n,
    };
    if labels < required {
        return Err(LoadError::LabelMismatch { labels, required });
    }
    Ok(())
}

/// Wraps a shared classifier and decoder; stateless and deterministic.
#[derive(Clone)]
pub struct ClassificationAdapter {
    classifier: Arc<dyn Classifier>,
    decoder: Arc<dyn LabelDecoder>,
}

impl std::fmt::Debug for ClassificationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationAdapter")
            .field("classes", &self.decoder.classes())
            .field("output_len", &self.classifier.output_len())
            .finish()
    }
}

fn validate(probabilities: &[f32]) -> Result<(), PredictError> {
    if probabilities.is_empty() {
        return Err(PredictError::EmptyOutput);
    }
    for (index, &value) in probabilities.iter().enumerate() {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(PredictError::InvalidProbability { index, value });
        }
    }
    // A single score is P(positive); its complement is derived, not checked.
    if probabilities.len() > 1 {
        let sum: f32 = probabilities.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(PredictError::UnnormalizedOutput { sum });
        }
    }
    Ok(())
}

impl ClassificationAdapter {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        decoder: Arc<dyn LabelDecoder>,
    ) -> Result<Self, LoadError> {
        check_labels(classifier.as_ref(), decoder.as_ref())?;
        Ok(Self {
            classifier,
            decoder,
        })
    }

    pub fn classes(&self) -> &[String] {
        self.decoder.classes()
    }

    fn label(&self, index: usize) -> Result<String, PredictError> {
        self.decoder
            .decode(index)
            .map(str::to_string)
            .ok_or(PredictError::UnknownClass(index))
    }

    pub fn classify(&self, record: &FeatureRecord) -> Result<PredictionResult, PredictError> {
        let probabilities = self.classifier.predict_probabilities(&record.to_vector())?;
        self.normalize(&probabilities)
    }

    /// Turns a raw probability vector of any supported arity into a result.
    pub fn normalize(&self, probabilities: &[f32]) -> Result<PredictionResult, PredictError> {
        validate(probabilities)?;

        let (predicted, confidence, class_probabilities) = match *probabilities {
            [score] => {
                let score = f64::from(score);
                let negative = 1.0 - score;
                let predicted = usize::from(score >= f64::from(SINGLE_SCORE_THRESHOLD));
                let confidence = if predicted == 1 { score } else { negative };
                let map = BTreeMap::from([(self.label(0)?, negative), (self.label(1)?, score)]);
                (predicted, confidence, map)
            }
            [negative, positive] => {
                // Ties go to the positive class.
                let predicted = usize::from(negative <= positive);
                let confidence = f64::from(probabilities[predicted]);
                let map = BTreeMap::from([
                    (self.label(0)?, f64::from(negative)),
                    (self.label(1)?, f64::from(positive)),
                ]);
                (predicted, confidence, map)
            }
            _ => {
                let mut predicted = 0;
                for (i, &p) in probabilities.iter().enumerate() {
                    if p > probabilities[predicted] {
                        predicted = i;
                    }
                }
                let mut map = BTreeMap::new();
                for (i, &p) in probabilities.iter().enumerate() {
                    map.insert(self.label(i)?, f64::from(p));
                }
                (predicted, f64::from(probabilities[predicted]), map)
            }
        };

        Ok(PredictionResult {
            predicted_label: self.label(predicted)?,
            confidence,
            class_probabilities,
        })
    }
}
