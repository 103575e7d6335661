//! Gradient-boosted decision tree ensemble (XGBoost-style JSON dump).
//!
//! Each tree is a flat node array rooted at index 0. A split sends the
//! sample to `yes` when `x[feature] < threshold`, to `no` otherwise, and to
//! `missing` (default `yes`) when the value is NaN. Leaf values are summed
//! into a margin per class.

use serde::{Deserialize, Serialize};

use super::{check_feature_count, sigmoid, Classifier};
use crate::error::ClassifierError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f32,
        yes: usize,
        no: usize,
        #[serde(default)]
        missing: Option<usize>,
    },
    Leaf {
        leaf: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    /// One margin, sigmoid, output `[1 - p, p]`.
    #[serde(rename = "binary:logistic")]
    BinaryLogistic,
    /// `num_class` margins (trees assigned round-robin), softmax output.
    #[serde(rename = "multi:softprob")]
    MultiSoftprob,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub num_features: usize,
    pub objective: Objective,
    #[serde(default)]
    pub num_class: usize,
    /// Added to every class margin before the link function.
    #[serde(default)]
    pub base_margin: f32,
    pub trees: Vec<Tree>,
}

impl Tree {
    fn evaluate(&self, features: &[f32]) -> Result<f32, ClassifierError> {
        let mut index = 0usize;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(index).ok_or_else(|| {
                ClassifierError::Inference(format!("tree node {index} out of range"))
            })?;
            match *node {
                TreeNode::Leaf { leaf } => return Ok(leaf),
                TreeNode::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    let x = features.get(feature).copied().ok_or_else(|| {
                        ClassifierError::Inference(format!("split on missing feature {feature}"))
                    })?;
                    index = if x.is_nan() {
                        missing.unwrap_or(yes)
                    } else if x < threshold {
                        yes
                    } else {
                        no
                    };
                }
            }
        }
        Err(ClassifierError::Inference("tree contains a cycle".to_string()))
    }
}

impl TreeEnsemble {
    fn classes(&self) -> usize {
        match self.objective {
            Objective::BinaryLogistic => 1,
            Objective::MultiSoftprob => self.num_class.max(1),
        }
    }

    /// Structural checks done once at load time so inference can't index out of bounds.
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("ensemble has no trees".to_string());
        }
        if self.objective == Objective::MultiSoftprob {
            if self.num_class < 2 {
                return Err(format!("multi:softprob needs num_class >= 2, got {}", self.num_class));
            }
            if self.trees.len() % self.num_class != 0 {
                return Err(format!(
                    "{} trees is not a multiple of num_class {}",
                    self.trees.len(),
                    self.num_class
                ));
            }
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(format!("tree {t} has no nodes"));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if let TreeNode::Split {
                    feature,
                    yes,
                    no,
                    missing,
                    ..
                } = *node
                {
                    if feature >= self.num_features {
                        return Err(format!("tree {t} node {n}: feature {feature} out of range"));
                    }
                    let len = tree.nodes.len();
                    if yes >= len || no >= len || missing.is_some_and(|m| m >= len) {
                        return Err(format!("tree {t} node {n}: child index out of range"));
                    }
                }
            }
        }
        Ok(())
    }

    fn margins(&self, features: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        let classes = self.classes();
        let mut margins = vec![self.base_margin; classes];
        for (i, tree) in self.trees.iter().enumerate() {
            margins[i % classes] += tree.evaluate(features)?;
        }
        Ok(margins)
    }
}

fn softmax(margins: &[f32]) -> Vec<f32> {
    let max = margins.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = margins.iter().map(|m| (m - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

impl Classifier for TreeEnsemble {
    fn predict_probabilities(&self, features: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        check_feature_count(self.num_features, features)?;
        let margins = self.margins(features)?;
        let probabilities = match self.objective {
            Objective::BinaryLogistic => {
                let p = sigmoid(margins[0]);
                vec![1.0 - p, p]
            }
            Objective::MultiSoftprob => softmax(&margins),
        };
        if let Some(bad) = probabilities.iter().find(|p| !p.is_finite()) {
            return Err(ClassifierError::Inference(format!("non-finite probability {bad}")));
        }
        Ok(probabilities)
    }

    fn output_len(&self) -> Option<usize> {
        Some(match self.objective {
            Objective::BinaryLogistic => 2,
            Objective::MultiSoftprob => self.num_class,
        })
    }
}
