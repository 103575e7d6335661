//! Shared fixtures: call-counting stub classifier and on-disk artifacts.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use phishguard_core::classifier::{Classifier, LabelEncoder};
use phishguard_core::error::ClassifierError;
use phishguard_core::reference::ReferenceData;
use phishguard_core::PhishGuard;

pub const TOP_DOMAINS: &str = "google.com\nyoutube.com\n\nfacebook.com\npaypal.com\namazon.com\n";

/// Returns a fixed-shape output derived from `has_https` and counts calls.
pub struct CountingClassifier {
    pub calls: Arc<AtomicUsize>,
    pub outputs: usize,
}

impl CountingClassifier {
    pub fn new(outputs: usize) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                outputs,
            },
            calls,
        )
    }
}

impl Classifier for CountingClassifier {
    fn predict_probabilities(&self, features: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let positive = if features[3] > 0.0 { 0.75 } else { 0.2 };
        Ok(match self.outputs {
            1 => vec![positive],
            2 => vec![1.0 - positive, positive],
            n => {
                let mut out = vec![0.0; n];
                out[0] = 1.0 - positive;
                out[1] = positive;
                out
            }
        })
    }

    fn output_len(&self) -> Option<usize> {
        Some(self.outputs)
    }
}

pub fn labels() -> LabelEncoder {
    LabelEncoder::new(["bad", "good"])
}

pub fn reference() -> ReferenceData {
    ReferenceData::new(phishguard_core::reference::parse_domain_list(TOP_DOMAINS), 100)
}

/// Service over a binary counting stub; returns the call counter too.
pub fn counting_service(capacity: usize) -> (PhishGuard, Arc<AtomicUsize>) {
    let (classifier, calls) = CountingClassifier::new(2);
    let svc = PhishGuard::new(reference(), Arc::new(classifier), Arc::new(labels()), capacity)
        .expect("service");
    (svc, calls)
}

pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Binary tree ensemble: one stump on `suspicious_tld`, one on `is_top_domain`.
pub fn tree_model_json() -> String {
    serde_json::json!({
        "kind": "gradient_boosted_trees",
        "num_features": 16,
        "objective": "binary:logistic",
        "trees": [
            { "nodes": [
                { "feature": 11, "threshold": 0.5, "yes": 1, "no": 2 },
                { "leaf": 0.4 },
                { "leaf": -2.5 }
            ] },
            { "nodes": [
                { "feature": 10, "threshold": 0.5, "yes": 1, "no": 2 },
                { "leaf": -0.6 },
                { "leaf": 2.0 }
            ] }
        ]
    })
    .to_string()
}

pub const ENCODER_JSON: &str = r#"{"classes": ["bad", "good"]}"#;
