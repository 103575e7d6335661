//! Error types for startup loading and per-request prediction.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal startup failure: the service must not accept prediction requests.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An artifact or reference file could not be read.
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An artifact was read but its contents are not a valid model/encoder.
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The artifact parsed but is structurally unusable.
    #[error("invalid artifact {path}: {reason}")]
    InvalidArtifact { path: PathBuf, reason: String },
    /// Model file digest does not match the configured SHA-256.
    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
    /// The classifier's class count and the decoder's labels disagree.
    #[error("label decoder has {labels} class(es); classifier needs at least {required}")]
    LabelMismatch { labels: usize, required: usize },
    /// Two class indices decode to the same label.
    #[error("label decoder repeats class label {label:?}")]
    DuplicateLabel { label: String },
    /// Primary and fallback artifact sets both failed.
    #[error("failed to load any model (tried {attempts} artifact set(s)); last error: {last}")]
    NoUsableModel { attempts: usize, last: Box<LoadError> },
}

/// Raised by a classifier when inference itself fails.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Request-scoped failure. Never cached; never fatal to the process.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error("classifier returned an empty probability vector")]
    EmptyOutput,
    #[error("classifier returned a non-finite or out-of-range probability at index {index}: {value}")]
    InvalidProbability { index: usize, value: f32 },
    #[error("classifier probabilities sum to {sum}, not 1")]
    UnnormalizedOutput { sum: f32 },
    #[error("label decoder has no label for class index {0}")]
    UnknownClass(usize),
}
