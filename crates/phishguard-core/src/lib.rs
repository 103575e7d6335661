pub mod config;
pub mod logging;

pub mod adapter;
pub mod checksum;
pub mod classifier;
pub mod error;
pub mod features;
pub mod predictor;
pub mod reference;
pub mod service;
pub mod url_model;

pub use adapter::{ClassificationAdapter, PredictionResult};
pub use error::{ClassifierError, LoadError, PredictError};
pub use features::{FeatureExtractor, FeatureRecord, FEATURE_NAMES};
pub use service::{HealthStatus, PhishGuard};
pub use url_model::normalize_url;
