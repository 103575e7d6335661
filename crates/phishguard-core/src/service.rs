//! The service object callers hold: built once at startup, shared by reference.
//!
//! Everything it owns is immutable after construction except the prediction
//! cache, which is internally synchronized, so `&PhishGuard` (or
//! `Arc<PhishGuard>`) is all concurrent callers need.

use std::sync::Arc;

use serde::Serialize;

use crate::adapter::{ClassificationAdapter, PredictionResult};
use crate::classifier::{load_artifacts, Classifier, LabelDecoder};
use crate::config::{ArtifactConfig, PhishGuardConfig};
use crate::error::{LoadError, PredictError};
use crate::features::{FeatureExtractor, FeatureRecord};
use crate::predictor::{MemoizingPredictor, PredictionEngine};
use crate::reference::{load_top_domains, ReferenceData};
use crate::url_model::normalize_url;

/// Readiness snapshot (what a `/health` probe would report).
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub model_loaded: bool,
    pub classes: Vec<String>,
    pub top_domains: usize,
    pub cached_predictions: usize,
    pub cache_capacity: usize,
}

pub struct PhishGuard {
    reference: Arc<ReferenceData>,
    predictor: MemoizingPredictor,
}

impl PhishGuard {
    /// Assemble a service from already-loaded parts.
    pub fn new(
        reference: ReferenceData,
        classifier: Arc<dyn Classifier>,
        decoder: Arc<dyn LabelDecoder>,
        cache_capacity: usize,
    ) -> Result<Self, LoadError> {
        let reference = Arc::new(reference);
        let adapter = ClassificationAdapter::new(classifier, decoder)?;
        let engine = PredictionEngine::new(FeatureExtractor::new(Arc::clone(&reference)), adapter);
        Ok(Self {
            reference,
            predictor: MemoizingPredictor::new(engine, cache_capacity),
        })
    }

    /// Startup loader: reference list, then primary (or fallback) artifacts.
    /// Any failure is fatal; the caller must not serve predictions.
    pub fn from_config(cfg: &PhishGuardConfig) -> anyhow::Result<Self> {
        let top_domains_path = cfg.resolve(&cfg.top_domains)?;
        let domains = load_top_domains(&top_domains_path)?;
        let reference = ReferenceData::new(domains, cfg.top_domain_count);

        let mut candidates = vec![resolve_set(cfg, &cfg.primary)?];
        if let Some(fallback) = &cfg.fallback {
            candidates.push(resolve_set(cfg, fallback)?);
        }
        let loaded = load_artifacts(&candidates)?;

        let service = Self::new(
            reference,
            loaded.classifier,
            loaded.decoder,
            cfg.cache_capacity,
        )?;
        tracing::info!(
            top_domains = service.reference.top_domains().len(),
            cache_capacity = cfg.cache_capacity,
            "phishguard service ready"
        );
        Ok(service)
    }

    /// Classify a raw URL. Malformed URLs still get a prediction; only a
    /// classifier failure is an error.
    pub fn predict(&self, url: &str) -> Result<PredictionResult, PredictError> {
        let normalized = normalize_url(url);
        tracing::debug!(raw = url, normalized = %normalized, "predict");
        self.predictor.predict(&normalized)
    }

    /// Features of the normalized URL, computed without touching the cache.
    pub fn features(&self, url: &str) -> FeatureRecord {
        self.predictor.engine().features(&normalize_url(url))
    }

    /// Swap in a new model; cached predictions from the old one are dropped
    /// in the same step.
    pub fn replace_model(
        &self,
        classifier: Arc<dyn Classifier>,
        decoder: Arc<dyn LabelDecoder>,
    ) -> Result<(), LoadError> {
        let adapter = ClassificationAdapter::new(classifier, decoder)?;
        let engine = PredictionEngine::new(FeatureExtractor::new(Arc::clone(&self.reference)), adapter);
        self.predictor.replace_engine(engine);
        Ok(())
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn predictor(&self) -> &MemoizingPredictor {
        &self.predictor
    }

    pub fn health(&self) -> HealthStatus {
        let engine = self.predictor.engine();
        HealthStatus {
            status: "healthy",
            model_loaded: true,
            classes: engine.adapter().classes().to_vec(),
            top_domains: self.reference.top_domains().len(),
            cached_predictions: self.predictor.cached_len(),
            cache_capacity: self.predictor.capacity(),
        }
    }
}

fn resolve_set(cfg: &PhishGuardConfig, set: &ArtifactConfig) -> anyhow::Result<ArtifactConfig> {
    Ok(ArtifactConfig {
        model: cfg.resolve(&set.model)?,
        encoder: cfg.resolve(&set.encoder)?,
        model_sha256: set.model_sha256.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{LabelEncoder, LogisticModel};
    use crate::features::FEATURE_COUNT;

    fn service() -> PhishGuard {
        // Positive ("good") score rises with has_https and is_top_domain.
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[3] = 2.0;
        weights[10] = 2.0;
        let model = LogisticModel {
            weights,
            bias: -2.0,
            single_score: false,
        };
        PhishGuard::new(
            ReferenceData::new(["google.com"], 100),
            Arc::new(model),
            Arc::new(LabelEncoder::new(["bad", "good"])),
            16,
        )
        .unwrap()
    }

    #[test]
    fn predict_normalizes_before_caching() {
        let svc = service();
        let a = svc.predict("google.com").unwrap();
        let b = svc.predict("  https://google.com ").unwrap();
        assert_eq!(a, b);
        assert_eq!(svc.predictor().cached_len(), 1);
        assert!(svc.predictor().is_cached("https://google.com"));
        assert_eq!(a.predicted_label, "good");
    }

    #[test]
    fn features_use_normalized_url() {
        let svc = service();
        let f = svc.features("paypal-verify-account.tk");
        assert!(f.has_https);
        assert!(f.suspicious_tld);
        assert_eq!(f.url_length, "https://paypal-verify-account.tk".len());
    }

    #[test]
    fn health_reports_model_and_cache() {
        let svc = service();
        svc.predict("http://192.168.1.1/login").unwrap();
        let health = svc.health();
        assert!(health.model_loaded);
        assert_eq!(health.classes, vec!["bad", "good"]);
        assert_eq!(health.top_domains, 1);
        assert_eq!(health.cached_predictions, 1);
        assert_eq!(health.cache_capacity, 16);
    }

    #[test]
    fn replace_model_rejects_mismatched_decoder() {
        let svc = service();
        let model = LogisticModel {
            weights: vec![0.0; FEATURE_COUNT],
            bias: 0.0,
            single_score: true,
        };
        let err = svc
            .replace_model(Arc::new(model), Arc::new(LabelEncoder::new(["only"])))
            .unwrap_err();
        assert!(matches!(err, LoadError::LabelMismatch { .. }));
    }
}
