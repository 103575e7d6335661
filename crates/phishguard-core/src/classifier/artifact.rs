//! Startup loading of model + label encoder artifacts, with one fallback set.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{Classifier, LabelDecoder, LabelEncoder, LogisticModel, TreeEnsemble};
use crate::adapter::check_labels;
use crate::checksum;
use crate::config::ArtifactConfig;
use crate::error::LoadError;
use crate::features::FEATURE_COUNT;

/// Serialized model, discriminated by `"kind"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    GradientBoostedTrees(TreeEnsemble),
    Logistic(LogisticModel),
}

impl ModelArtifact {
    fn input_len(&self) -> usize {
        match self {
            ModelArtifact::GradientBoostedTrees(m) => m.num_features,
            ModelArtifact::Logistic(m) => m.weights.len(),
        }
    }

    fn into_classifier(self, path: &Path) -> Result<Arc<dyn Classifier>, LoadError> {
        let invalid = |reason: String| LoadError::InvalidArtifact {
            path: path.to_path_buf(),
            reason,
        };
        if self.input_len() != FEATURE_COUNT {
            return Err(invalid(format!(
                "model expects {} features, extractor produces {FEATURE_COUNT}",
                self.input_len()
            )));
        }
        Ok(match self {
            ModelArtifact::GradientBoostedTrees(m) => {
                m.validate().map_err(invalid)?;
                Arc::new(m)
            }
            ModelArtifact::Logistic(m) => Arc::new(m),
        })
    }
}

/// A classifier/decoder pair ready to serve.
#[derive(Clone)]
pub struct LoadedArtifacts {
    pub classifier: Arc<dyn Classifier>,
    pub decoder: Arc<dyn LabelDecoder>,
    /// Model file the pair was loaded from.
    pub source: PathBuf,
}

impl std::fmt::Debug for LoadedArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedArtifacts")
            .field("classes", &self.decoder.classes())
            .field("source", &self.source)
            .finish()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and validates one model file, verifying its digest when given.
pub fn load_classifier(path: &Path, sha256: Option<&str>) -> Result<Arc<dyn Classifier>, LoadError> {
    if let Some(expected) = sha256 {
        checksum::verify_sha256(path, expected)?;
    }
    let artifact: ModelArtifact = read_json(path)?;
    artifact.into_classifier(path)
}

fn load_set(set: &ArtifactConfig) -> Result<LoadedArtifacts, LoadError> {
    let classifier = load_classifier(&set.model, set.model_sha256.as_deref())?;
    let encoder: LabelEncoder = read_json(&set.encoder)?;
    let decoder: Arc<dyn LabelDecoder> = Arc::new(encoder);
    check_labels(classifier.as_ref(), decoder.as_ref())?;
    Ok(LoadedArtifacts {
        classifier,
        decoder,
        source: set.model.clone(),
    })
}

/// Tries each artifact set in order (primary first); the first that loads
/// wins. Paths must already be resolved. No retries beyond the list.
pub fn load_artifacts(candidates: &[ArtifactConfig]) -> Result<LoadedArtifacts, LoadError> {
    let mut last = None;
    for (attempt, set) in candidates.iter().enumerate() {
        match load_set(set) {
            Ok(loaded) => {
                tracing::info!(
                    model = %set.model.display(),
                    encoder = %set.encoder.display(),
                    classes = ?loaded.decoder.classes(),
                    fallback = attempt > 0,
                    "loaded model and label encoder"
                );
                return Ok(loaded);
            }
            Err(e) => {
                tracing::warn!(
                    model = %set.model.display(),
                    error = %e,
                    "model load failed"
                );
                last = Some(e);
            }
        }
    }
    let last = last.unwrap_or_else(|| LoadError::InvalidArtifact {
        path: PathBuf::new(),
        reason: "no artifact sets configured".to_string(),
    });
    Err(LoadError::NoUsableModel {
        attempts: candidates.len(),
        last: Box::new(last),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logistic_json(n: usize) -> String {
        serde_json::json!({
            "kind": "logistic",
            "weights": vec![0.0; n],
            "bias": 0.25,
        })
        .to_string()
    }

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_tagged_artifacts() {
        let artifact: ModelArtifact = serde_json::from_str(&logistic_json(16)).unwrap();
        assert!(matches!(artifact, ModelArtifact::Logistic(_)));
    }

    #[test]
    fn rejects_wrong_feature_count() {
        let dir = tempfile::tempdir().unwrap();
        let model = write(dir.path(), "m.json", &logistic_json(3));
        let err = load_classifier(&model, None).err().unwrap();
        assert!(matches!(err, LoadError::InvalidArtifact { .. }));
    }

    #[test]
    fn primary_then_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let good_model = write(dir.path(), "good.json", &logistic_json(16));
        let encoder = write(dir.path(), "labels.json", r#"{"classes": ["bad", "good"]}"#);
        let broken = write(dir.path(), "broken.json", "{not json");

        let primary = ArtifactConfig {
            model: broken.clone(),
            encoder: encoder.clone(),
            model_sha256: None,
        };
        let fallback = ArtifactConfig {
            model: good_model.clone(),
            encoder,
            model_sha256: None,
        };
        let loaded = load_artifacts(&[primary.clone(), fallback]).unwrap();
        assert_eq!(loaded.source, good_model);
        assert_eq!(loaded.decoder.classes(), &["bad", "good"]);

        let err = load_artifacts(&[primary]).unwrap_err();
        match err {
            LoadError::NoUsableModel { attempts, last } => {
                assert_eq!(attempts, 1);
                assert!(matches!(*last, LoadError::Parse { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn checksum_mismatch_blocks_load() {
        let dir = tempfile::tempdir().unwrap();
        let model = write(dir.path(), "m.json", &logistic_json(16));
        let encoder = write(dir.path(), "labels.json", r#"{"classes": ["bad", "good"]}"#);
        let set = ArtifactConfig {
            model,
            encoder,
            model_sha256: Some("00".repeat(32)),
        };
        let err = load_artifacts(&[set]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::NoUsableModel { ref last, .. } if matches!(**last, LoadError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn too_few_labels_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let model = write(dir.path(), "m.json", &logistic_json(16));
        let encoder = write(dir.path(), "labels.json", r#"{"classes": ["bad"]}"#);
        let set = ArtifactConfig {
            model,
            encoder,
            model_sha256: None,
        };
        assert!(load_artifacts(&[set]).is_err());
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let model = write(dir.path(), "m.json", &logistic_json(16));
        let encoder = write(dir.path(), "labels.json", r#"{"classes": ["bad", "bad"]}"#);
        let set = ArtifactConfig {
            model,
            encoder,
            model_sha256: None,
        };
        let err = load_artifacts(&[set]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::NoUsableModel { ref last, .. } if matches!(**last, LoadError::DuplicateLabel { .. })
        ));
    }

    #[test]
    fn empty_candidate_list() {
        let err = load_artifacts(&[]).unwrap_err();
        assert!(matches!(err, LoadError::NoUsableModel { attempts: 0, .. }));
    }
}
