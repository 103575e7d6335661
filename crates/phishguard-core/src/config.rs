use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One model + label encoder pair, plus an optional digest for the model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Serialized classifier (JSON).
    pub model: PathBuf,
    /// Serialized label encoder (JSON, `{"classes": [...]}`).
    pub encoder: PathBuf,
    /// Expected lowercase hex SHA-256 of the model file; skipped when absent.
    #[serde(default)]
    pub model_sha256: Option<String>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("models/model.json"),
            encoder: PathBuf::from("models/label_encoder.json"),
            model_sha256: None,
        }
    }
}

/// Global configuration loaded from `~/.config/phishguard/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhishGuardConfig {
    /// Base directory for relative artifact paths. `None` = `~/.local/share/phishguard`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Newline-delimited reference domain list.
    pub top_domains: PathBuf,
    /// How many leading entries of the reference list are used for matching and similarity.
    pub top_domain_count: usize,
    /// Maximum number of distinct normalized URLs kept in the prediction cache.
    pub cache_capacity: usize,
    /// Artifacts tried first at startup.
    pub primary: ArtifactConfig,
    /// Artifacts tried once if the primary set fails to load.
    #[serde(default)]
    pub fallback: Option<ArtifactConfig>,
    /// Log file. `None` = `~/.local/state/phishguard/phishguard.log`.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// `tracing` filter directives; `RUST_LOG` still wins when set.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for PhishGuardConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            top_domains: PathBuf::from("top_domains.txt"),
            top_domain_count: 100,
            cache_capacity: 1024,
            primary: ArtifactConfig::default(),
            fallback: None,
            log_file: None,
            log_filter: None,
        }
    }
}

impl PhishGuardConfig {
    /// Directory that relative paths are resolved against.
    pub fn base_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// Resolve `path` against the base dir unless it is already absolute.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        Ok(self.base_dir()?.join(path))
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("phishguard")?;
    Ok(xdg_dirs.get_data_home())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("phishguard")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PhishGuardConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PhishGuardConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file; a missing file is an error.
pub fn load_from_path(path: &Path) -> Result<PhishGuardConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: PhishGuardConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PhishGuardConfig::default();
        assert_eq!(cfg.top_domain_count, 100);
        assert_eq!(cfg.cache_capacity, 1024);
        assert_eq!(cfg.top_domains, PathBuf::from("top_domains.txt"));
        assert!(cfg.fallback.is_none());
        assert!(cfg.primary.model_sha256.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PhishGuardConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PhishGuardConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.top_domain_count, cfg.top_domain_count);
        assert_eq!(parsed.cache_capacity, cfg.cache_capacity);
        assert_eq!(parsed.primary, cfg.primary);
    }

    #[test]
    fn config_toml_with_fallback() {
        let toml = r#"
            data_dir = "/srv/phishguard"
            top_domains = "lists/top.txt"
            top_domain_count = 500
            cache_capacity = 64

            [primary]
            model = "models/xgb.json"
            encoder = "models/xgb_labels.json"
            model_sha256 = "abc123"

            [fallback]
            model = "/opt/models/logistic.json"
            encoder = "/opt/models/labels.json"
        "#;
        let cfg: PhishGuardConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.top_domain_count, 500);
        assert_eq!(cfg.cache_capacity, 64);
        assert_eq!(cfg.primary.model_sha256.as_deref(), Some("abc123"));
        let fallback = cfg.fallback.as_ref().unwrap();
        assert_eq!(fallback.model, PathBuf::from("/opt/models/logistic.json"));
        assert!(fallback.model_sha256.is_none());
    }

    #[test]
    fn default_data_dir_is_prefixed_data_home() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_DATA_HOME", dir.path());
        assert_eq!(default_data_dir().unwrap(), dir.path().join("phishguard"));

        let cfg = PhishGuardConfig::default();
        assert_eq!(
            cfg.resolve(Path::new("top_domains.txt")).unwrap(),
            dir.path().join("phishguard").join("top_domains.txt")
        );
    }

    #[test]
    fn logging_keys_are_optional() {
        let cfg: PhishGuardConfig = toml::from_str(
            r#"
            top_domains = "top.txt"
            top_domain_count = 10
            cache_capacity = 8
            log_filter = "warn,phishguard_core=info"

            [primary]
            model = "m.json"
            encoder = "e.json"
        "#,
        )
        .unwrap();
        assert!(cfg.log_file.is_none());
        assert_eq!(cfg.log_filter.as_deref(), Some("warn,phishguard_core=info"));
    }

    #[test]
    fn resolve_relative_against_data_dir() {
        let cfg = PhishGuardConfig {
            data_dir: Some(PathBuf::from("/srv/pg")),
            ..Default::default()
        };
        assert_eq!(
            cfg.resolve(Path::new("top_domains.txt")).unwrap(),
            PathBuf::from("/srv/pg/top_domains.txt")
        );
        assert_eq!(
            cfg.resolve(Path::new("/etc/top.txt")).unwrap(),
            PathBuf::from("/etc/top.txt")
        );
    }
}
