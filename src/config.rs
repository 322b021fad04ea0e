//! Seedscope configuration helpers.
//!
//! This module loads, validates, and normalizes the JSON config so every entry
//! point resolves the catalog and display settings the same way.
use crate::catalog::{MapType, NightlordChoice};
use crate::filter::GroundTruthSource;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current schema version for `config.json`.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;
/// Catalog location used when nothing else is configured.
pub const DEFAULT_CATALOG_PATH: &str = "dataset/dataset.json";
/// Directory holding per-seed pattern images.
pub const DEFAULT_PATTERN_DIR: &str = "assets/pattern-zh-CN";
const CONFIG_DIR_NAME: &str = "seedscope";
const CONFIG_FILE_NAME: &str = "config.json";

/// Language used for nightlord and map labels.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn nightlord_label(&self, choice: NightlordChoice) -> &'static str {
        match self {
            Locale::En => choice.as_str(),
            Locale::Zh => choice.zh_name(),
        }
    }

    pub fn map_label(&self, map_type: MapType) -> &'static str {
        match self {
            Locale::En => map_type.as_str(),
            Locale::Zh => map_type.zh_name(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SeedscopeConfig {
    pub schema_version: u32,
    pub catalog_path: String,
    #[serde(default)]
    pub ground_truth: GroundTruthSource,
    #[serde(default = "default_pattern_dir")]
    pub pattern_dir: String,
    #[serde(default)]
    pub locale: Locale,
}

fn default_pattern_dir() -> String {
    DEFAULT_PATTERN_DIR.to_string()
}

/// A validated config plus the directory its relative paths resolve against.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: SeedscopeConfig,
    pub base_dir: PathBuf,
    pub source: Option<PathBuf>,
}

impl ResolvedConfig {
    pub fn catalog_path(&self) -> PathBuf {
        self.resolve(&self.config.catalog_path)
    }

    /// Pattern image for a seed, `<pattern_dir>/<NNN>.jpg`.
    pub fn pattern_image(&self, seed_number: u32) -> PathBuf {
        self.resolve(&self.config.pattern_dir)
            .join(format!("{}.jpg", crate::catalog::padded_seed(seed_number)))
    }

    fn resolve(&self, rel: &str) -> PathBuf {
        let path = Path::new(rel);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Build the default config used when no file exists.
pub fn default_config() -> SeedscopeConfig {
    SeedscopeConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        catalog_path: DEFAULT_CATALOG_PATH.to_string(),
        ground_truth: GroundTruthSource::PoiDatabase,
        pattern_dir: default_pattern_dir(),
        locale: Locale::En,
    }
}

/// Per-user config location, e.g. `~/.config/seedscope/config.json`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

pub fn load_config(path: &Path) -> Result<SeedscopeConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: SeedscopeConfig =
        serde_json::from_slice(&bytes).context("parse seedscope config JSON")?;
    Ok(config)
}

/// Persist a config to disk in a stable JSON format.
pub fn write_config(path: &Path, config: &SeedscopeConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(config).context("serialize seedscope config")?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn validate_config(config: &SeedscopeConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported seedscope config schema_version {}",
            config.schema_version
        ));
    }
    if config.catalog_path.trim().is_empty() {
        return Err(anyhow!("catalog_path must be non-empty"));
    }
    if config.pattern_dir.trim().is_empty() {
        return Err(anyhow!("pattern_dir must be non-empty"));
    }
    Ok(())
}

/// Pick the config for this run: an explicit path, else the per-user file if
/// present, else defaults relative to the working directory.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<ResolvedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => user_config_path().filter(|path| path.is_file()),
    };
    let Some(path) = candidate else {
        return Ok(ResolvedConfig {
            config: default_config(),
            base_dir: cwd.to_path_buf(),
            source: None,
        });
    };
    let config = load_config(&path)?;
    validate_config(&config).with_context(|| format!("validate {}", path.display()))?;
    let base_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => cwd.to_path_buf(),
    };
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(ResolvedConfig {
        config,
        base_dir,
        source: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_round_trips_and_validates() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nested").join("config.json");
        write_config(&path, &default_config()).expect("write config");
        let loaded = load_config(&path).expect("load config");
        assert_eq!(loaded, default_config());
        validate_config(&loaded).expect("default config is valid");
        let text = std::fs::read_to_string(&path).expect("read config");
        assert!(text.contains("\"catalog_path\""));
    }

    #[test]
    fn rejects_wrong_schema_and_empty_catalog() {
        let mut config = default_config();
        config.schema_version = 99;
        assert!(validate_config(&config).is_err());

        let mut config = default_config();
        config.catalog_path = "  ".to_string();
        let err = validate_config(&config).expect_err("empty catalog path");
        assert!(err.to_string().contains("catalog_path"));
    }

    #[test]
    fn optional_fields_take_defaults() {
        let config: SeedscopeConfig =
            serde_json::from_str(r#"{"schema_version": 1, "catalog_path": "data.json"}"#)
                .expect("parse minimal config");
        assert_eq!(config.ground_truth, GroundTruthSource::PoiDatabase);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.pattern_dir, DEFAULT_PATTERN_DIR);
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.json");
        let mut config = default_config();
        config.catalog_path = "seeds.json".to_string();
        config.ground_truth = GroundTruthSource::Classifications;
        write_config(&path, &config).expect("write config");

        let cwd = Path::new("/nonexistent-cwd");
        let resolved = resolve_config(Some(&path), cwd).expect("resolve config");
        assert_eq!(resolved.catalog_path(), dir.path().join("seeds.json"));
        assert_eq!(resolved.config.ground_truth, GroundTruthSource::Classifications);
        assert_eq!(
            resolved.pattern_image(7),
            dir.path().join(DEFAULT_PATTERN_DIR).join("007.jpg")
        );
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = resolve_config(Some(&dir.path().join("absent.json")), dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn zh_locale_uses_localized_labels() {
        assert_eq!(Locale::Zh.map_label(MapType::Noklateo), "隐城");
        assert_eq!(Locale::Zh.nightlord_label(NightlordChoice::Unknown), "未知");
        assert_eq!(Locale::En.map_label(MapType::RottedWoods), "Rotted Woods");
    }
}
