//! Configuration models for sysample.
//!
//! Everything the user may want to fix ahead of time (form defaults, a seed
//! for reproducible draws, where exports go) is parameterized here. The file
//! is optional: every field has a default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration for sysample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Values pre-filled into the parameter form
    #[serde(default)]
    pub defaults: FormDefaults,

    /// Randomness settings
    #[serde(default)]
    pub random: RandomConfig,

    /// Export settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Size limits
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Initial values of the parameter form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefaults {
    /// Grade label
    #[serde(default)]
    pub grade: String,

    /// Population size (N)
    #[serde(default = "default_total")]
    pub total: i64,

    /// Main sample size (n)
    #[serde(default = "default_sample_size")]
    pub sample_size: i64,

    /// Reserve list size
    #[serde(default = "default_reserve_size")]
    pub reserve_size: i64,
}

fn default_total() -> i64 {
    30
}

fn default_sample_size() -> i64 {
    6
}

fn default_reserve_size() -> i64 {
    3
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            grade: String::new(),
            total: default_total(),
            sample_size: default_sample_size(),
            reserve_size: default_reserve_size(),
        }
    }
}

/// Randomness configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomConfig {
    /// Fixed seed; when absent every run is independently randomized
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Size limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest population that will be sampled
    #[serde(default = "default_max_total")]
    pub max_total: usize,
}

fn default_max_total() -> usize {
    crate::sampling::DEFAULT_MAX_TOTAL
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_total: default_max_total(),
        }
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain-text report
    #[default]
    Text,
    /// JSON record with timestamp
    Json,
}

impl ExportFormat {
    /// File extension used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory exports are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Export format
    #[serde(default)]
    pub format: ExportFormat,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: ExportFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Load configuration if the file exists, otherwise fall back to defaults.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_form() {
        let config = Config::default();
        assert_eq!(config.defaults.total, 30);
        assert_eq!(config.defaults.sample_size, 6);
        assert_eq!(config.defaults.reserve_size, 3);
        assert_eq!(config.defaults.grade, "");
        assert_eq!(config.random.seed, None);
        assert_eq!(config.output.format, ExportFormat::Text);
        assert_eq!(config.output.dir, PathBuf::from("."));
        assert_eq!(config.limits.max_total, 1_000_000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sysample.toml");
        std::fs::write(
            &path,
            r#"
[defaults]
grade = "Grade 6"
total = 42

[output]
format = "json"

[limits]
max_total = 500
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.defaults.grade, "Grade 6");
        assert_eq!(config.defaults.total, 42);
        assert_eq!(config.defaults.sample_size, 6);
        assert_eq!(config.output.format, ExportFormat::Json);
        assert_eq!(config.output.format.extension(), "json");
        assert_eq!(config.random.seed, None);
        assert_eq!(config.limits.max_total, 500);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::FileRead { .. })
        ));
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "[random]\nseed = \"not a number\"\n").unwrap();

        assert!(matches!(
            Config::load_or_default(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
