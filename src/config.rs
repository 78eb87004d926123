//! Run configuration: which source to read and how to query it.
//!
//! Defaults reproduce the classic report: `telemetry.txt`, sort on column 0,
//! search column 2 for `ERROR`, keep rows whose column 3 exceeds 100, and two
//! seeded sensor alerts. With the `config` feature, values can be loaded from
//! a TOML file; missing keys keep their defaults.

use crate::error::{Result, TelelogError};
use crate::file_handler::SourceSpec;
use crate::query::Threshold;
use std::path::PathBuf;

#[cfg(feature = "config")]
use serde::Deserialize;
#[cfg(feature = "config")]
use std::path::Path;

/// An alert registered at the end of every run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
pub struct AlertSeed {
    pub priority: i32,
    pub message: String,
}

impl AlertSeed {
    pub fn new(priority: i32, message: impl Into<String>) -> Self {
        Self {
            priority,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct RunConfig {
    /// Telemetry file, or `-` for standard input
    pub source: PathBuf,
    pub sort_column: usize,
    pub search_column: usize,
    pub keyword: String,
    pub filter_column: usize,
    pub threshold: f64,
    pub alerts: Vec<AlertSeed>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("telemetry.txt"),
            sort_column: 0,
            search_column: 2,
            keyword: "ERROR".to_string(),
            filter_column: 3,
            threshold: 100.0,
            alerts: vec![
                AlertSeed::new(1, "Critical failure in sensor 3!"),
                AlertSeed::new(2, "Maintenance required for sensor 5."),
            ],
        }
    }
}

impl RunConfig {
    pub fn source_spec(&self) -> SourceSpec {
        SourceSpec::from_path(&self.source)
    }

    pub fn threshold(&self) -> Threshold {
        Threshold::new(self.filter_column, self.threshold)
    }

    pub fn validate(&self) -> Result<()> {
        if self.keyword.is_empty() {
            return Err(TelelogError::config("keyword must be non-empty"));
        }
        if !self.threshold.is_finite() {
            return Err(TelelogError::config(format!(
                "threshold must be a finite number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Parse and validate configuration from TOML text.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: RunConfig =
            toml::from_str(s).map_err(|e| TelelogError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    #[cfg(feature = "config")]
    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            TelelogError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&s)
    }

    /// `<config dir>/telelog/config.toml`, when the platform has a config dir
    #[cfg(feature = "config")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("telelog").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_report() {
        let config = RunConfig::default();
        assert_eq!(config.source_spec(), SourceSpec::File("telemetry.txt".into()));
        assert_eq!(config.threshold(), Threshold::new(3, 100.0));
        assert_eq!(config.alerts.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let empty_keyword = RunConfig {
            keyword: String::new(),
            ..RunConfig::default()
        };
        assert!(matches!(
            empty_keyword.validate(),
            Err(TelelogError::ConfigError { .. })
        ));

        let infinite = RunConfig {
            threshold: f64::INFINITY,
            ..RunConfig::default()
        };
        assert!(infinite.validate().is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_partial_overrides() {
        let config = RunConfig::from_toml_str(
            r#"
source = "-"
keyword = "WARN"
threshold = 42.5

[[alerts]]
priority = 7
message = "Pressure drop on line 2"
"#,
        )
        .unwrap();

        assert_eq!(config.source_spec(), SourceSpec::Stdin);
        assert_eq!(config.keyword, "WARN");
        assert_eq!(config.threshold, 42.5);
        assert_eq!(config.search_column, 2);
        assert_eq!(config.alerts, vec![AlertSeed::new(7, "Pressure drop on line 2")]);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_rejects_bad_input() {
        assert!(RunConfig::from_toml_str("keyword = \"\"").is_err());
        assert!(RunConfig::from_toml_str("sort_column = -1").is_err());
        assert!(RunConfig::from_toml_str("unknown_key = 1").is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "sort_column = 1\n").unwrap();

        assert_eq!(RunConfig::load(&path).unwrap().sort_column, 1);
        assert!(RunConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
