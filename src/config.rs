//! Resizer configuration.
//!
//! Handles loading, validating, and merging `config.toml`. User values are
//! merged on top of stock defaults, so a config file only needs the keys it
//! wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! display_scale = 1.0       # Output pixel density (pixels per logical unit)
//! filter = "bicubic"        # Resampling: nearest | bilinear | bicubic
//!
//! [processing]
//! max_workers = 4           # Max background workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Filter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Resizer configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Pixels per logical unit on the output canvas.
    pub display_scale: f32,
    /// Resampling quality for scaled draws.
    pub filter: Filter,
    /// Background worker settings.
    pub processing: ProcessingConfig,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            display_scale: 1.0,
            filter: Filter::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl ResizeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.display_scale.is_finite() && self.display_scale > 0.0) {
            return Err(ConfigError::Validation(
                "display_scale must be a positive number".into(),
            ));
        }
        if self.processing.max_workers == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_workers must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Background worker settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of background resize workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ResizeConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ResizeConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ResizeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file, or stock defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<ResizeConfig, ConfigError> {
    let overlay = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Resize Configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Output pixel density: pixels per logical unit on the output canvas.
# A 50x50 resize at display_scale = 2.0 produces a 100x100 pixel image.
display_scale = 1.0

# Resampling quality when the source is scaled: nearest, bilinear or bicubic.
# Unit-scale draws on the pixel grid are always sampled exactly.
filter = "bicubic"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum background resize workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_workers = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = ResizeConfig::default();
        assert_eq!(config.display_scale, 1.0);
        assert_eq!(config.filter, Filter::Bicubic);
        assert_eq!(config.processing.max_workers, None);
    }

    #[test]
    fn parse_partial_config() {
        let config: ResizeConfig = toml::from_str("filter = \"nearest\"").unwrap();
        assert_eq!(config.filter, Filter::Nearest);
        assert_eq!(config.display_scale, 1.0);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<ResizeConfig, _> = toml::from_str("quality = 90");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_non_positive_scale() {
        let config = ResizeConfig {
            display_scale: 0.0,
            ..ResizeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let config = ResizeConfig {
            processing: ProcessingConfig {
                max_workers: Some(0),
            },
            ..ResizeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn effective_threads_clamps_to_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let huge = ProcessingConfig {
            max_workers: Some(cores + 100),
        };
        assert_eq!(effective_threads(&huge), cores);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
        assert_eq!(
            effective_threads(&ProcessingConfig {
                max_workers: Some(1)
            }),
            1
        );
    }

    // =========================================================================
    // merge / load tests
    // =========================================================================

    #[test]
    fn merge_preserves_untouched_keys() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[processing]\nmax_workers = 2").unwrap();
        let config: ResizeConfig = merge_toml(base, overlay).try_into().unwrap();
        assert_eq!(config.processing.max_workers, Some(2));
        assert_eq!(config.filter, Filter::Bicubic);
    }

    #[test]
    fn load_config_defaults_without_path() {
        assert_eq!(load_config(None).unwrap(), ResizeConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "display_scale = 2.0\nfilter = \"bilinear\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.display_scale, 2.0);
        assert_eq!(config.filter, Filter::Bilinear);
    }

    #[test]
    fn load_config_validates_after_merge() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "display_scale = -1.0\n").unwrap();

        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_config_invalid_toml_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "display_scale = [").unwrap();

        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: ResizeConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, ResizeConfig::default());
    }
}
