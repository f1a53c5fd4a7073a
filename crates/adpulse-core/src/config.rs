use std::env::VarError;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Config file consulted when neither `--config` nor `ADPULSE_CONFIG` is set.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Delimited input file with one row per ad/day/audience.
    pub data_path: PathBuf,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub thresholds: Thresholds,
    pub output: OutputConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Creatives with CTR strictly below this are flagged.
    #[serde(default = "default_low_ctr")]
    pub low_ctr: f64,
    /// Fractional day-over-day ROAS drop that counts as a drop.
    #[serde(default = "default_roas_drop_pct")]
    pub roas_drop_pct: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_ctr: default_low_ctr(),
            roas_drop_pct: default_roas_drop_pct(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub reports_dir: PathBuf,
    pub logs_dir: PathBuf,
}

fn default_seed() -> u64 {
    42
}

fn default_low_ctr() -> f64 {
    0.02
}

fn default_roas_drop_pct() -> f64 {
    0.10
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load, override and validate the pipeline configuration from a YAML file.
///
/// Environment overrides are read from the process environment; see
/// [`load_config_from_str`] for the recognised variables.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, an override is
/// malformed, or the resulting config fails validation.
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_config_from_str(&content, |key| std::env::var(key))
}

/// Parse YAML content, then apply overrides through `lookup`.
///
/// Recognised overrides: `ADPULSE_DATA_PATH`, `ADPULSE_SEED`,
/// `ADPULSE_LOG_LEVEL`, `ADPULSE_LOW_CTR`, `ADPULSE_ROAS_DROP_PCT`.
///
/// # Errors
///
/// Returns `ConfigError` on YAML errors, unparseable overrides, or failed
/// validation.
pub fn load_config_from_str<F>(content: &str, lookup: F) -> Result<PipelineConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let mut config: PipelineConfig = serde_yaml::from_str(content)?;
    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config)?;
    Ok(config)
}

fn apply_env_overrides<F>(config: &mut PipelineConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let parse_f64 = |var: &str, raw: &str| -> Result<f64, ConfigError> {
        raw.trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    if let Ok(path) = lookup("ADPULSE_DATA_PATH") {
        config.data_path = PathBuf::from(path);
    }
    if let Ok(raw) = lookup("ADPULSE_SEED") {
        config.seed = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "ADPULSE_SEED".to_string(),
                reason: e.to_string(),
            })?;
    }
    if let Ok(level) = lookup("ADPULSE_LOG_LEVEL") {
        config.log_level = level;
    }
    if let Ok(raw) = lookup("ADPULSE_LOW_CTR") {
        config.thresholds.low_ctr = parse_f64("ADPULSE_LOW_CTR", &raw)?;
    }
    if let Ok(raw) = lookup("ADPULSE_ROAS_DROP_PCT") {
        config.thresholds.roas_drop_pct = parse_f64("ADPULSE_ROAS_DROP_PCT", &raw)?;
    }
    Ok(())
}

fn validate_config(config: &PipelineConfig) -> Result<(), ConfigError> {
    if config.data_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "data_path must be non-empty".to_string(),
        ));
    }

    let Thresholds {
        low_ctr,
        roas_drop_pct,
    } = config.thresholds;
    if !low_ctr.is_finite() || low_ctr <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "thresholds.low_ctr must be a positive number, got {low_ctr}"
        )));
    }
    if !roas_drop_pct.is_finite() || roas_drop_pct < 0.0 {
        return Err(ConfigError::Validation(format!(
            "thresholds.roas_drop_pct must be a non-negative number, got {roas_drop_pct}"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
