//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default birth date
//! - Forecast horizon and its permitted range
//! - Near-zero thresholds for critical-day detection
//! - Display settings for text output
//!
//! Configuration is stored at `~/.config/mindcast/config.toml`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::criticality::{FORECAST_NEAR_ZERO_THRESHOLD, TODAY_NEAR_ZERO_THRESHOLD};
use crate::error::{ConfigError, Result};
use crate::input::HorizonLimits;
use crate::report::Thresholds;

/// Profile configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Birth date used when none is given on the command line.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// Forecast horizon configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default = "default_min_horizon_days")]
    pub min_horizon_days: u32,
    #[serde(default = "default_max_horizon_days")]
    pub max_horizon_days: u32,
}

/// Near-zero thresholds for the two views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_today_near_zero")]
    pub today_near_zero: f64,
    #[serde(default = "default_forecast_near_zero")]
    pub forecast_near_zero: f64,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_bar_width")]
    pub bar_width: u32,
    #[serde(default = "default_report_title")]
    pub report_title: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/mindcast/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_horizon_days() -> u32 {
    30
}
fn default_min_horizon_days() -> u32 {
    15
}
fn default_max_horizon_days() -> u32 {
    60
}
fn default_today_near_zero() -> f64 {
    TODAY_NEAR_ZERO_THRESHOLD
}
fn default_forecast_near_zero() -> f64 {
    FORECAST_NEAR_ZERO_THRESHOLD
}
fn default_bar_width() -> u32 {
    10
}
fn default_report_title() -> String {
    "Mind Forecast".into()
}

/// Fallback birth date when neither the CLI nor the config names one.
pub fn fallback_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2008, 1, 1).unwrap_or_default()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            min_horizon_days: default_min_horizon_days(),
            max_horizon_days: default_max_horizon_days(),
        }
    }
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            today_near_zero: default_today_near_zero(),
            forecast_near_zero: default_forecast_near_zero(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            report_title: default_report_title(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown().into());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(n) = value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                } else {
                    return Err(invalid(format!("cannot parse '{value}' as number")).into());
                }
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            // optional fields are cleared with "none"
            serde_json::Value::Null | serde_json::Value::String(_) if value == "none" => {
                serde_json::Value::Null
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let f = &self.forecast;
        if f.min_horizon_days == 0 {
            return Err(invalid("forecast.min_horizon_days", "must be at least 1".into()).into());
        }
        if f.min_horizon_days > f.max_horizon_days {
            return Err(invalid(
                "forecast.min_horizon_days",
                format!(
                    "must not exceed forecast.max_horizon_days ({})",
                    f.max_horizon_days
                ),
            )
            .into());
        }
        if f.horizon_days < f.min_horizon_days || f.horizon_days > f.max_horizon_days {
            return Err(invalid(
                "forecast.horizon_days",
                format!(
                    "must be between {} and {}",
                    f.min_horizon_days, f.max_horizon_days
                ),
            )
            .into());
        }

        for (key, value) in [
            ("thresholds.today_near_zero", self.thresholds.today_near_zero),
            ("thresholds.forecast_near_zero", self.thresholds.forecast_near_zero),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(invalid(key, format!("must be in [0, 1), got {value}")).into());
            }
        }

        if self.display.bar_width == 0 {
            return Err(invalid("display.bar_width", "must be at least 1".into()).into());
        }
        Ok(())
    }

    /// Horizon bounds used by input normalization.
    pub fn horizon_limits(&self) -> HorizonLimits {
        HorizonLimits {
            min: self.forecast.min_horizon_days,
            max: self.forecast.max_horizon_days,
        }
    }

    /// Near-zero thresholds for the single-day view and the forecast.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            today: self.thresholds.today_near_zero,
            forecast: self.thresholds.forecast_near_zero,
        }
    }

    /// Configured birth date, or the built-in fallback.
    pub fn birth_date(&self) -> NaiveDate {
        self.profile.birth_date.unwrap_or_else(fallback_birth_date)
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
            .into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting configuration is invalid.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default configuration");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.profile.birth_date, None);
        assert_eq!(cfg.birth_date(), NaiveDate::from_ymd_opt(2008, 1, 1).unwrap());
        assert_eq!(cfg.forecast.horizon_days, 30);
        assert_eq!(cfg.forecast.min_horizon_days, 15);
        assert_eq!(cfg.forecast.max_horizon_days, 60);
        assert_eq!(cfg.thresholds.today_near_zero, 0.05);
        assert_eq!(cfg.thresholds.forecast_near_zero, 0.01);
        assert_eq!(cfg.display.bar_width, 10);
        assert_eq!(cfg.display.report_title, "Mind Forecast");
        assert_eq!(cfg.thresholds(), Thresholds::default());
        assert_eq!(cfg.horizon_limits(), HorizonLimits::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[forecast]\nhorizon_days = 20\n").unwrap();
        assert_eq!(parsed.forecast.horizon_days, 20);
        assert_eq!(parsed.forecast.max_horizon_days, 60);
        assert_eq!(parsed.thresholds.forecast_near_zero, 0.01);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("forecast.horizon_days").as_deref(), Some("30"));
        assert_eq!(cfg.get("thresholds.today_near_zero").as_deref(), Some("0.05"));
        assert_eq!(cfg.get("display.report_title").as_deref(), Some("Mind Forecast"));
        assert_eq!(cfg.get("profile.birth_date").as_deref(), Some("null"));
        assert!(cfg.get("display.missing_key").is_none());
    }

    #[test]
    fn apply_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.apply("forecast.horizon_days", "45").unwrap();
        assert_eq!(cfg.forecast.horizon_days, 45);
        cfg.apply("thresholds.forecast_near_zero", "0.02").unwrap();
        assert_eq!(cfg.thresholds.forecast_near_zero, 0.02);
    }

    #[test]
    fn apply_sets_and_clears_birth_date() {
        let mut cfg = Config::default();
        cfg.apply("profile.birth_date", "1990-05-17").unwrap();
        assert_eq!(cfg.profile.birth_date, NaiveDate::from_ymd_opt(1990, 5, 17));
        cfg.apply("profile.birth_date", "none").unwrap();
        assert_eq!(cfg.profile.birth_date, None);
    }

    #[test]
    fn apply_rejects_bad_birth_date() {
        let mut cfg = Config::default();
        assert!(cfg.apply("profile.birth_date", "1990-13-40").is_err());
        assert_eq!(cfg.profile.birth_date, None);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(cfg.apply("display.nonexistent_key", "value").is_err());
        assert!(cfg.apply("nope", "value").is_err());
        assert!(cfg.apply("", "value").is_err());
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("display.bar_width", "wide").is_err());
        assert_eq!(cfg.display.bar_width, 10);
    }

    #[test]
    fn apply_rejects_horizon_outside_limits() {
        let mut cfg = Config::default();
        assert!(cfg.apply("forecast.horizon_days", "90").is_err());
        assert!(cfg.apply("forecast.min_horizon_days", "70").is_err());
        assert_eq!(cfg.forecast, ForecastConfig::default());
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("profile.birth_date", "1985-11-03").unwrap();
        cfg.apply("display.report_title", "My Rhythm").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "forecast = [[[").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
