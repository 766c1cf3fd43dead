//! TOML-based application configuration.
//!
//! Stores:
//! - The level-up threshold and the three task definitions
//! - Display preferences for the shell (progress bar, celebration messages)
//!
//! Configuration is stored at `~/.config/pplan/config.toml` unless the
//! caller passes an explicit path. Progress itself is never written here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::progress::ProgressConfig;

/// Display preferences for the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_progress_bar: bool,
    #[serde(default = "default_progress_bar_width")]
    pub progress_bar_width: u32,
    /// Print the celebration banner when the award fires.
    #[serde(default = "default_true")]
    pub celebrate: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pplan/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

fn default_true() -> bool {
    true
}
fn default_progress_bar_width() -> u32 {
    20
}

/// Widest progress bar the shell will draw.
pub const MAX_PROGRESS_BAR_WIDTH: u32 = 200;

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_progress_bar: true,
            progress_bar_width: default_progress_bar_width(),
            celebrate: true,
        }
    }
}

impl UiConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `progress_bar_width` is outside
    /// `1..=MAX_PROGRESS_BAR_WIDTH`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PROGRESS_BAR_WIDTH).contains(&self.progress_bar_width) {
            return Err(ConfigError::InvalidValue {
                key: "ui.progress_bar_width".into(),
                message: format!("must be between 1 and {MAX_PROGRESS_BAR_WIDTH}"),
            });
        }
        Ok(())
    }
}

fn child<'a>(value: &'a Value, part: &str) -> Option<&'a Value> {
    match value {
        Value::Array(items) => items.get(part.parse::<usize>().ok()?),
        other => other.get(part),
    }
}

fn child_mut<'a>(value: &'a mut Value, part: &str) -> Option<&'a mut Value> {
    match value {
        Value::Array(items) => items.get_mut(part.parse::<usize>().ok()?),
        other => other.get_mut(part),
    }
}

/// Parse `raw` into the same JSON type as `existing`.
fn parse_like(existing: &Value, raw: &str) -> Result<Value, ConfigError> {
    let parse_err = |what: &str| ConfigError::ParseFailed(format!("cannot parse '{raw}' as {what}"));
    match existing {
        Value::Bool(_) => raw
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|_| parse_err("bool")),
        Value::Number(_) => raw
            .parse::<u64>()
            .map(|n| Value::Number(n.into()))
            .map_err(|_| parse_err("number")),
        Value::Object(_) | Value::Array(_) => {
            serde_json::from_str(raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
        }
        _ => Ok(Value::String(raw.into())),
    }
}

impl Config {
    fn get_json_value_by_path<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = child(current, part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut Value, key: &str, value: &str) -> Result<(), ConfigError> {
        if key.is_empty() {
            return Err(ConfigError::UnknownKey(key.into()));
        }

        let mut current = root;
        for part in key.split('.') {
            current = child_mut(current, part).ok_or_else(|| ConfigError::UnknownKey(key.into()))?;
        }
        let parsed = parse_like(current, value)?;
        *current = parsed;
        Ok(())
    }

    /// Check both the progress options and the display preferences.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.progress.validate()?;
        self.ui.validate()
    }

    /// Default location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, if
    /// any of its values fail [`Config::validate`], or if the default config cannot be
    /// written.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                debug!(path = %path.display(), "loaded config");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                debug!(path = %path.display(), "wrote default config");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_err = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_err(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_err(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    ///
    /// Array elements are addressed by index, e.g. `progress.tasks.0.name`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. The caller decides when to save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed as
    /// the key's type, or the resulting config fails [`Config::validate`]. On
    /// error `self` is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.progress.level_up_threshold, 100);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("ui.celebrate").as_deref(), Some("true"));
        assert_eq!(cfg.get("progress.level_up_threshold").as_deref(), Some("100"));
        assert_eq!(cfg.get("progress.tasks.0.reward").as_deref(), Some("30"));
        assert_eq!(cfg.get("progress.tasks.2.name").as_deref(), Some("Pick one thing to do tomorrow 🤔"));
        assert!(cfg.get("ui.missing_key").is_none());
        assert!(cfg.get("progress.tasks.3.name").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("ui.celebrate", "false").unwrap();
        cfg.set("progress.level_up_threshold", "150").unwrap();
        cfg.set("progress.tasks.1.name", "Stretch").unwrap();
        cfg.set("progress.tasks.1.reward", "45").unwrap();

        assert!(!cfg.ui.celebrate);
        assert_eq!(cfg.progress.level_up_threshold, 150);
        assert_eq!(cfg.progress.tasks[1].name, "Stretch");
        assert_eq!(cfg.progress.tasks[1].reward, 45);
    }

    #[test]
    fn set_replaces_whole_task_list_from_json() {
        let mut cfg = Config::default();
        cfg.set(
            "progress.tasks",
            r#"[{"name":"a","reward":1},{"name":"b","reward":2},{"name":"c","reward":3}]"#,
        )
        .unwrap();
        assert_eq!(cfg.progress.tasks[2].reward, 3);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("ui.nonexistent_key", "value").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        let err = cfg.set("ui.celebrate", "not_a_bool").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn set_rejects_invalid_progress_and_keeps_old_value() {
        let mut cfg = Config::default();
        assert!(cfg.set("progress.level_up_threshold", "0").is_err());
        assert!(cfg.set("progress.tasks", r#"[{"name":"only","reward":1}]"#).is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_rejects_out_of_range_bar_width() {
        let mut cfg = Config::default();
        let err = cfg.set("ui.progress_bar_width", "4294967295").unwrap_err();
        assert!(err.to_string().contains("ui.progress_bar_width"));
        assert!(cfg.set("ui.progress_bar_width", "0").is_err());
        assert_eq!(cfg.ui.progress_bar_width, 20);

        cfg.set("ui.progress_bar_width", "200").unwrap();
        assert_eq!(cfg.ui.progress_bar_width, MAX_PROGRESS_BAR_WIDTH);
    }

    #[test]
    fn load_from_rejects_out_of_range_bar_width() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nprogress_bar_width = 100000\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set("progress.tasks.0.name", "Meditate").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.progress.tasks[0].name, "Meditate");
    }

    #[test]
    fn load_from_rejects_invalid_progress() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[progress]\nlevel_up_threshold = 0\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn load_from_reports_parse_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
    }
}
