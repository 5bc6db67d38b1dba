use crate::output::ColorMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "dirt";
const CONFIG_FILE: &str = "config.json";

/// User configuration, read from `<config_dir>/dirt/config.json`.
/// Command-line flags take precedence over every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Worker count. 0 means one per available CPU.
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Show a progress bar on stderr while searching
    #[serde(default)]
    pub progress: bool,

    /// Colouring of match lines
    #[serde(default)]
    pub color: ColorMode,
}

fn default_threads() -> usize {
    0 // 0 means use CPU count
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            progress: false,
            color: ColorMode::default(),
        }
    }
}

impl AppConfig {
    /// Load from the default location, or defaults if no file exists.
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Worker count with 0 resolved to the CPU count
    pub fn effective_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus()
        } else {
            self.threads
        }
    }
}

/// Number of CPUs available
pub fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Default config file location, if the platform has a config directory.
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.threads, 0);
        assert!(!config.progress);
        assert_eq!(config.color, ColorMode::Auto);
    }

    #[test]
    fn test_effective_threads() {
        let mut config = AppConfig::default();

        // 0 should resolve to CPU count
        assert!(config.effective_threads() >= 1);

        config.threads = 3;
        assert_eq!(config.effective_threads(), 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"progress": true}"#).unwrap();
        assert!(config.progress);
        assert_eq!(config.threads, 0);
        assert_eq!(config.color, ColorMode::Auto);
    }

    #[test]
    fn test_color_field_lowercase() {
        let config: AppConfig =
            serde_json::from_str(r#"{"color": "never", "threads": 2}"#).unwrap();
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.threads, 2);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("dirt_config_test_{}", std::process::id()));
        let path = dir.join("nested").join(CONFIG_FILE);
        let config = AppConfig {
            threads: 6,
            progress: true,
            color: ColorMode::Always,
        };

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let path = std::env::temp_dir().join("dirt_config_does_not_exist.json");
        assert!(AppConfig::load_from(&path).is_err());
    }
}
