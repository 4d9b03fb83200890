use crate::calendar::{ViewMode, WeekStart};
use crate::constants::VIDEO_EXTENSIONS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration loaded from settings.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Mirror session and videos to JSON files in data_dir
    #[serde(default = "default_true")]
    pub persist: bool,
}

fn default_data_dir() -> String {
    "~/.local/share/clipdesk".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarConfig {
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default)]
    pub default_view: ViewMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Artificial latency added to every generation
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    800
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: u64,
    #[serde(default = "default_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_max_size_mb() -> u64 {
    2048
}

fn default_extensions() -> Vec<String> {
    VIDEO_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            persist: true,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_mb: default_max_size_mb(),
            allowed_extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration from default location or return defaults
    pub fn load() -> Result<Self> {
        let default_paths = [
            PathBuf::from("config/settings.toml"),
            PathBuf::from("./config/settings.toml"),
            PathBuf::from(shellexpand::tilde("~/.config/clipdesk/settings.toml").as_ref()),
        ];

        for path in &default_paths {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                return Self::from_file(path);
            }
        }

        Ok(Self::default())
    }

    /// Data directory with `~` and environment variables expanded
    pub fn data_dir(&self) -> Result<PathBuf> {
        let expanded = shellexpand::full(&self.storage.data_dir)
            .with_context(|| format!("Failed to expand data dir: {}", self.storage.data_dir))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }

    /// Generator delay as a Duration
    pub fn generator_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.generator.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.storage.data_dir, "~/.local/share/clipdesk");
        assert!(config.storage.persist);
        assert_eq!(config.calendar.week_start, WeekStart::Sunday);
        assert_eq!(config.calendar.default_view, ViewMode::TwoWeek);
        assert_eq!(config.generator.delay_ms, 800);
        assert!(config.upload.allowed_extensions.contains(&"mp4".to_string()));
    }

    #[test]
    fn test_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[storage]
data_dir = "/tmp/clipdesk-test"
persist = false

[calendar]
week_start = "monday"
default_view = "month"

[generator]
delay_ms = 0
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.storage.data_dir, "/tmp/clipdesk-test");
        assert!(!config.storage.persist);
        assert_eq!(config.calendar.week_start, WeekStart::Monday);
        assert_eq!(config.calendar.default_view, ViewMode::Month);
        assert_eq!(config.generator.delay_ms, 0);
        // Missing section falls back to defaults
        assert_eq!(config.upload.max_size_mb, 2048);
    }

    #[test]
    fn test_data_dir_expands_tilde() {
        let config = Config::default();
        let dir = config.data_dir().unwrap();
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.ends_with(".local/share/clipdesk"));
    }
}
