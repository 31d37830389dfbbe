use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_store_path")]
    pub store_path: String,
    #[serde(default = "default_alert_millis")]
    pub alert_millis: u64,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Empty disables logging.
    #[serde(default)]
    pub log_file: String,
}

fn default_theme() -> String {
    "classic".to_string()
}
fn default_store_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("optcon")
        .join("options.json")
        .to_string_lossy()
        .to_string()
}
fn default_alert_millis() -> u64 {
    2000
}
fn default_title() -> String {
    "Option configuration console".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            store_path: default_store_path(),
            alert_millis: default_alert_millis(),
            title: default_title(),
            log_level: default_log_level(),
            log_file: String::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("optcon")
            .join("config.toml")
    }

    pub fn logging_enabled(&self) -> bool {
        !self.log_file.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "classic");
        assert_eq!(config.alert_millis, 2000);
        assert_eq!(config.title, "Option configuration console");
        assert!(config.store_path.ends_with("options.json"));
        assert!(!config.logging_enabled());
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
theme = "mono"
alert_millis = 500
log_file = "/tmp/optcon.log"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "mono");
        assert_eq!(config.alert_millis, 500);
        assert!(config.logging_enabled());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.title, "Option configuration console");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.title = "Bench rig".to_string();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.title, "Bench rig");
        assert_eq!(deserialized.store_path, config.store_path);
        assert_eq!(deserialized.alert_millis, config.alert_millis);
    }

    #[test]
    fn test_whitespace_log_file_is_disabled() {
        let mut config = Config::default();
        config.log_file = "   ".to_string();
        assert!(!config.logging_enabled());
    }
}
