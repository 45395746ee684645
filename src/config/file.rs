// src/config/file.rs
// File-based configuration from ~/.alva/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ReplyConfig {
    #[serde(default)]
    pub filter: FilterFileConfig,
    #[serde(default)]
    pub llm: LlmFileConfig,
}

/// `[filter]` section. Every field is optional; missing values fall back to built-ins.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FilterFileConfig {
    /// "alva1" or "alva2"
    pub mode: Option<String>,
    pub min_length: Option<usize>,
    pub max_age_minutes: Option<i64>,
    /// Ordered promotional patterns; replaces the built-in list when present
    pub promo_patterns: Option<Vec<String>>,
}

/// `[llm]` section
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LlmFileConfig {
    pub model: Option<String>,
}

impl ReplyConfig {
    /// Load config from `$ALVA_CONFIG` or ~/.alva/config.toml
    pub fn load() -> Self {
        let path = std::env::var("ALVA_CONFIG")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_path);
        Self::load_from(&path)
    }

    /// Load config from an explicit path. Unreadable or invalid files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Get the default config file path
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".alva")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[filter]
mode = "alva1"
min_length = 30
max_age_minutes = 60
promo_patterns = ['\bpresale\b', 'bit\.ly/']

[llm]
model = "gpt-4.1"
"#;
        let config: ReplyConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.filter.mode.as_deref(), Some("alva1"));
        assert_eq!(config.filter.min_length, Some(30));
        assert_eq!(config.filter.max_age_minutes, Some(60));
        assert_eq!(config.filter.promo_patterns.unwrap().len(), 2);
        assert_eq!(config.llm.model.as_deref(), Some("gpt-4.1"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: ReplyConfig = toml::from_str("").unwrap();
        assert!(config.filter.mode.is_none());
        assert!(config.filter.promo_patterns.is_none());
        assert!(config.llm.model.is_none());
    }

    #[test]
    fn test_load_from_missing_file() {
        let config = ReplyConfig::load_from(Path::new("/nonexistent/alva/config.toml"));
        assert!(config.filter.mode.is_none());
    }

    #[test]
    fn test_load_from_invalid_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[filter\nmode = ").unwrap();
        let config = ReplyConfig::load_from(file.path());
        assert!(config.filter.mode.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[filter]\nmode = \"alva2\"").unwrap();
        let config = ReplyConfig::load_from(file.path());
        assert_eq!(config.filter.mode.as_deref(), Some("alva2"));
    }
}
