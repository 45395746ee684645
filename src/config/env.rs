// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use crate::config::file::ReplyConfig;
use crate::filter::FilterMode;
use crate::filter::rules::{DEFAULT_PROMO_PATTERNS, TWEET_MAX_AGE_MINUTES, TWEET_MIN_LENGTH};
use crate::llm::DEFAULT_MODEL;
use tracing::{debug, info, warn};

pub const DEFAULT_ALVA_API_BASE_URL: &str = "https://api-llm2.prd.alva.xyz";
pub const DEFAULT_ALVA_SKILL_ID: &str = "1940947595121053696";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Alva chat backend settings (ALVA_JWT_TOKEN, ALVA_API_BASE_URL, ALVA_SKILL_ID)
#[derive(Debug, Clone)]
pub struct AlvaSettings {
    /// Sent verbatim as the Authorization header. Required by the Alva client.
    pub jwt_token: Option<String>,
    pub api_base_url: String,
    pub skill_id: String,
}

impl Default for AlvaSettings {
    fn default() -> Self {
        Self {
            jwt_token: None,
            api_base_url: DEFAULT_ALVA_API_BASE_URL.to_string(),
            skill_id: DEFAULT_ALVA_SKILL_ID.to_string(),
        }
    }
}

/// Chat-completion gateway settings (OPENAI_API_KEY, OPENAI_BASE_URL, OPENAI_MODEL)
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Relevance filter settings
#[derive(Debug, Clone)]
pub struct FilterSettings {
    pub mode: FilterMode,
    pub min_length: usize,
    pub max_age_minutes: i64,
    /// Ordered; the first match names the rejection reason
    pub promo_patterns: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            mode: FilterMode::default(),
            min_length: TWEET_MIN_LENGTH,
            max_age_minutes: TWEET_MAX_AGE_MINUTES,
            promo_patterns: DEFAULT_PROMO_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Problems found by `EnvConfig::validate`. Errors are fatal at start-up.
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors then warnings, one bullet per line
    pub fn report(&self) -> String {
        let sections: Vec<String> = [("Errors", &self.errors), ("Warnings", &self.warnings)]
            .into_iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(title, items)| {
                let bullets: Vec<String> = items.iter().map(|i| format!("  - {}", i)).collect();
                format!("{}:\n{}", title, bullets.join("\n"))
            })
            .collect();

        if sections.is_empty() {
            "Configuration OK".to_string()
        } else {
            sections.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub alva: AlvaSettings,
    pub llm: LlmSettings,
    pub filter: FilterSettings,
    /// Raw ALVA_TWEET_FILTER_MODE value when it was not a known mode
    pub unknown_mode: Option<String>,
}

impl EnvConfig {
    /// Load all configuration (call once at startup). Environment overrides the file.
    pub fn load() -> Self {
        info!("Loading environment configuration");
        Self::from_sources(&ReplyConfig::load(), |name| std::env::var(name).ok())
    }

    /// Build configuration from a config file and a variable lookup.
    ///
    /// Empty or whitespace-only values count as unset.
    pub fn from_sources<F>(file: &ReplyConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let alva = AlvaSettings {
            jwt_token: read("ALVA_JWT_TOKEN"),
            api_base_url: read("ALVA_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ALVA_API_BASE_URL.to_string()),
            skill_id: read("ALVA_SKILL_ID").unwrap_or_else(|| DEFAULT_ALVA_SKILL_ID.to_string()),
        };

        let llm = LlmSettings {
            api_key: read("OPENAI_API_KEY"),
            base_url: read("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: read("OPENAI_MODEL")
                .or_else(|| file.llm.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        };

        let raw_mode = read("ALVA_TWEET_FILTER_MODE").or_else(|| file.filter.mode.clone());
        let (mode, unknown_mode) = match raw_mode {
            Some(raw) => match raw.parse::<FilterMode>() {
                Ok(mode) => (mode, None),
                Err(_) => {
                    warn!(value = %raw, "Unknown tweet filter mode, using alva2");
                    (FilterMode::default(), Some(raw))
                }
            },
            None => (FilterMode::default(), None),
        };

        let defaults = FilterSettings::default();
        let filter = FilterSettings {
            mode,
            min_length: file.filter.min_length.unwrap_or(defaults.min_length),
            max_age_minutes: file.filter.max_age_minutes.unwrap_or(defaults.max_age_minutes),
            promo_patterns: file
                .filter
                .promo_patterns
                .clone()
                .unwrap_or(defaults.promo_patterns),
        };

        let config = Self {
            alva,
            llm,
            filter,
            unknown_mode,
        };
        config.log_status();
        config
    }

    /// Log which settings are present (without exposing secret values)
    fn log_status(&self) {
        debug!(
            alva_jwt = self.alva.jwt_token.is_some(),
            alva_base_url = %self.alva.api_base_url,
            llm_key = self.llm.api_key.is_some(),
            model = %self.llm.model,
            filter_mode = %self.filter.mode,
            promo_patterns = self.filter.promo_patterns.len(),
            "Configuration loaded"
        );
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::default();

        if self.llm.api_key.is_none() {
            validation.errors.push("OPENAI_API_KEY is required".into());
        }
        if self.alva.jwt_token.is_none() {
            validation
                .warnings
                .push("ALVA_JWT_TOKEN is not set; the alva answer engine is unavailable".into());
        }
        if let Some(ref raw) = self.unknown_mode {
            validation.warnings.push(format!(
                "Unknown ALVA_TWEET_FILTER_MODE '{}'. Valid options: alva1, alva2",
                raw
            ));
        }
        if self.filter.promo_patterns.is_empty() {
            validation.warnings.push("No promotional patterns configured".into());
        }

        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = EnvConfig::from_sources(&ReplyConfig::default(), |_| None);
        assert!(config.alva.jwt_token.is_none());
        assert_eq!(config.alva.api_base_url, DEFAULT_ALVA_API_BASE_URL);
        assert_eq!(config.alva.skill_id, DEFAULT_ALVA_SKILL_ID);
        assert_eq!(config.llm.model, "gpt-4.1-mini");
        assert_eq!(config.filter.mode, FilterMode::Alva2);
        assert_eq!(config.filter.min_length, 20);
        assert_eq!(config.filter.max_age_minutes, 120);
        assert_eq!(config.filter.promo_patterns.len(), DEFAULT_PROMO_PATTERNS.len());
    }

    #[test]
    fn test_env_values_are_read() {
        let lookup = lookup_from(&[
            ("ALVA_JWT_TOKEN", "jwt-abc"),
            ("ALVA_API_BASE_URL", "http://localhost:9000"),
            ("ALVA_SKILL_ID", "42"),
            ("OPENAI_API_KEY", "sk-test"),
            ("ALVA_TWEET_FILTER_MODE", "alva1"),
        ]);
        let config = EnvConfig::from_sources(&ReplyConfig::default(), lookup);
        assert_eq!(config.alva.jwt_token.as_deref(), Some("jwt-abc"));
        assert_eq!(config.alva.api_base_url, "http://localhost:9000");
        assert_eq!(config.alva.skill_id, "42");
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.filter.mode, FilterMode::Alva1);
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let lookup = lookup_from(&[("ALVA_JWT_TOKEN", "   "), ("ALVA_API_BASE_URL", "")]);
        let config = EnvConfig::from_sources(&ReplyConfig::default(), lookup);
        assert!(config.alva.jwt_token.is_none());
        assert_eq!(config.alva.api_base_url, DEFAULT_ALVA_API_BASE_URL);
    }

    #[test]
    fn test_env_overrides_file() {
        let file: ReplyConfig = toml::from_str(
            "[filter]\nmode = \"alva1\"\nmin_length = 10\n[llm]\nmodel = \"from-file\"",
        )
        .unwrap();
        let lookup = lookup_from(&[("ALVA_TWEET_FILTER_MODE", "alva2")]);
        let config = EnvConfig::from_sources(&file, lookup);
        assert_eq!(config.filter.mode, FilterMode::Alva2);
        assert_eq!(config.filter.min_length, 10);
        assert_eq!(config.llm.model, "from-file");
    }

    #[test]
    fn test_unknown_mode_defaults_to_alva2() {
        let lookup = lookup_from(&[("ALVA_TWEET_FILTER_MODE", "alva3"), ("OPENAI_API_KEY", "k")]);
        let config = EnvConfig::from_sources(&ReplyConfig::default(), lookup);
        assert_eq!(config.filter.mode, FilterMode::Alva2);
        assert_eq!(config.unknown_mode.as_deref(), Some("alva3"));

        let validation = config.validate();
        assert!(validation.is_valid());
        assert!(validation.warnings.iter().any(|w| w.contains("alva3")));
    }

    #[test]
    fn test_validation_requires_llm_key() {
        let config = EnvConfig::from_sources(&ReplyConfig::default(), |_| None);
        let validation = config.validate();
        assert!(!validation.is_valid());
        assert!(validation.report().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_validation_report_ok() {
        let lookup = lookup_from(&[("OPENAI_API_KEY", "k"), ("ALVA_JWT_TOKEN", "j")]);
        let config = EnvConfig::from_sources(&ReplyConfig::default(), lookup);
        assert_eq!(config.validate().report(), "Configuration OK");
    }

    #[test]
    fn test_validation_report_lists_errors_before_warnings() {
        let config = EnvConfig::from_sources(&ReplyConfig::default(), |_| None);
        assert_eq!(
            config.validate().report(),
            "Errors:\n  - OPENAI_API_KEY is required\n\
             Warnings:\n  - ALVA_JWT_TOKEN is not set; the alva answer engine is unavailable"
        );
    }
}
