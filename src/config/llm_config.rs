//! LLM feature extractor configuration.

use std::env;
use std::time::Duration;

/// Gemini API configuration
#[derive(Debug, Clone)]
pub struct LlmEnvConfig {
    /// Checked per request, so the server starts without it.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for LlmEnvConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

impl LlmEnvConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            timeout: env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_config_defaults() {
        let config = LlmEnvConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout, Duration::from_secs(20));
    }
}
