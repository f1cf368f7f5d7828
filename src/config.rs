//! Environment-driven configuration.
//!
//! Built once at startup with [`AppConfig::from_env`] and passed by
//! reference into the aggregator, synthesizer and task-manager
//! constructors. Core logic never reads the environment directly.

use std::env;
use std::time::Duration;
use url::Url;

/// Default OpenAI-compatible endpoint for the text-generation service.
const DEFAULT_AI_BASE_URL: &str = "https://api.deepseek.com";
const DEFAULT_AI_MODEL: &str = "deepseek-chat";
const DEFAULT_AI_MAX_TOKENS: u32 = 2000;

/// Bound on a single text-generation call. No timeout was inherited from
/// the upstream design, so we impose one to keep task latency bounded.
const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;
/// Bound on a single provider fetch within an aggregation run.
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Process-wide configuration, assembled once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ai: AiConfig,
    pub providers: ProviderSettings,
    /// Bypass aggregation and generation entirely and return a fixed
    /// fixture report. Intended for demos and frontend development.
    pub mock_mode: bool,
}

/// Settings for the external text-generation service.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: Url,
    pub model: String,
    pub max_tokens: u32,
    pub request_timeout: Duration,
}

/// Settings for the vehicle-history providers.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub carfax_api_key: Option<String>,
    pub clearwin_api_key: Option<String>,
    /// NHTSA's VPIC API needs no key; registration is gated separately
    /// because it performs a live network call.
    pub nhtsa_enabled: bool,
    pub fetch_timeout: Duration,
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// Recognized variables: `DEEPSEEK_API_KEY`, `AI_BASE_URL`, `AI_MODEL`,
    /// `AI_MAX_TOKENS`, `AI_REQUEST_TIMEOUT_SECS`, `AI_MOCK_RESPONSE`,
    /// `CARFAX_API_KEY`, `CLEARWIN_API_KEY`, `NHTSA_ENABLED`,
    /// `PROVIDER_FETCH_TIMEOUT_SECS`. All have defaults except the API
    /// keys, which stay unset when absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = match env::var("AI_BASE_URL") {
            Ok(raw) => Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
                var: "AI_BASE_URL".to_string(),
                message: e.to_string(),
            })?,
            Err(_) => default_base_url(),
        };

        Ok(Self {
            ai: AiConfig {
                api_key: env::var("DEEPSEEK_API_KEY").ok(),
                base_url,
                model: env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
                max_tokens: parse_var("AI_MAX_TOKENS")?.unwrap_or(DEFAULT_AI_MAX_TOKENS),
                request_timeout: Duration::from_secs(
                    parse_var("AI_REQUEST_TIMEOUT_SECS")?.unwrap_or(DEFAULT_AI_TIMEOUT_SECS),
                ),
            },
            providers: ProviderSettings {
                carfax_api_key: env::var("CARFAX_API_KEY").ok(),
                clearwin_api_key: env::var("CLEARWIN_API_KEY").ok(),
                nhtsa_enabled: parse_bool_var("NHTSA_ENABLED")?.unwrap_or(false),
                fetch_timeout: Duration::from_secs(
                    parse_var("PROVIDER_FETCH_TIMEOUT_SECS")?.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
                ),
            },
            mock_mode: parse_bool_var("AI_MOCK_RESPONSE")?.unwrap_or(false),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig {
                api_key: None,
                base_url: default_base_url(),
                model: DEFAULT_AI_MODEL.to_string(),
                max_tokens: DEFAULT_AI_MAX_TOKENS,
                request_timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
            },
            providers: ProviderSettings {
                carfax_api_key: None,
                clearwin_api_key: None,
                nhtsa_enabled: false,
                fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            },
            mock_mode: false,
        }
    }
}

fn default_base_url() -> Url {
    // The literal is well-formed; a parse failure here is a build-time bug.
    Url::parse(DEFAULT_AI_BASE_URL).expect("default AI base URL is valid")
}

fn parse_var<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                var: var.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

fn parse_bool_var(var: &str) -> Result<Option<bool>, ConfigError> {
    match env::var(var) {
        Ok(raw) => match raw.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            other => Err(ConfigError::InvalidValue {
                var: var.to_string(),
                message: format!("expected a boolean, got '{other}'"),
            }),
        },
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "DEEPSEEK_API_KEY",
            "AI_BASE_URL",
            "AI_MODEL",
            "AI_MAX_TOKENS",
            "AI_REQUEST_TIMEOUT_SECS",
            "AI_MOCK_RESPONSE",
            "CARFAX_API_KEY",
            "CLEARWIN_API_KEY",
            "NHTSA_ENABLED",
            "PROVIDER_FETCH_TIMEOUT_SECS",
        ] {
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_environment_is_empty() {
        clear_env();
        let config = AppConfig::from_env().unwrap();

        assert_eq!(config.ai.model, DEFAULT_AI_MODEL);
        assert_eq!(config.ai.max_tokens, DEFAULT_AI_MAX_TOKENS);
        assert_eq!(config.ai.base_url.as_str(), "https://api.deepseek.com/");
        assert_eq!(config.providers.fetch_timeout, Duration::from_secs(10));
        assert!(!config.providers.nhtsa_enabled);
        assert!(!config.mock_mode);
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    #[serial]
    fn environment_overrides_are_honored() {
        clear_env();
        unsafe {
            env::set_var("DEEPSEEK_API_KEY", "sk-test");
            env::set_var("AI_MODEL", "deepseek-reasoner");
            env::set_var("AI_MAX_TOKENS", "4096");
            env::set_var("AI_MOCK_RESPONSE", "true");
            env::set_var("NHTSA_ENABLED", "1");
            env::set_var("PROVIDER_FETCH_TIMEOUT_SECS", "5");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.ai.model, "deepseek-reasoner");
        assert_eq!(config.ai.max_tokens, 4096);
        assert!(config.mock_mode);
        assert!(config.providers.nhtsa_enabled);
        assert_eq!(config.providers.fetch_timeout, Duration::from_secs(5));

        clear_env();
    }

    #[test]
    #[serial]
    fn malformed_values_are_rejected() {
        clear_env();
        unsafe { env::set_var("AI_MAX_TOKENS", "lots") };
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));

        clear_env();
        unsafe { env::set_var("AI_BASE_URL", "not a url") };
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));

        clear_env();
        unsafe { env::set_var("AI_MOCK_RESPONSE", "maybe") };
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));

        clear_env();
    }
}
